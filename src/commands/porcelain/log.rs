use crate::areas::repository::Repository;
use crate::artifacts::log::log_entry::LogEntry;
use crate::artifacts::log::rev_list::{RevList, reachable_commits};
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// History of the current branch, following first parents only
    pub fn log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let head_oid = self.refs().read_head()?;

        for entry in RevList::new(self.database(), head_oid) {
            let (commit_oid, commit) = entry?;
            write!(self.writer(), "{}", LogEntry::new(&commit_oid, &commit))?;
        }

        Ok(())
    }

    /// Every commit reachable from any branch, newest first
    pub fn global_log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        for (commit_oid, commit) in reachable_commits(self.database(), self.branch_tips()?)? {
            write!(self.writer(), "{}", LogEntry::new(&commit_oid, &commit))?;
        }

        Ok(())
    }

    pub(crate) fn branch_tips(&self) -> anyhow::Result<Vec<ObjectId>> {
        let refs = self.refs();

        refs.list_branches()?
            .iter()
            .filter_map(|branch_name| refs.read_branch(branch_name).transpose())
            .collect()
    }
}
