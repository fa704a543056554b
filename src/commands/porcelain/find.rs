use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::reachable_commits;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use std::io::Write;

impl Repository {
    /// Ids of every reachable commit whose message is exactly `message`
    pub fn find(&self, message: &str) -> anyhow::Result<Vec<ObjectId>> {
        self.ensure_initialized()?;

        let mut matches = reachable_commits(self.database(), self.branch_tips()?)?
            .into_iter()
            .filter(|(_, commit)| commit.message() == message)
            .map(|(commit_oid, _)| commit_oid)
            .collect::<Vec<_>>();

        if matches.is_empty() {
            return Err(TwigError::NoMatchingCommit.into());
        }

        matches.sort();
        for commit_oid in &matches {
            writeln!(self.writer(), "{commit_oid}")?;
        }

        Ok(matches)
    }
}
