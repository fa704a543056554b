use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use std::cmp::Reverse;
use std::collections::{HashSet, VecDeque};

/// First-parent history starting at a commit, newest first
#[derive(Clone, new)]
pub struct RevList<'r> {
    database: &'r Database,
    start: ObjectId,
}

impl<'r> IntoIterator for RevList<'r> {
    type Item = anyhow::Result<(ObjectId, Commit)>;
    type IntoIter = RevListIntoIter<'r>;

    fn into_iter(self) -> Self::IntoIter {
        RevListIntoIter {
            database: self.database,
            current_commit_oid: Some(self.start),
        }
    }
}

pub struct RevListIntoIter<'r> {
    database: &'r Database,
    current_commit_oid: Option<ObjectId>,
}

impl Iterator for RevListIntoIter<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.current_commit_oid.take()?;

        match self.database.parse_object_as_commit(&commit_oid) {
            Ok(commit) => {
                // Move to the first parent for the next iteration
                self.current_commit_oid = commit.parent().cloned();
                Some(Ok((commit_oid, commit)))
            }
            Err(error) => Some(Err(error)),
        }
    }
}

/// Every commit reachable from `tips` through any parent, each listed once
///
/// Ordered newest first; commits sharing a timestamp are ordered by id.
pub fn reachable_commits(
    database: &Database,
    tips: impl IntoIterator<Item = ObjectId>,
) -> anyhow::Result<Vec<(ObjectId, Commit)>> {
    let mut seen = HashSet::new();
    let mut queue = tips.into_iter().collect::<VecDeque<_>>();
    let mut commits = Vec::new();

    while let Some(oid) = queue.pop_front() {
        if !seen.insert(oid.clone()) {
            continue;
        }

        let commit = database.parse_object_as_commit(&oid)?;
        queue.extend(commit.parents().iter().cloned());
        commits.push((oid, commit));
    }

    commits.sort_by_key(|(oid, commit)| (Reverse(commit.timestamp()), oid.clone()));
    Ok(commits)
}
