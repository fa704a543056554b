//! Merge base finder
//!
//! Picks the single common ancestor a three-way merge compares against.
//!
//! ## Algorithm
//!
//! 1. Breadth-first walk from each side following *both* parents, recording
//!    for every ancestor its minimum distance and, at that distance, the
//!    fewest second-parent ("merge") hops needed to reach it
//! 2. Common ancestors are the commits visited from both sides
//! 3. A common ancestor that is itself an ancestor of another common ancestor
//!    is stale and dropped
//! 4. The remaining candidates are ranked by combined distance, then combined
//!    merge hops, then object id, so the choice is fully deterministic
//!
//! ## Debug Logging
//!
//! Build with `--features debug_merge` to print traversal states on stderr.

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

/// Macro for debug logging that is enabled with the debug_merge feature flag
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            eprintln!($($arg)*);
        }
    };
}

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b0000;
        const VISITED_FROM_SOURCE = 0b0001;
        const VISITED_FROM_TARGET = 0b0010;
        const VISITED_FROM_BOTH = Self::VISITED_FROM_SOURCE.bits() | Self::VISITED_FROM_TARGET.bits();
        const STALE = 0b0100; // an ancestor of another common ancestor
        const RESULT = 0b1000; // a common ancestor still in the running
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::VISITED_FROM_SOURCE) {
            flags.push("SOURCE");
        }
        if self.contains(VisitState::VISITED_FROM_TARGET) {
            flags.push("TARGET");
        }
        if self.contains(VisitState::STALE) {
            flags.push("STALE");
        }
        if self.contains(VisitState::RESULT) {
            flags.push("RESULT");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// How far an ancestor is from the commit a walk started at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Reach {
    distance: usize,
    merge_hops: usize,
}

/// Finds the lowest common ancestor of two commits
///
/// `commit_loader` returns the parents of any commit id; storage is up to the
/// caller (the object database in production, an in-memory graph in tests).
pub struct LCAFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> LCAFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Every ancestor of `start` (itself included) with its minimum reach
    fn walk_ancestors(&self, start: &ObjectId) -> anyhow::Result<HashMap<ObjectId, Reach>> {
        let mut reaches = HashMap::from([(
            start.clone(),
            Reach {
                distance: 0,
                merge_hops: 0,
            },
        )]);
        let mut frontier = vec![start.clone()];

        // layer by layer, so every node is final before it is expanded
        while !frontier.is_empty() {
            let mut next_frontier = Vec::new();

            for oid in frontier {
                let reach = reaches[&oid];
                let commit = (self.commit_loader)(&oid)?;

                for (index, parent) in commit.parents.iter().enumerate() {
                    let candidate = Reach {
                        distance: reach.distance + 1,
                        merge_hops: reach.merge_hops + usize::from(index > 0),
                    };

                    match reaches.entry(parent.clone()) {
                        Entry::Vacant(entry) => {
                            entry.insert(candidate);
                            next_frontier.push(parent.clone());
                        }
                        Entry::Occupied(mut entry) => {
                            let existing = entry.get_mut();
                            if existing.distance == candidate.distance
                                && existing.merge_hops > candidate.merge_hops
                            {
                                existing.merge_hops = candidate.merge_hops;
                            }
                        }
                    }
                }
            }

            frontier = next_frontier;
        }

        Ok(reaches)
    }

    /// Proper ancestors of any commit in `starts`, each loaded once
    fn ancestors_of_any<'a>(
        &self,
        starts: impl IntoIterator<Item = &'a ObjectId>,
    ) -> anyhow::Result<HashSet<ObjectId>> {
        let mut ancestors = HashSet::new();
        let mut expanded = HashSet::new();
        let mut queue = starts.into_iter().cloned().collect::<VecDeque<_>>();

        while let Some(oid) = queue.pop_front() {
            if !expanded.insert(oid.clone()) {
                continue;
            }

            for parent in (self.commit_loader)(&oid)?.parents {
                ancestors.insert(parent.clone());
                queue.push_back(parent);
            }
        }

        Ok(ancestors)
    }

    /// The merge base of `source` and `target`, or `None` for unrelated histories
    pub fn find_lowest_common_ancestor(
        &self,
        source_commit_id: &ObjectId,
        target_commit_id: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        if source_commit_id == target_commit_id {
            return Ok(Some(source_commit_id.clone()));
        }

        let source_reaches = self.walk_ancestors(source_commit_id)?;
        let target_reaches = self.walk_ancestors(target_commit_id)?;

        let mut states = HashMap::<ObjectId, VisitState>::new();
        for oid in source_reaches.keys() {
            *states.entry(oid.clone()).or_insert(VisitState::NONE) |=
                VisitState::VISITED_FROM_SOURCE;
        }
        for oid in target_reaches.keys() {
            *states.entry(oid.clone()).or_insert(VisitState::NONE) |=
                VisitState::VISITED_FROM_TARGET;
        }

        let common_ancestors = states
            .iter_mut()
            .filter(|(_, state)| state.contains(VisitState::VISITED_FROM_BOTH))
            .map(|(oid, state)| {
                *state |= VisitState::RESULT;
                oid.clone()
            })
            .collect::<HashSet<_>>();

        debug_log!(
            "Common ancestors of {} and {}: {}",
            source_commit_id,
            target_commit_id,
            common_ancestors
                .iter()
                .map(|oid| oid.as_ref())
                .collect::<Vec<_>>()
                .join(", ")
        );

        // ancestors of common ancestors are common ancestors themselves
        for ancestor in self.ancestors_of_any(&common_ancestors)? {
            if let Some(state) = states.get_mut(&ancestor) {
                *state |= VisitState::STALE;
            }
        }

        debug_log!(
            "Final ancestor states: {}",
            states
                .iter()
                .filter(|(_, state)| state.contains(VisitState::RESULT))
                .map(|(oid, state)| format!("{}: {}", oid, state))
                .collect::<Vec<_>>()
                .join(", ")
        );

        let best_common_ancestor = states
            .into_iter()
            .filter(|(_, state)| {
                state.contains(VisitState::RESULT) && !state.contains(VisitState::STALE)
            })
            .map(|(oid, _)| {
                let source = source_reaches[&oid];
                let target = target_reaches[&oid];
                let rank = (
                    source.distance + target.distance,
                    source.merge_hops + target.merge_hops,
                );
                (rank, oid)
            })
            .min()
            .map(|(_, oid)| oid);

        debug_log!("Lowest common ancestor: {:?}", best_common_ancestor);

        Ok(best_common_ancestor)
    }
}
