//! Per-path merge decisions
//!
//! With `base`, `current` and `given` being the blob a path has in the merge
//! base, the checked-out tip and the merged-in tip (or nothing):
//!
//! | situation                          | result                 |
//! |------------------------------------|------------------------|
//! | current == given                   | keep current           |
//! | base == current, given differs     | take given (or delete) |
//! | base == given, current differs     | keep current           |
//! | anything else                      | conflict               |

use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::{BufMut, Bytes, BytesMut};
use std::collections::BTreeSet;
use std::path::PathBuf;

pub const CONFLICT_START: &str = "<<<<<<< HEAD\n";
pub const CONFLICT_SEPARATOR: &str = "=======\n";
pub const CONFLICT_END: &str = ">>>>>>>\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathResolution {
    KeepCurrent,
    TakeGiven(ObjectId),
    Delete,
    Conflict {
        current: Option<ObjectId>,
        given: Option<ObjectId>,
    },
}

impl PathResolution {
    pub fn resolve(
        base: Option<&ObjectId>,
        current: Option<&ObjectId>,
        given: Option<&ObjectId>,
    ) -> Self {
        if current == given || base == given {
            PathResolution::KeepCurrent
        } else if base == current {
            match given {
                Some(given) => PathResolution::TakeGiven(given.clone()),
                None => PathResolution::Delete,
            }
        } else {
            PathResolution::Conflict {
                current: current.cloned(),
                given: given.cloned(),
            }
        }
    }
}

/// Outcome of merging three snapshots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResolution {
    /// Snapshot of the merge commit, conflict files included
    pub snapshot: Snapshot,
    pub conflicts: BTreeSet<PathBuf>,
}

impl MergeResolution {
    /// Merge `given` into `current` relative to `base`
    ///
    /// `write_conflict` receives the current and given blob of a conflicting
    /// path and returns the id of the stored conflict file.
    pub fn resolve(
        base: &Snapshot,
        current: &Snapshot,
        given: &Snapshot,
        mut write_conflict: impl FnMut(Option<&ObjectId>, Option<&ObjectId>) -> anyhow::Result<ObjectId>,
    ) -> anyhow::Result<Self> {
        let paths = base
            .keys()
            .chain(current.keys())
            .chain(given.keys())
            .collect::<BTreeSet<_>>();

        let mut snapshot = current.clone();
        let mut conflicts = BTreeSet::new();

        for path in paths {
            match PathResolution::resolve(base.get(path), current.get(path), given.get(path)) {
                PathResolution::KeepCurrent => {}
                PathResolution::TakeGiven(oid) => {
                    snapshot.insert(path.clone(), oid);
                }
                PathResolution::Delete => {
                    snapshot.remove(path);
                }
                PathResolution::Conflict { current, given } => {
                    let oid = write_conflict(current.as_ref(), given.as_ref())?;
                    tracing::info!(path = %path.display(), "merge conflict");

                    snapshot.insert(path.clone(), oid);
                    conflicts.insert(path.clone());
                }
            }
        }

        Ok(MergeResolution {
            snapshot,
            conflicts,
        })
    }
}

/// Content of a conflicted file; a missing side contributes nothing
pub fn conflict_content(current: &[u8], given: &[u8]) -> Bytes {
    let mut content = BytesMut::with_capacity(
        CONFLICT_START.len()
            + current.len()
            + CONFLICT_SEPARATOR.len()
            + given.len()
            + CONFLICT_END.len(),
    );

    content.put_slice(CONFLICT_START.as_bytes());
    content.put_slice(current);
    content.put_slice(CONFLICT_SEPARATOR.as_bytes());
    content.put_slice(given);
    content.put_slice(CONFLICT_END.as_bytes());

    content.freeze()
}
