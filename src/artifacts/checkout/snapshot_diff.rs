use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotChange {
    Added(ObjectId),
    Deleted(ObjectId),
    Modified { old: ObjectId, new: ObjectId },
}

impl SnapshotChange {
    pub fn from_entries(old: Option<&ObjectId>, new: Option<&ObjectId>) -> Option<Self> {
        match (old, new) {
            (None, Some(new)) => Some(SnapshotChange::Added(new.clone())),
            (Some(old), None) => Some(SnapshotChange::Deleted(old.clone())),
            (Some(old), Some(new)) if old != new => Some(SnapshotChange::Modified {
                old: old.clone(),
                new: new.clone(),
            }),
            _ => None,
        }
    }

    pub fn old_oid(&self) -> Option<&ObjectId> {
        match self {
            SnapshotChange::Deleted(oid) | SnapshotChange::Modified { old: oid, .. } => Some(oid),
            SnapshotChange::Added(_) => None,
        }
    }

    pub fn new_oid(&self) -> Option<&ObjectId> {
        match self {
            SnapshotChange::Added(oid) | SnapshotChange::Modified { new: oid, .. } => Some(oid),
            SnapshotChange::Deleted(_) => None,
        }
    }
}

/// Paths whose tracked blob differs between `old` and `new`, in path order
pub fn diff_snapshots(old: &Snapshot, new: &Snapshot) -> BTreeMap<PathBuf, SnapshotChange> {
    old.keys()
        .chain(new.keys())
        .filter_map(|path| {
            SnapshotChange::from_entries(old.get(path), new.get(path))
                .map(|change| (path.clone(), change))
        })
        .collect()
}
