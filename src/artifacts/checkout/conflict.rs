use crate::errors::TwigError;

/// Why a path blocks a migration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConflictType {
    /// An untracked file (or a directory holding one) sits where the target
    /// snapshot wants to write
    UntrackedOverwritten,
    /// A tracked file has working modifications the migration would overwrite
    /// or delete
    StaleFile,
}

impl From<ConflictType> for TwigError {
    fn from(value: ConflictType) -> Self {
        match value {
            ConflictType::UntrackedOverwritten => TwigError::UntrackedOverwrite,
            ConflictType::StaleFile => TwigError::UncommittedChanges,
        }
    }
}
