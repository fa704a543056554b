//! User-facing failures
//!
//! Every operation that can be refused by the repository reports one of these
//! variants. The `Display` text of a variant is the single line shown to the user;
//! anything else bubbling up through `anyhow` is an infrastructure failure.

use crate::artifacts::objects::object_id::ObjectId;

/// Typed failures raised by repository operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TwigError {
    #[error("No changes added to the commit.")]
    NothingToCommit,

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("File does not exist.")]
    FileNotFound,

    #[error("No reason to remove the file.")]
    NotStaged,

    #[error("No commit with that id exists.")]
    NoSuchCommit,

    #[error("A branch with that name does not exist.")]
    NoSuchBranch,

    #[error("A branch with that name already exists.")]
    BranchExists,

    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrent,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedOverwrite,

    #[error("Cannot merge a branch with itself.")]
    SelfMerge,

    /// An object store miss. Refs and snapshots only ever point at stored
    /// objects, so this signals a corrupted repository.
    #[error("object {0} is missing from the object store")]
    NotFound(ObjectId),

    #[error("A version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("Not in an initialized version-control directory.")]
    NotInitialized,

    #[error("File does not exist in that commit.")]
    FileNotInCommit,

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,

    #[error("Found no commit with that message.")]
    NoMatchingCommit,

    #[error("Commit id prefix {0} is ambiguous.")]
    AmbiguousCommit(String),

    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),
}

impl TwigError {
    /// Whether the failure is a refusal the user can act on, as opposed to a
    /// broken repository invariant.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, TwigError::NotFound(_))
    }
}
