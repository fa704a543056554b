//! Porcelain commands
//!
//! ## Commands
//!
//! - `init`: create a repository with its root commit
//! - `add`: stage files for the next commit
//! - `rm`: stage removals and stop tracking files
//! - `commit`: record the staged snapshot
//! - `log` / `global-log`: print history
//! - `find`: look commits up by message
//! - `status`: classify the working directory
//! - `checkout`: restore files or switch branches
//! - `branch` / `rm-branch`: manage branch pointers
//! - `reset`: move the current branch to any commit
//! - `merge`: three-way merge of another branch

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
