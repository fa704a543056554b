//! Repository data types and algorithms
//!
//! - `branch`: branch names and symbolic refs
//! - `checkout`: snapshot diffs, workspace migrations and conflict detection
//! - `core`: shared output helpers (pager wrapper)
//! - `log`: history traversal and log formatting
//! - `merge`: merge base finding and three-way resolution
//! - `objects`: stored object types (blob, commit)
//! - `staging`: on-disk format of the staging area
//! - `status`: working directory inspection

pub mod branch;
pub mod checkout;
pub mod core;
pub mod log;
pub mod merge;
pub mod objects;
pub mod staging;
pub mod status;
