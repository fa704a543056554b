//! Working tree status inspection
//!
//! Compares working-directory content (by blob hash) against the head
//! snapshot and the staging area.
//!
//! ## Components
//!
//! - `file_change`: how a file on disk departs from what is recorded
//! - `inspector`: content comparisons for a single path
//! - `status_info`: classification of the whole workspace and its rendering

pub mod file_change;
pub mod inspector;
pub mod status_info;
