//! Three-way merging
//!
//! - `lca_finder`: picks the merge base of two commits
//! - `resolution`: decides, path by path, what the merged snapshot holds and
//!   builds conflict files where both sides changed differently

pub mod lca_finder;
pub mod resolution;
