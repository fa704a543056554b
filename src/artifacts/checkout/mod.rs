//! Checkout operations and conflict handling
//!
//! Moving the working directory from one snapshot to another:
//! - `snapshot_diff` lists the paths whose blob differs between two snapshots
//! - `migration` checks those paths against the disk, then rewrites them
//! - `conflict` names the reasons a migration refuses to start
//!
//! Every conflict is detected before the first file is touched.

pub mod conflict;
pub mod migration;
pub mod snapshot_diff;
