//! A local, single-user version-control engine.
//!
//! The crate is organized in three layers:
//!
//! - `areas`: the stateful parts of a repository (object store, staging area,
//!   refs, working directory) and the `Repository` handle tying them together
//! - `artifacts`: the data types and algorithms operating on those areas
//!   (objects, checkout migrations, status inspection, history walks, merging)
//! - `commands`: one user-facing operation per verb, implemented on `Repository`

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

/// Name of the repository metadata directory inside the working directory
pub const REPOSITORY_DIR: &str = ".twig";

/// Branch created by `init` and checked out by default
pub const DEFAULT_BRANCH: &str = "master";
