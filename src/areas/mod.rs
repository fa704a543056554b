//! Stateful repository components
//!
//! - `database`: content-addressed object store for blobs and commits
//! - `staging`: pending additions and removals for the next commit
//! - `refs`: branch pointers and the HEAD symbolic ref
//! - `repository`: the handle tying the areas together
//! - `workspace`: working directory file system operations

pub mod database;
pub mod refs;
pub mod repository;
pub mod staging;
pub mod workspace;
