//! Stored object types
//!
//! Everything the repository remembers is an immutable object identified by the
//! SHA-1 hash of its canonical encoding. There are two kinds:
//!
//! - **Blob**: the raw bytes of one tracked file at one point in time
//! - **Commit**: a snapshot (path -> blob id) plus message, timestamp and parents
//!
//! All objects share the on-disk envelope `<type> <size>\0<body>`.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Shortest commit id prefix accepted when resolving abbreviations
pub const MIN_PREFIX_LENGTH: usize = 4;
