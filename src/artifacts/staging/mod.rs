//! Staging file format
//!
//! The staging area persists pending additions and removals in `.twig/index`.
//!
//! ## File Format
//!
//! ```text
//! Header (16 bytes):
//!   - Signature: "STAG" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Additions count (4 bytes)
//!   - Removals count (4 bytes)
//!
//! Entries (variable length, additions first, each group sorted by path):
//!   - Kind (1 byte): 0 = addition, 1 = removal
//!   - Object ID (20 bytes, additions only)
//!   - Path length (2 bytes)
//!   - Path (UTF-8)
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod checksum;
pub mod staged_entry;
pub mod staging_header;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of the staging file header in bytes
pub const HEADER_SIZE: usize = 16; // marker, version, additions, removals

/// Magic signature identifying staging files
pub const SIGNATURE: &str = "STAG";

/// Staging file format version
pub const VERSION: u32 = 1;
