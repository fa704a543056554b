//! Staged entry representation
//!
//! An entry is either a pending addition (path plus the blob id to commit) or
//! a pending removal (path only).

use crate::artifacts::objects::object::Packable;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::anyhow;
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Longest path a staged entry can carry (u16 length prefix)
const MAX_PATH_SIZE: usize = u16::MAX as usize;

const ADDITION_KIND: u8 = 0;
const REMOVAL_KIND: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedEntry {
    Addition { path: PathBuf, oid: ObjectId },
    Removal { path: PathBuf },
}

impl StagedEntry {
    pub fn path(&self) -> &Path {
        match self {
            StagedEntry::Addition { path, .. } | StagedEntry::Removal { path } => path,
        }
    }

    /// Parse one entry, pulling exactly as many bytes as it needs from `next`
    pub fn parse(mut next: impl FnMut(usize) -> anyhow::Result<Bytes>) -> anyhow::Result<Self> {
        let kind = next(1)?[0];

        let oid = match kind {
            ADDITION_KIND => {
                let oid_bytes = next(20)?;
                Some(ObjectId::read_h40_from(&mut &oid_bytes[..])?)
            }
            REMOVAL_KIND => None,
            other => return Err(anyhow!("Unknown staged entry kind: {other}")),
        };

        let path_len = byteorder::NetworkEndian::read_u16(&next(2)?) as usize;
        let path = String::from_utf8(next(path_len)?.to_vec())
            .map_err(|_| anyhow!("Staged path is not valid UTF-8"))?;
        let path = PathBuf::from(path);

        Ok(match oid {
            Some(oid) => StagedEntry::Addition { path, oid },
            None => StagedEntry::Removal { path },
        })
    }
}

impl Packable for StagedEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let path = self
            .path()
            .to_str()
            .ok_or_else(|| anyhow!("Invalid staged path: {:?}", self.path()))?;
        if path.len() > MAX_PATH_SIZE {
            return Err(anyhow!("Staged path is too long: {path}"));
        }

        let mut bytes = Vec::new();
        match self {
            StagedEntry::Addition { oid, .. } => {
                bytes.write_u8(ADDITION_KIND)?;
                oid.write_h40_to(&mut bytes)?;
            }
            StagedEntry::Removal { .. } => bytes.write_u8(REMOVAL_KIND)?,
        }
        bytes.write_u16::<byteorder::NetworkEndian>(path.len() as u16)?;
        bytes.write_all(path.as_bytes())?;

        Ok(Bytes::from(bytes))
    }
}
