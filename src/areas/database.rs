//! Content-addressed object store
//!
//! Objects live in `.twig/objects/<2 hex>/<38 hex>`, zlib-compressed. An object
//! is never rewritten once stored, so `store` is idempotent and a missing file
//! always means the id was never written.

use crate::artifacts::objects::MIN_PREFIX_LENGTH;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Commit, SlimCommit};
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::TwigError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    /// Write an object and return its id
    ///
    /// Storing content that is already present leaves the existing file alone.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object_id.to_path());

        if object_path.exists() {
            tracing::trace!(oid = %object_id, "object already stored");
            return Ok(object_id);
        }

        std::fs::create_dir_all(
            object_path
                .parent()
                .context(format!("Invalid object path {}", object_path.display()))?,
        )
        .context(format!(
            "Unable to create object directory {}",
            object_path.display()
        ))?;

        self.write_object(object_path, object.serialize()?)?;
        tracing::debug!(oid = %object_id, kind = %object.object_type(), "stored object");

        Ok(object_id)
    }

    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        if !object_path.exists() {
            return Err(TwigError::NotFound(object_id.clone()).into());
        }

        self.read_object(object_path)
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Blob::deserialize(object_reader),
            other => anyhow::bail!("object {object_id} is a {other}, not a blob"),
        }
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Commit => Commit::deserialize(object_reader),
            other => anyhow::bail!("object {object_id} is a {other}, not a commit"),
        }
    }

    pub fn get_object_type(&self, object_id: &ObjectId) -> anyhow::Result<ObjectType> {
        let (object_type, _) = self.parse_object_as_bytes(object_id)?;
        Ok(object_type)
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, impl BufRead)> {
        let object_content = self.load(object_id)?;
        let mut object_reader = Cursor::new(object_content);

        let object_type = ObjectType::parse_object_type(&mut object_reader)?;

        Ok((object_type, object_reader))
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }

    /// Find all objects whose OID starts with the given prefix.
    ///
    /// For prefixes of 2+ characters only the matching fan-out directory is read.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        let mut matches = Vec::new();

        let dirs = if prefix.len() >= 2 {
            vec![prefix[..2].to_string()]
        } else {
            (0..=255).map(|i| format!("{:02x}", i)).collect()
        };

        for dir_name in dirs {
            let dir_path = self.path.join(&dir_name);
            if !dir_path.is_dir() {
                continue;
            }

            for entry in std::fs::read_dir(&dir_path)? {
                let file_name = entry?.file_name();
                let full_oid = format!("{}{}", dir_name, file_name.to_string_lossy());

                if full_oid.starts_with(&prefix)
                    && let Ok(oid) = ObjectId::try_parse(full_oid)
                {
                    matches.push(oid);
                }
            }
        }

        matches.sort();
        Ok(matches)
    }

    /// Resolve a full or abbreviated commit id
    ///
    /// Fails with `NoSuchCommit` when nothing (or only non-commits) match, and
    /// with `AmbiguousCommit` when several commits share the prefix.
    pub fn resolve_commit(&self, revision: &str) -> anyhow::Result<ObjectId> {
        let revision = revision.trim();
        if revision.len() < MIN_PREFIX_LENGTH || !revision.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(TwigError::NoSuchCommit.into());
        }

        let candidates = self
            .find_objects_by_prefix(revision)?
            .into_iter()
            .filter(|oid| matches!(self.get_object_type(oid), Ok(ObjectType::Commit)))
            .collect::<Vec<_>>();

        match candidates.as_slice() {
            [] => Err(TwigError::NoSuchCommit.into()),
            [oid] => Ok(oid.clone()),
            _ => Err(TwigError::AmbiguousCommit(revision.to_string()).into()),
        }
    }
}

/// Memoized slim commits for graph walks
///
/// Merge base finding visits the same commits several times; the cache keeps
/// each one parsed at most once per operation.
#[derive(Debug, Default)]
pub struct CommitCache {
    commits: RefCell<HashMap<ObjectId, SlimCommit>>,
}

impl CommitCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load_slim_commit(
        &self,
        database: &Database,
        oid: &ObjectId,
    ) -> anyhow::Result<SlimCommit> {
        if let Some(commit) = self.commits.borrow().get(oid) {
            return Ok(commit.clone());
        }

        let slim_commit = database.parse_object_as_commit(oid)?.to_slim(oid.clone());
        self.commits
            .borrow_mut()
            .insert(oid.clone(), slim_commit.clone());

        Ok(slim_commit)
    }
}
