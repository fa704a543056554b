//! Commit object
//!
//! Commits are immutable snapshots of every tracked file. They contain:
//! - Parent commit ID(s) (none for the root commit, two for merge commits)
//! - A timestamp
//! - The snapshot: tracked path -> blob ID
//! - The commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! timestamp <unix-seconds> <timezone>
//! file <blob-sha> <path>
//!
//! <commit message>
//! ```
//!
//! Snapshot lines are written in lexicographic path order, so the same logical
//! commit always hashes to the same ID.

use crate::artifacts::objects::object::{Object, Packable, Unpackable, envelope};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Environment variable pinning the timestamp of new commits
pub const COMMIT_DATE_ENV: &str = "TWIG_COMMIT_DATE";

/// Message of the root commit written by `init`
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Mapping from tracked path to blob ID, as recorded in a commit
pub type Snapshot = BTreeMap<PathBuf, ObjectId>;

/// Point in time a commit was recorded, with the timezone it was recorded in
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct CommitTime(DateTime<FixedOffset>);

impl CommitTime {
    pub fn new(timestamp: DateTime<FixedOffset>) -> Self {
        CommitTime(timestamp)
    }

    pub fn now() -> Self {
        CommitTime(chrono::Local::now().fixed_offset())
    }

    /// The Unix epoch in UTC, used for the root commit
    pub fn epoch() -> Self {
        CommitTime(DateTime::<chrono::Utc>::UNIX_EPOCH.fixed_offset())
    }

    /// Read the commit timestamp from `TWIG_COMMIT_DATE`, falling back to now
    ///
    /// Accepts RFC 2822 dates and `%Y-%m-%d %H:%M:%S %z`.
    pub fn load_from_env() -> Self {
        std::env::var(COMMIT_DATE_ENV)
            .ok()
            .and_then(|date_str| {
                DateTime::parse_from_rfc2822(&date_str)
                    .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                    .ok()
            })
            .map(CommitTime)
            .unwrap_or_else(Self::now)
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Thu Jan 1 00:00:00 1970 +0000"
    pub fn readable(&self) -> String {
        self.0.format("%a %b %-d %H:%M:%S %Y %z").to_string()
    }

    /// Canonical form stored in the commit: "seconds timezone"
    pub fn display(&self) -> String {
        format!("{} {}", self.0.timestamp(), self.0.format("%z"))
    }

    pub fn inner(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

impl PartialOrd for CommitTime {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CommitTime {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl TryFrom<&str> for CommitTime {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let (seconds, timezone) = value
            .split_once(' ')
            .ok_or_else(|| anyhow::anyhow!("Invalid timestamp format: {value}"))?;

        let seconds = seconds
            .parse::<i64>()
            .map_err(|_| anyhow::anyhow!("Invalid timestamp: {seconds}"))?;

        if timezone.len() != 5 || !timezone.is_ascii() {
            anyhow::bail!("Invalid timezone: {timezone}");
        }
        let sign = match &timezone[..1] {
            "+" => 1,
            "-" => -1,
            _ => anyhow::bail!("Invalid timezone sign: {timezone}"),
        };
        let hours = timezone[1..3].parse::<i32>()?;
        let minutes = timezone[3..5].parse::<i32>()?;
        let offset = FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .ok_or_else(|| anyhow::anyhow!("Invalid timezone offset: {timezone}"))?;

        let datetime = DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| anyhow::anyhow!("Timestamp out of range: {seconds}"))?
            .with_timezone(&offset);

        Ok(CommitTime(datetime))
    }
}

/// Slim representation of a commit
///
/// Contains only what graph walks need, so merge base finding does not have to
/// carry whole snapshots around.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    pub oid: ObjectId,
    pub parents: Vec<ObjectId>,
    pub timestamp: CommitTime,
}

/// Commit object
///
/// The parent list holds the first parent (the branch the commit was made on)
/// followed by the second parent for merge commits.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    parents: Vec<ObjectId>,
    timestamp: CommitTime,
    snapshot: Snapshot,
    message: String,
}

impl Commit {
    pub fn new(
        parents: Vec<ObjectId>,
        snapshot: Snapshot,
        timestamp: CommitTime,
        message: String,
    ) -> Self {
        Commit {
            parents,
            timestamp,
            snapshot,
            message,
        }
    }

    /// The unique root of every history: no parents, nothing tracked
    pub fn root() -> Self {
        Commit::new(
            Vec::new(),
            Snapshot::new(),
            CommitTime::epoch(),
            ROOT_COMMIT_MESSAGE.to_string(),
        )
    }

    /// Get the first line of the commit message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn second_parent(&self) -> Option<&ObjectId> {
        self.parents.get(1)
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn timestamp(&self) -> CommitTime {
        self.timestamp
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn into_snapshot(self) -> Snapshot {
        self.snapshot
    }

    /// Blob tracked under `path`, if any
    pub fn tracked(&self, path: &Path) -> Option<&ObjectId> {
        self.snapshot.get(path)
    }

    pub fn to_slim(&self, oid: ObjectId) -> SlimCommit {
        SlimCommit {
            oid,
            parents: self.parents.clone(),
            timestamp: self.timestamp,
        }
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut lines = vec![];

        for parent in &self.parents {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        lines.push(format!("timestamp {}", self.timestamp.display()));
        // Path ordering is per component, the encoding wants plain string order
        let mut entries = self
            .snapshot
            .iter()
            .map(|(path, oid)| {
                path.to_str()
                    .map(|path| (path, oid))
                    .ok_or_else(|| anyhow::anyhow!("Invalid path in snapshot: {path:?}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        entries.sort_unstable_by_key(|(path, _)| *path);

        for (path, oid) in entries {
            if path.contains('\n') {
                anyhow::bail!("Tracked paths cannot contain newlines: {path:?}");
            }
            lines.push(format!("file {} {}", oid.as_ref(), path));
        }
        lines.push(String::new());
        lines.push(self.message.to_string());

        Ok(envelope(self.object_type(), lines.join("\n").as_bytes()))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let content = String::from_utf8(content)?;
        let mut lines = content.split('\n');

        let mut parents = Vec::new();
        let mut next_line = lines
            .next()
            .context("Invalid commit object: missing timestamp line")?;

        while let Some(parent_oid) = next_line.strip_prefix("parent ") {
            parents.push(ObjectId::try_parse(parent_oid.to_string())?);

            next_line = lines
                .next()
                .context("Invalid commit object: missing timestamp line")?;
        }

        let timestamp = next_line
            .strip_prefix("timestamp ")
            .context("Invalid commit object: invalid timestamp line")?;
        let timestamp = CommitTime::try_from(timestamp)?;

        let mut snapshot = Snapshot::new();
        loop {
            let line = lines
                .next()
                .context("Invalid commit object: missing message separator")?;
            if line.is_empty() {
                break;
            }

            let entry = line
                .strip_prefix("file ")
                .context("Invalid commit object: invalid file line")?;
            let (oid, path) = entry
                .split_once(' ')
                .context("Invalid commit object: invalid file entry")?;
            snapshot.insert(PathBuf::from(path), ObjectId::try_parse(oid.to_string())?);
        }

        let message = lines.collect::<Vec<&str>>().join("\n");
        Ok(Self::new(parents, snapshot, timestamp, message))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
