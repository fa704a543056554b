use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;
use std::path::PathBuf;

pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        let mut hasher = Sha1::new();
        hasher.update(&content);

        let oid = hasher.finalize();
        ObjectId::try_parse(format!("{oid:x}"))
    }

    fn object_path(&self) -> Result<PathBuf> {
        Ok(self.object_id()?.to_path())
    }
}

/// Wrap a serialized body into the `<type> <size>\0<body>` envelope
pub(crate) fn envelope(object_type: ObjectType, body: &[u8]) -> Bytes {
    let header = format!("{} {}\0", object_type.as_str(), body.len());

    let mut object_bytes = Vec::with_capacity(header.len() + body.len());
    object_bytes.extend_from_slice(header.as_bytes());
    object_bytes.extend_from_slice(body);

    Bytes::from(object_bytes)
}
