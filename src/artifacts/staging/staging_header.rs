use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::staging::{SIGNATURE, VERSION};
use anyhow::anyhow;
use byteorder::{ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct StagingHeader {
    pub marker: String,
    pub version: u32,
    pub additions_count: u32,
    pub removals_count: u32,
}

impl StagingHeader {
    pub fn with_counts(additions_count: u32, removals_count: u32) -> Self {
        StagingHeader {
            marker: String::from(SIGNATURE),
            version: VERSION,
            additions_count,
            removals_count,
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.marker != SIGNATURE {
            return Err(anyhow!("Invalid staging file signature"));
        }

        if self.version != VERSION {
            return Err(anyhow!(
                "Unsupported staging file version: {}",
                self.version
            ));
        }

        Ok(())
    }
}

impl Packable for StagingHeader {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::new();
        bytes.write_all(self.marker.as_bytes())?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.version)?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.additions_count)?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.removals_count)?;

        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for StagingHeader {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut marker = [0u8; 4];
        reader
            .read_exact(&mut marker)
            .map_err(|_| anyhow!("Invalid staging header size"))?;
        let marker = String::from_utf8(marker.to_vec())
            .map_err(|_| anyhow!("Invalid marker in staging header"))?;

        let version = reader.read_u32::<byteorder::NetworkEndian>()?;
        let additions_count = reader.read_u32::<byteorder::NetworkEndian>()?;
        let removals_count = reader.read_u32::<byteorder::NetworkEndian>()?;

        Ok(StagingHeader {
            marker,
            version,
            additions_count,
            removals_count,
        })
    }
}
