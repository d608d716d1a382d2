use crate::chunk::IffChunk;
use crate::cursor::{Cursor, Writer};
use crate::error::{Error, Result};

/// MVER chunk: file format revision.
///
/// Anchor chunk with a statically known payload: exactly one u32.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainVersion {
    pub version: u32,
}

impl TerrainVersion {
    pub const fn new(version: u32) -> Self {
        Self { version }
    }
}

impl IffChunk for TerrainVersion {
    const SIGNATURE: [u8; 4] = *b"MVER";

    fn decode(payload: &[u8]) -> Result<Self> {
        if payload.len() != 4 {
            return Err(Error::WrongChunkSize {
                signature: Self::SIGNATURE,
                len: payload.len(),
                expected: 4,
            });
        }
        let mut c = Cursor::new(payload);
        Ok(Self {
            version: c.read_u32()?,
        })
    }

    fn encode_payload(&self, w: &mut Writer) {
        w.write_u32(self.version);
    }
}
