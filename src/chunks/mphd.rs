use crate::chunk::IffChunk;
use crate::cursor::{Cursor, Writer};
use crate::error::{Error, Result};

/// Flag bit: the world uses a single global model instead of terrain tiles.
pub const WORLD_FLAG_USES_GLOBAL_MODELS: u32 = 0x1;

/// MPHD chunk: world table header.
///
/// Fixed 32-byte payload: a flag word, one data word, and six unused words
/// that round-trip verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorldTableHeader {
    pub flags: u32,
    pub something: u32,
    pub unused: [u32; 6],
}

impl WorldTableHeader {
    pub const SIZE: usize = 32;

    /// Whether the world consists of a single global model (no terrain).
    pub fn uses_global_models(&self) -> bool {
        self.flags & WORLD_FLAG_USES_GLOBAL_MODELS != 0
    }
}

impl IffChunk for WorldTableHeader {
    const SIGNATURE: [u8; 4] = *b"MPHD";

    fn decode(payload: &[u8]) -> Result<Self> {
        if payload.len() != Self::SIZE {
            return Err(Error::WrongChunkSize {
                signature: Self::SIGNATURE,
                len: payload.len(),
                expected: Self::SIZE,
            });
        }
        let mut c = Cursor::new(payload);
        let flags = c.read_u32()?;
        let something = c.read_u32()?;
        let mut unused = [0u32; 6];
        for slot in &mut unused {
            *slot = c.read_u32()?;
        }
        Ok(Self {
            flags,
            something,
            unused,
        })
    }

    fn encode_payload(&self, w: &mut Writer) {
        w.write_u32(self.flags);
        w.write_u32(self.something);
        for word in self.unused {
            w.write_u32(word);
        }
    }
}
