use crate::chunk::IffChunk;
use crate::cursor::{Cursor, Writer};
use crate::error::{Error, Result};

/// Tiles per side of the world grid.
pub const TILE_DIM: usize = 64;

/// Flag bit: the tile has terrain data on disk.
pub const AREA_FLAG_HAS_TERRAIN: u32 = 0x1;
/// Flag bit: the tile is currently loaded (only ever set by a running game).
pub const AREA_FLAG_IS_LOADED: u32 = 0x2;

/// One tile entry in the MAIN chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AreaInfoEntry {
    pub flags: u32,
    pub async_id: u32,
}

impl AreaInfoEntry {
    pub const SIZE: usize = 8;

    pub fn has_terrain(&self) -> bool {
        self.flags & AREA_FLAG_HAS_TERRAIN != 0
    }

    pub fn is_loaded(&self) -> bool {
        self.flags & AREA_FLAG_IS_LOADED != 0
    }
}

/// MAIN chunk: the 64×64 tile grid, exactly 4096 entries in row-major order
/// (y major, x minor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaInfo {
    pub entries: Vec<AreaInfoEntry>,
}

impl AreaInfo {
    /// Entry for the tile at 0-based grid coordinates.
    pub fn entry(&self, tile_x: usize, tile_y: usize) -> Option<&AreaInfoEntry> {
        if tile_x >= TILE_DIM || tile_y >= TILE_DIM {
            return None;
        }
        self.entries.get(tile_y * TILE_DIM + tile_x)
    }
}

impl Default for AreaInfo {
    fn default() -> Self {
        Self {
            entries: vec![AreaInfoEntry::default(); TILE_DIM * TILE_DIM],
        }
    }
}

impl IffChunk for AreaInfo {
    const SIGNATURE: [u8; 4] = *b"MAIN";

    fn decode(payload: &[u8]) -> Result<Self> {
        let expected = TILE_DIM * TILE_DIM * AreaInfoEntry::SIZE;
        if payload.len() != expected {
            return Err(Error::WrongChunkSize {
                signature: Self::SIGNATURE,
                len: payload.len(),
                expected,
            });
        }
        let mut c = Cursor::new(payload);
        let mut entries = Vec::with_capacity(TILE_DIM * TILE_DIM);
        for _ in 0..TILE_DIM * TILE_DIM {
            entries.push(AreaInfoEntry {
                flags: c.read_u32()?,
                async_id: c.read_u32()?,
            });
        }
        Ok(Self { entries })
    }

    fn encode_payload(&self, w: &mut Writer) {
        for entry in &self.entries {
            w.write_u32(entry.flags);
            w.write_u32(entry.async_id);
        }
    }
}
