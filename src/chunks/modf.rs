use crate::chunk::IffChunk;
use crate::cursor::{Cursor, Writer};
use crate::error::{Error, Result};
use crate::types::{BoundingBox, Vec3};

/// One model placement (64 bytes on disk).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModelPlacementEntry {
    /// Index into the model name list (MWMO).
    pub name_id: u32,
    /// Unique placement ID.
    pub unique_id: u32,
    pub position: Vec3,
    pub rotation: Vec3,
    pub bounds: BoundingBox,
    pub flags: u16,
    pub doodad_set: u16,
    pub name_set: u16,
    /// Uniform scale, 1024 = 1.0.
    pub scale: u16,
}

impl ModelPlacementEntry {
    pub const SIZE: usize = 64;

    fn read(c: &mut Cursor) -> Result<Self> {
        Ok(Self {
            name_id: c.read_u32()?,
            unique_id: c.read_u32()?,
            position: Vec3::read(c)?,
            rotation: Vec3::read(c)?,
            bounds: BoundingBox::read(c)?,
            flags: c.read_u16()?,
            doodad_set: c.read_u16()?,
            name_set: c.read_u16()?,
            scale: c.read_u16()?,
        })
    }

    fn write(&self, w: &mut Writer) {
        w.write_u32(self.name_id);
        w.write_u32(self.unique_id);
        self.position.write(w);
        self.rotation.write(w);
        self.bounds.write(w);
        w.write_u16(self.flags);
        w.write_u16(self.doodad_set);
        w.write_u16(self.name_set);
        w.write_u16(self.scale);
    }
}

/// MODF chunk: model placement list at a fixed 64-byte stride.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelPlacementInfo {
    pub entries: Vec<ModelPlacementEntry>,
}

impl IffChunk for ModelPlacementInfo {
    const SIGNATURE: [u8; 4] = *b"MODF";

    fn decode(payload: &[u8]) -> Result<Self> {
        if payload.len() % ModelPlacementEntry::SIZE != 0 {
            return Err(Error::MisalignedPayload {
                signature: Self::SIGNATURE,
                len: payload.len(),
                stride: ModelPlacementEntry::SIZE,
            });
        }
        let count = payload.len() / ModelPlacementEntry::SIZE;
        let mut c = Cursor::new(payload);
        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            entries.push(ModelPlacementEntry::read(&mut c)?);
        }
        Ok(Self { entries })
    }

    fn encode_payload(&self, w: &mut Writer) {
        for entry in &self.entries {
            entry.write(w);
        }
    }
}
