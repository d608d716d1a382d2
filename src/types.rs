use crate::cursor::{Cursor, Writer};
use crate::error::Result;

/// A 3-component float vector (12 bytes on disk).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn read(c: &mut Cursor) -> Result<Self> {
        Ok(Self {
            x: c.read_f32()?,
            y: c.read_f32()?,
            z: c.read_f32()?,
        })
    }

    pub fn write(&self, w: &mut Writer) {
        w.write_f32(self.x);
        w.write_f32(self.y);
        w.write_f32(self.z);
    }
}

/// An axis-aligned bounding box (24 bytes on disk).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub fn read(c: &mut Cursor) -> Result<Self> {
        Ok(Self {
            min: Vec3::read(c)?,
            max: Vec3::read(c)?,
        })
    }

    pub fn write(&self, w: &mut Writer) {
        self.min.write(w);
        self.max.write(w);
    }
}
