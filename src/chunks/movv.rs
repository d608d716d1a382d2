use crate::chunk::IffChunk;
use crate::cursor::{Cursor, Writer};
use crate::error::{Error, Result};
use crate::types::Vec3;

/// MOVV chunk: visibility test vertices, a bare vertex list at a fixed
/// 12-byte stride. The minimal shape a fixed-stride leaf chunk takes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisibleVertices {
    pub vertices: Vec<Vec3>,
}

impl VisibleVertices {
    pub const STRIDE: usize = 12;
}

impl IffChunk for VisibleVertices {
    const SIGNATURE: [u8; 4] = *b"MOVV";

    fn decode(payload: &[u8]) -> Result<Self> {
        if payload.len() % Self::STRIDE != 0 {
            return Err(Error::MisalignedPayload {
                signature: Self::SIGNATURE,
                len: payload.len(),
                stride: Self::STRIDE,
            });
        }
        let count = payload.len() / Self::STRIDE;
        let mut c = Cursor::new(payload);
        let mut vertices = Vec::with_capacity(count);
        for _ in 0..count {
            vertices.push(Vec3::read(&mut c)?);
        }
        Ok(Self { vertices })
    }

    fn encode_payload(&self, w: &mut Writer) {
        for vertex in &self.vertices {
            vertex.write(w);
        }
    }
}
