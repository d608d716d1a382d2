use crate::chunk::IffChunk;
use crate::cursor::{Cursor, Writer};
use crate::error::Result;

/// MWMO chunk: global model object filenames.
///
/// A run of null-terminated strings; an empty payload is a valid empty list.
/// Whether this list is empty decides if the placement chunk follows in the
/// world table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModelObjectNames {
    pub filenames: Vec<String>,
}

impl IffChunk for ModelObjectNames {
    const SIGNATURE: [u8; 4] = *b"MWMO";

    fn decode(payload: &[u8]) -> Result<Self> {
        let mut c = Cursor::new(payload);
        let mut filenames = Vec::new();
        while !c.is_empty() {
            filenames.push(c.read_cstring()?);
        }
        Ok(Self { filenames })
    }

    fn encode_payload(&self, w: &mut Writer) {
        for name in &self.filenames {
            w.write_cstring(name);
        }
    }
}
