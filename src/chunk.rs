use crate::cursor::{Cursor, Writer};
use crate::error::{Error, Result};

/// One signature-tagged, length-delimited binary unit.
///
/// On disk a chunk is a 4-byte ASCII signature, a u32 payload size, then the
/// payload. Decode and encode are exact inverses: the signature emitted on
/// encode is the signature consumed on decode, and any payload produced by
/// `encode_payload` must decode back to an equal value.
pub trait IffChunk: Sized {
    /// The chunk's 4-byte signature, used for dispatch and validation.
    const SIGNATURE: [u8; 4];

    /// Decode the chunk from its raw payload (signature and size already
    /// consumed).
    fn decode(payload: &[u8]) -> Result<Self>;

    /// Append the raw payload (no signature or size) to `w`.
    fn encode_payload(&self, w: &mut Writer);
}

/// Read one chunk of the expected type at the cursor position.
///
/// Fails with a signature mismatch if the tag at the cursor is not
/// `T::SIGNATURE`, and with EOF if the declared payload overruns the buffer.
pub fn read_chunk<T: IffChunk>(c: &mut Cursor) -> Result<T> {
    let offset = c.position();
    let signature = c.read_magic()?;
    if signature != T::SIGNATURE {
        return Err(Error::SignatureMismatch {
            offset,
            expected: T::SIGNATURE,
            found: signature,
        });
    }
    let size = c.read_u32()? as usize;
    let payload = c.read_bytes(size)?;
    T::decode(payload)
}

/// Write one chunk: signature, backpatched payload size, payload.
pub fn write_chunk<T: IffChunk>(w: &mut Writer, chunk: &T) {
    w.write_magic(&T::SIGNATURE);
    let size_pos = w.position();
    w.write_u32(0);
    let start = w.position();
    chunk.encode_payload(w);
    w.patch_u32(size_pos, (w.position() - start) as u32);
}
