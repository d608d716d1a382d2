use thiserror::Error;

/// Error taxonomy.
///
/// Malformed-input conditions (truncation, bad magic, signature mismatch,
/// stride/layout disagreements) are detected eagerly at the point of failure.
/// `IndexOutOfBounds` covers ordinal access outside `[0, count)`.
/// `SlotOccupied` is an internal invariant breach: a second write into an
/// already-populated cache slot, unreachable under the documented
/// single-writer precondition.
///
/// A primary-key lookup with no match is *not* an error; `Dbc::get_by_id`
/// returns `Ok(None)` for that case.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid magic: expected {expected:?}, found {found:?}")]
    InvalidMagic { expected: [u8; 4], found: [u8; 4] },

    #[error("unexpected end of data at offset {offset:#x} (need {need} bytes, have {have})")]
    UnexpectedEof {
        offset: usize,
        need: usize,
        have: usize,
    },

    #[error("chunk signature mismatch at offset {offset:#x}: expected {expected:?}, found {found:?}")]
    SignatureMismatch {
        offset: usize,
        expected: [u8; 4],
        found: [u8; 4],
    },

    #[error("chunk {signature:?} payload is {len} bytes, expected exactly {expected}")]
    WrongChunkSize {
        signature: [u8; 4],
        len: usize,
        expected: usize,
    },

    #[error("chunk {signature:?} payload length {len} is not a multiple of element stride {stride}")]
    MisalignedPayload {
        signature: [u8; 4],
        len: usize,
        stride: usize,
    },

    #[error("unterminated string run starting at offset {offset:#x}")]
    UnterminatedString { offset: usize },

    #[error("string at offset {offset:#x} is not valid UTF-8: {source}")]
    InvalidString {
        offset: usize,
        source: std::string::FromUtf8Error,
    },

    #[error("string block size mismatch: header declares {declared} bytes, buffer holds {actual}")]
    StringBlockSize { declared: usize, actual: usize },

    #[error("row layout mismatch: consumed {consumed} of {record_size} bytes")]
    RowLayout { consumed: usize, record_size: usize },

    #[error("layout disagreement over {what}: schema resolves {expected}, found {found}")]
    SchemaMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("record field {index} is {found}, expected {expected}")]
    FieldKind {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("record ordinal {index} out of range (count {count})")]
    IndexOutOfBounds { index: usize, count: usize },

    #[error("record cache slot {index} already populated")]
    SlotOccupied { index: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
