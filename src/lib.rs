//! Reader/writer for Warcraft client data formats.
//!
//! Two related binary containers, three layers:
//! - **Layer 1** (`cursor`/`chunk`): raw little-endian I/O and the
//!   signature + size chunk envelope
//! - **Layer 2** (`schema`/`string_block`/`chunks`): typed codecs —
//!   version-gated row decoding and individual chunk formats
//! - **Layer 3** (`dbc`/`wdt`): high-level views — the lazy record-table
//!   accessor and the world-table document

pub mod chunk;
pub mod chunks;
pub mod cursor;
pub mod dbc;
pub mod error;
pub mod record;
pub mod schema;
pub mod string_block;
pub mod types;
pub mod version;
pub mod wdt;

pub use chunk::{read_chunk, write_chunk, IffChunk};
pub use dbc::{Dbc, DbcHeader};
pub use error::{Error, Result};
pub use record::{DbcRecord, StringRef};
pub use string_block::StringBlock;
pub use version::GameVersion;
pub use wdt::WorldTable;
