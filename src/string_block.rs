use std::collections::HashMap;

use crate::cursor::{Cursor, Writer};
use crate::error::Result;
use crate::record::StringRef;

/// The trailing string pool of a record table.
///
/// A sequence of null-terminated strings, keyed by byte offset relative to
/// the block's start (the same relative scheme record fields encode).
/// Built once at table open; immutable afterwards. Offsets are unique by
/// construction since each is a scan start position.
#[derive(Debug)]
pub struct StringBlock {
    /// Strings in scan order with their relative offsets.
    entries: Vec<(u32, String)>,
    /// Offset lookup into `entries`.
    by_offset: HashMap<u32, usize>,
}

impl StringBlock {
    /// Scan `data` (the raw string block) into an offset-keyed table.
    ///
    /// Splits on null terminators until the scan position reaches the end of
    /// `data` exactly; a trailing run without a terminator is a malformed
    /// block.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut c = Cursor::new(data);
        let mut entries = Vec::new();
        let mut by_offset = HashMap::new();

        while !c.is_empty() {
            let offset = c.position() as u32;
            let s = c.read_cstring()?;
            by_offset.insert(offset, entries.len());
            entries.push((offset, s));
        }

        Ok(Self { entries, by_offset })
    }

    /// Number of strings in the block.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a string by its relative offset.
    pub fn get(&self, offset: u32) -> Option<&str> {
        self.by_offset
            .get(&offset)
            .map(|&i| self.entries[i].1.as_str())
    }

    /// Resolve a string reference in place.
    ///
    /// A dangling offset resolves to the empty string; this never fails.
    pub fn resolve(&self, reference: &mut StringRef) {
        let value = self.get(reference.offset).unwrap_or("").to_owned();
        reference.set_value(value);
    }

    /// Serialized size in bytes.
    pub fn byte_size(&self) -> usize {
        self.entries.iter().map(|(_, s)| s.len() + 1).sum()
    }

    /// Re-emit the block byte-for-byte as scanned.
    pub fn write(&self, w: &mut Writer) {
        for (_, s) in &self.entries {
            w.write_cstring(s);
        }
    }
}
