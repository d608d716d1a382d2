use std::cell::RefCell;

use crate::cursor::{Cursor, Writer};
use crate::error::{Error, Result};
use crate::record::{DbcRecord, StringRef};
use crate::schema::{decode_row, encode_row};
use crate::string_block::StringBlock;
use crate::version::GameVersion;

/// Magic bytes for client database files.
const DBC_MAGIC: [u8; 4] = *b"WDBC";

/// Size of the on-disk header: magic + four u32 words.
pub const HEADER_SIZE: usize = 20;

/// Parsed database header. Describes the row array and string block sizes.
#[derive(Debug, Clone, Copy)]
pub struct DbcHeader {
    /// Number of records in the table.
    pub record_count: u32,
    /// Number of fields in each record.
    pub field_count: u32,
    /// Size in bytes of each record.
    pub record_size: u32,
    /// Size in bytes of the trailing string block.
    pub string_block_size: u32,
}

impl DbcHeader {
    /// Parse the header from the start of a database buffer.
    pub fn parse(c: &mut Cursor) -> Result<Self> {
        let magic = c.read_magic()?;
        if magic != DBC_MAGIC {
            return Err(Error::InvalidMagic {
                expected: DBC_MAGIC,
                found: magic,
            });
        }
        Ok(Self {
            record_count: c.read_u32()?,
            field_count: c.read_u32()?,
            record_size: c.read_u32()?,
            string_block_size: c.read_u32()?,
        })
    }

    pub fn write(&self, w: &mut Writer) {
        w.write_magic(&DBC_MAGIC);
        w.write_u32(self.record_count);
        w.write_u32(self.field_count);
        w.write_u32(self.record_size);
        w.write_u32(self.string_block_size);
    }
}

/// Typed random-access view over a client database buffer.
///
/// The header and string block are parsed eagerly at `open`; records are
/// decoded lazily on first access and cached per ordinal. Cache slots are
/// write-once and never evicted.
///
/// The cache has a single-writer precondition: this type is `!Sync` by
/// construction (interior `RefCell`), so concurrent index access from
/// multiple threads without external synchronization is a compile error
/// rather than undefined behavior. Callers wanting shared multi-threaded
/// reads should materialize all records first.
pub struct Dbc<T: DbcRecord> {
    version: GameVersion,
    header: DbcHeader,
    /// Raw database buffer, retained for lazy row decoding.
    data: Vec<u8>,
    strings: StringBlock,
    /// Lazy per-ordinal record cache; `None` marks an absent slot.
    records: RefCell<Vec<Option<T>>>,
}

impl<T: DbcRecord> Dbc<T> {
    /// Open a database over a fully buffered file.
    ///
    /// Validates the header magic, the string-block size identity
    /// (`string_block_size == len - header - rows`), and that `T`'s schema
    /// resolved under `version` agrees with the header's field count and
    /// record size. Fails eagerly on any disagreement; no rows are decoded.
    pub fn open(version: GameVersion, data: Vec<u8>) -> Result<Self> {
        let mut c = Cursor::new(&data);
        let header = DbcHeader::parse(&mut c)?;

        let table_size = header.record_count as usize * header.record_size as usize;
        let string_block_offset = HEADER_SIZE + table_size;
        if data.len() < string_block_offset {
            return Err(Error::UnexpectedEof {
                offset: HEADER_SIZE,
                need: table_size,
                have: data.len() - HEADER_SIZE,
            });
        }
        let actual_block = data.len() - string_block_offset;
        if actual_block != header.string_block_size as usize {
            return Err(Error::StringBlockSize {
                declared: header.string_block_size as usize,
                actual: actual_block,
            });
        }

        let schema = T::schema();
        let schema_fields = schema.field_count(version);
        if schema_fields != header.field_count as usize {
            return Err(Error::SchemaMismatch {
                what: "field count",
                expected: schema_fields,
                found: header.field_count as usize,
            });
        }
        let schema_row = schema.row_size(version);
        if schema_row != header.record_size as usize {
            return Err(Error::SchemaMismatch {
                what: "bytes per record",
                expected: schema_row,
                found: header.record_size as usize,
            });
        }

        let strings = StringBlock::parse(&data[string_block_offset..])?;

        let mut slots = Vec::new();
        slots.resize_with(header.record_count as usize, || None);

        Ok(Self {
            version,
            header,
            data,
            strings,
            records: RefCell::new(slots),
        })
    }

    /// Number of records in the table.
    pub fn count(&self) -> usize {
        self.header.record_count as usize
    }

    pub fn version(&self) -> GameVersion {
        self.version
    }

    pub fn header(&self) -> &DbcHeader {
        &self.header
    }

    /// The parsed string block.
    pub fn strings(&self) -> &StringBlock {
        &self.strings
    }

    /// Whether the record at `index` has been decoded and cached.
    pub fn is_cached(&self, index: usize) -> bool {
        self.records
            .borrow()
            .get(index)
            .is_some_and(|slot| slot.is_some())
    }

    /// Get the record at `index`, decoding and caching it on first access.
    ///
    /// A cached slot is returned as-is with no re-decode. A failed decode
    /// leaves the cache untouched.
    pub fn get(&self, index: usize) -> Result<&T> {
        if index >= self.count() {
            return Err(Error::IndexOutOfBounds {
                index,
                count: self.count(),
            });
        }
        if self.is_cached(index) {
            return Ok(self.cached(index));
        }

        let record_size = self.header.record_size as usize;
        let offset = HEADER_SIZE + index * record_size;
        let row_bytes = &self.data[offset..offset + record_size];

        let row = decode_row(row_bytes, T::schema(), self.version)?;
        let mut record = T::from_row(&row, self.version)?;
        for reference in record.string_refs_mut() {
            self.strings.resolve(reference);
        }

        self.cache_record(index, record)?;
        Ok(self.cached(index))
    }

    /// Look up a record by primary key.
    ///
    /// Linear scan in ordinal order, forcing decode of unseen ordinals until
    /// the key matches. `Ok(None)` when no record has the key. Repeated
    /// lookups are amortized by the cache, but a miss costs a full scan.
    pub fn get_by_id(&self, id: u32) -> Result<Option<&T>> {
        for index in 0..self.count() {
            let record = self.get(index)?;
            if record.id() == id {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    /// Resolve a string reference against the table's string block.
    /// A dangling offset resolves to the empty string; this never fails.
    pub fn resolve_string(&self, reference: &mut StringRef) {
        self.strings.resolve(reference);
    }

    /// Iterate all records in ordinal order, decoding as needed.
    pub fn iter(&self) -> impl Iterator<Item = Result<&T>> + '_ {
        (0..self.count()).map(move |i| self.get(i))
    }

    /// Serialize the table back to bytes: header, every row re-encoded via
    /// the schema, then the string block. Byte-identical to the input buffer
    /// for any table this crate can open.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let record_size = self.header.record_size as usize;
        let mut w = Writer::with_capacity(self.data.len());
        self.header.write(&mut w);

        for index in 0..self.count() {
            let record = self.get(index)?;
            let start = w.position();
            encode_row(&record.to_row(self.version), T::schema(), self.version, &mut w)?;
            let written = w.position() - start;
            if written != record_size {
                return Err(Error::RowLayout {
                    consumed: written,
                    record_size,
                });
            }
        }

        self.strings.write(&mut w);
        Ok(w.into_bytes())
    }

    /// Store a decoded record into its slot. Writes are single-shot: an
    /// already-populated slot is an invariant breach.
    fn cache_record(&self, index: usize, record: T) -> Result<()> {
        let mut records = self.records.borrow_mut();
        let slot = &mut records[index];
        if slot.is_some() {
            return Err(Error::SlotOccupied { index });
        }
        *slot = Some(record);
        Ok(())
    }

    /// Retrieve a cached record reference.
    fn cached(&self, index: usize) -> &T {
        let records = self.records.borrow();
        let record = records[index].as_ref().expect("record should be cached");
        let ptr = record as *const T;
        // SAFETY: The record lives in a slot vector owned by self. Slots are
        // write-once and never evicted, and the vector's length is fixed at
        // construction so its buffer never reallocates. Self is borrowed
        // immutably for the returned lifetime.
        unsafe { &*ptr }
    }
}

impl<T: DbcRecord> std::fmt::Debug for Dbc<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dbc")
            .field("version", &self.version)
            .field("records", &self.header.record_count)
            .field("strings", &self.strings.len())
            .finish()
    }
}
