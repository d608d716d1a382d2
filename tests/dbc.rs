use std::sync::atomic::{AtomicUsize, Ordering};

use wowdata::cursor::Writer;
use wowdata::schema::{
    decode_row, FieldDef, FieldRule, FieldType, RecordSchema, Row, Value, VersionRange,
};
use wowdata::{Dbc, DbcRecord, Error, GameVersion, Result, StringRef};

// ── Fixture builders ─────────────────────────────────────────────────────────

/// Assemble a database buffer: WDBC header, rows of two u32 words
/// (id, string offset), then the raw string block.
fn build_map_dbc(rows: &[(u32, u32)], string_block: &[u8]) -> Vec<u8> {
    let mut w = Writer::new();
    w.write_magic(b"WDBC");
    w.write_u32(rows.len() as u32);
    w.write_u32(2); // field_count
    w.write_u32(8); // record_size
    w.write_u32(string_block.len() as u32);
    for (id, offset) in rows {
        w.write_u32(*id);
        w.write_u32(*offset);
    }
    w.write_bytes(string_block);
    w.into_bytes()
}

// ── Test record: id + one string field ───────────────────────────────────────

static MAP_SCHEMA: RecordSchema = RecordSchema {
    name: "MapEntry",
    fields: &[
        FieldDef {
            name: "id",
            rules: &[FieldRule {
                versions: VersionRange::from(GameVersion::CLASSIC),
                ty: FieldType::UInt32,
            }],
        },
        FieldDef {
            name: "directory",
            rules: &[FieldRule {
                versions: VersionRange::from(GameVersion::CLASSIC),
                ty: FieldType::StringRef,
            }],
        },
    ],
};

#[derive(Debug, Clone, PartialEq)]
struct MapEntry {
    id: u32,
    directory: StringRef,
}

impl DbcRecord for MapEntry {
    fn schema() -> &'static RecordSchema {
        &MAP_SCHEMA
    }

    fn from_row(row: &Row, _version: GameVersion) -> Result<Self> {
        Ok(Self {
            id: row.get_u32(0)?,
            directory: row.get_string_ref(1)?.clone(),
        })
    }

    fn to_row(&self, _version: GameVersion) -> Row {
        let mut row = Row::new();
        row.push(Value::UInt32(self.id));
        row.push(Value::String(self.directory.clone()));
        row
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn string_refs_mut(&mut self) -> Vec<&mut StringRef> {
        vec![&mut self.directory]
    }
}

// ── Record table scenarios ───────────────────────────────────────────────────

#[test]
fn resolves_string_references_per_row() {
    // String block: "" at offset 0, "Foo" at offset 1.
    let data = build_map_dbc(&[(101, 0), (102, 1)], b"\0Foo\0");
    let dbc = Dbc::<MapEntry>::open(GameVersion::CLASSIC, data).expect("open failed");

    assert_eq!(dbc.count(), 2);
    assert_eq!(dbc.get(0).unwrap().directory.value(), Some(""));
    assert_eq!(dbc.get(1).unwrap().directory.value(), Some("Foo"));

    let by_id = dbc.get_by_id(102).unwrap().expect("id 102 should exist");
    assert_eq!(by_id.id, 102);
    assert_eq!(by_id.directory.value(), Some("Foo"));

    assert!(dbc.get_by_id(999).unwrap().is_none());
}

#[test]
fn dangling_string_offset_resolves_to_empty() {
    // Offset 500 has no table entry; resolution must fall back to "".
    let data = build_map_dbc(&[(1, 500)], b"\0Foo\0");
    let dbc = Dbc::<MapEntry>::open(GameVersion::CLASSIC, data).expect("open failed");

    let record = dbc.get(0).unwrap();
    assert!(record.directory.is_resolved());
    assert_eq!(record.directory.value(), Some(""));
}

#[test]
fn ordinal_out_of_range_is_an_error() {
    let data = build_map_dbc(&[(1, 0)], b"\0");
    let dbc = Dbc::<MapEntry>::open(GameVersion::CLASSIC, data).expect("open failed");

    assert!(matches!(
        dbc.get(1),
        Err(Error::IndexOutOfBounds { index: 1, count: 1 })
    ));
    assert!(matches!(dbc.get(usize::MAX), Err(Error::IndexOutOfBounds { .. })));
}

#[test]
fn roundtrip_is_byte_identical() {
    let data = build_map_dbc(&[(7, 0), (8, 5), (9, 1)], b"\0Azeroth\0Kalimdor\0");
    let dbc = Dbc::<MapEntry>::open(GameVersion::CLASSIC, data.clone()).expect("open failed");

    assert_eq!(dbc.to_bytes().unwrap(), data);
}

#[test]
fn iter_visits_all_records_in_order() {
    let data = build_map_dbc(&[(3, 0), (1, 0), (2, 0)], b"\0");
    let dbc = Dbc::<MapEntry>::open(GameVersion::CLASSIC, data).expect("open failed");

    let ids: Vec<u32> = dbc.iter().map(|r| r.unwrap().id).collect();
    assert_eq!(ids, [3, 1, 2]);
}

// ── Open-time validation ─────────────────────────────────────────────────────

#[test]
fn rejects_bad_header_magic() {
    let mut data = build_map_dbc(&[(1, 0)], b"\0");
    data[..4].copy_from_slice(b"XDBC");

    assert!(matches!(
        Dbc::<MapEntry>::open(GameVersion::CLASSIC, data),
        Err(Error::InvalidMagic { .. })
    ));
}

#[test]
fn rejects_buffer_shorter_than_row_array() {
    let mut data = build_map_dbc(&[(1, 0), (2, 0)], b"\0");
    data.truncate(24); // header + half a row

    assert!(matches!(
        Dbc::<MapEntry>::open(GameVersion::CLASSIC, data),
        Err(Error::UnexpectedEof { .. })
    ));
}

#[test]
fn rejects_string_block_size_mismatch() {
    let mut data = build_map_dbc(&[(1, 0)], b"\0Foo\0");
    // Shrink the buffer without touching the declared block size.
    data.truncate(data.len() - 2);

    assert!(matches!(
        Dbc::<MapEntry>::open(GameVersion::CLASSIC, data),
        Err(Error::StringBlockSize {
            declared: 5,
            actual: 3
        })
    ));
}

#[test]
fn rejects_unterminated_string_block() {
    let mut data = build_map_dbc(&[(1, 0)], b"\0Foo\0");
    // Drop the final terminator and fix up the declared size so the block
    // scan is what fails.
    data.truncate(data.len() - 1);
    let len = 4u32.to_le_bytes();
    data[16..20].copy_from_slice(&len);

    assert!(matches!(
        Dbc::<MapEntry>::open(GameVersion::CLASSIC, data),
        Err(Error::UnterminatedString { offset: 1 })
    ));
}

#[test]
fn rejects_header_disagreeing_with_schema() {
    let mut data = build_map_dbc(&[(1, 0)], b"\0");
    // Claim three fields per record; MapEntry's schema has two.
    data[8..12].copy_from_slice(&3u32.to_le_bytes());

    assert!(matches!(
        Dbc::<MapEntry>::open(GameVersion::CLASSIC, data),
        Err(Error::SchemaMismatch {
            what: "field count",
            expected: 2,
            found: 3
        })
    ));
}

// ── Lazy cache behavior ──────────────────────────────────────────────────────

static PROBE_DECODES: AtomicUsize = AtomicUsize::new(0);

/// Same layout as `MapEntry`, but counts `from_row` calls. Used by exactly
/// one test so the counter is not shared across threads.
#[derive(Debug)]
struct ProbedEntry {
    id: u32,
    directory: StringRef,
}

impl DbcRecord for ProbedEntry {
    fn schema() -> &'static RecordSchema {
        &MAP_SCHEMA
    }

    fn from_row(row: &Row, _version: GameVersion) -> Result<Self> {
        PROBE_DECODES.fetch_add(1, Ordering::SeqCst);
        Ok(Self {
            id: row.get_u32(0)?,
            directory: row.get_string_ref(1)?.clone(),
        })
    }

    fn to_row(&self, _version: GameVersion) -> Row {
        let mut row = Row::new();
        row.push(Value::UInt32(self.id));
        row.push(Value::String(self.directory.clone()));
        row
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn string_refs_mut(&mut self) -> Vec<&mut StringRef> {
        vec![&mut self.directory]
    }
}

#[test]
fn second_access_hits_the_cache() {
    let data = build_map_dbc(&[(1, 0), (2, 0)], b"\0");
    let dbc = Dbc::<ProbedEntry>::open(GameVersion::CLASSIC, data).expect("open failed");

    assert!(!dbc.is_cached(0));
    let first = dbc.get(0).unwrap() as *const ProbedEntry;
    assert!(dbc.is_cached(0));
    assert_eq!(PROBE_DECODES.load(Ordering::SeqCst), 1);

    // Same instance, no re-decode.
    let second = dbc.get(0).unwrap() as *const ProbedEntry;
    assert_eq!(first, second);
    assert_eq!(PROBE_DECODES.load(Ordering::SeqCst), 1);

    // A different ordinal still decodes.
    dbc.get(1).unwrap();
    assert_eq!(PROBE_DECODES.load(Ordering::SeqCst), 2);
}

// ── Version-gated layouts ────────────────────────────────────────────────────

static BANNER_SCHEMA: RecordSchema = RecordSchema {
    name: "BannerEntry",
    fields: &[
        FieldDef {
            name: "id",
            rules: &[FieldRule {
                versions: VersionRange::from(GameVersion::CLASSIC),
                ty: FieldType::UInt32,
            }],
        },
        FieldDef {
            // Widened from 4 to 8 bytes in 2.x.
            name: "flags",
            rules: &[
                FieldRule {
                    versions: VersionRange::between(GameVersion::CLASSIC, GameVersion::CLASSIC),
                    ty: FieldType::UInt32,
                },
                FieldRule {
                    versions: VersionRange::from(GameVersion::BURNING_CRUSADE),
                    ty: FieldType::UInt64,
                },
            ],
        },
        FieldDef {
            // Introduced in 2.x; absent before.
            name: "title",
            rules: &[FieldRule {
                versions: VersionRange::from(GameVersion::BURNING_CRUSADE),
                ty: FieldType::StringRef,
            }],
        },
    ],
};

#[derive(Debug)]
struct BannerEntry {
    id: u32,
    flags: u64,
    title: Option<StringRef>,
}

impl DbcRecord for BannerEntry {
    fn schema() -> &'static RecordSchema {
        &BANNER_SCHEMA
    }

    fn from_row(row: &Row, version: GameVersion) -> Result<Self> {
        let title = if version >= GameVersion::BURNING_CRUSADE {
            Some(row.get_string_ref(2)?.clone())
        } else {
            None
        };
        Ok(Self {
            id: row.get_u32(0)?,
            flags: row.get_uint(1)?,
            title,
        })
    }

    fn to_row(&self, version: GameVersion) -> Row {
        let mut row = Row::new();
        row.push(Value::UInt32(self.id));
        if version >= GameVersion::BURNING_CRUSADE {
            row.push(Value::UInt64(self.flags));
            row.push(Value::String(
                self.title.clone().unwrap_or_else(|| StringRef::new(0)),
            ));
        } else {
            row.push(Value::UInt32(self.flags as u32));
        }
        row
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn string_refs_mut(&mut self) -> Vec<&mut StringRef> {
        self.title.as_mut().into_iter().collect()
    }
}

fn build_banner_dbc(version: GameVersion, string_block: &[u8]) -> Vec<u8> {
    let mut w = Writer::new();
    w.write_magic(b"WDBC");
    w.write_u32(1);
    if version >= GameVersion::BURNING_CRUSADE {
        w.write_u32(3); // id, flags, title
        w.write_u32(16); // 4 + 8 + 4
    } else {
        w.write_u32(2); // id, flags
        w.write_u32(8); // 4 + 4
    }
    w.write_u32(string_block.len() as u32);

    w.write_u32(42);
    if version >= GameVersion::BURNING_CRUSADE {
        w.write_u64(0x1_0000_0001);
        w.write_u32(1); // title -> "Foo"
    } else {
        w.write_u32(0xBEEF);
    }
    w.write_bytes(string_block);
    w.into_bytes()
}

#[test]
fn classic_layout_skips_absent_field_and_narrow_flags() {
    let data = build_banner_dbc(GameVersion::CLASSIC, b"\0Foo\0");
    let dbc = Dbc::<BannerEntry>::open(GameVersion::CLASSIC, data.clone()).expect("open failed");

    let record = dbc.get(0).unwrap();
    assert_eq!(record.id, 42);
    assert_eq!(record.flags, 0xBEEF);
    assert!(record.title.is_none());

    assert_eq!(dbc.to_bytes().unwrap(), data);
}

#[test]
fn expansion_layout_widens_flags_and_adds_title() {
    let data = build_banner_dbc(GameVersion::BURNING_CRUSADE, b"\0Foo\0");
    let dbc =
        Dbc::<BannerEntry>::open(GameVersion::BURNING_CRUSADE, data.clone()).expect("open failed");

    let record = dbc.get(0).unwrap();
    assert_eq!(record.flags, 0x1_0000_0001);
    assert_eq!(record.title.as_ref().unwrap().value(), Some("Foo"));

    assert_eq!(dbc.to_bytes().unwrap(), data);
}

#[test]
fn row_decode_must_land_exactly_on_record_size() {
    // 12 bytes against an 8-byte classic layout: 4 bytes left over.
    let bytes = [0u8; 12];
    assert!(matches!(
        decode_row(&bytes, &BANNER_SCHEMA, GameVersion::CLASSIC),
        Err(Error::RowLayout {
            consumed: 8,
            record_size: 12
        })
    ));
}
