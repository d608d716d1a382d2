//! Table-driven record schemas.
//!
//! A schema lists fields in on-disk order; each field carries one or more
//! layout rules keyed by a version range. Resolving a field against a
//! version yields the width/type that applies there (or nothing, if the
//! field is absent in that version). Decode and encode walk the same
//! resolved layout, so the two are exact inverses by construction.

use crate::cursor::{Cursor, Writer};
use crate::error::{Error, Result};
use crate::record::StringRef;
use crate::version::GameVersion;

/// On-disk type of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    UInt8,
    Int32,
    UInt32,
    UInt64,
    Float32,
    /// A 4-byte offset into the string block, decoded as an unresolved
    /// [`StringRef`].
    StringRef,
}

impl FieldType {
    /// Byte width consumed in a row.
    pub fn width(self) -> usize {
        match self {
            Self::UInt8 => 1,
            Self::Int32 | Self::UInt32 | Self::Float32 | Self::StringRef => 4,
            Self::UInt64 => 8,
        }
    }
}

/// Inclusive version range a layout rule applies to.
#[derive(Debug, Clone, Copy)]
pub struct VersionRange {
    pub since: GameVersion,
    /// Last version the rule applies to; `None` means open-ended.
    pub until: Option<GameVersion>,
}

impl VersionRange {
    pub const fn from(since: GameVersion) -> Self {
        Self { since, until: None }
    }

    pub const fn between(since: GameVersion, until: GameVersion) -> Self {
        Self {
            since,
            until: Some(until),
        }
    }

    pub fn contains(&self, version: GameVersion) -> bool {
        version >= self.since && self.until.map_or(true, |u| version <= u)
    }
}

/// One layout rule: within `versions`, the field is read/written as `ty`.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub versions: VersionRange,
    pub ty: FieldType,
}

/// A named field with its version-gated layout rules.
///
/// Rules are checked in order; the first match wins. A field with no
/// matching rule is absent in that version and consumes no bytes.
#[derive(Debug)]
pub struct FieldDef {
    pub name: &'static str,
    pub rules: &'static [FieldRule],
}

impl FieldDef {
    /// The type this field has under `version`, or `None` if absent.
    pub fn resolve(&self, version: GameVersion) -> Option<FieldType> {
        self.rules
            .iter()
            .find(|r| r.versions.contains(version))
            .map(|r| r.ty)
    }
}

/// Field layout for one record type, in declared on-disk order.
#[derive(Debug)]
pub struct RecordSchema {
    pub name: &'static str,
    pub fields: &'static [FieldDef],
}

impl RecordSchema {
    /// Number of fields present under `version`.
    pub fn field_count(&self, version: GameVersion) -> usize {
        self.fields
            .iter()
            .filter(|f| f.resolve(version).is_some())
            .count()
    }

    /// Total row width in bytes under `version`.
    pub fn row_size(&self, version: GameVersion) -> usize {
        self.fields
            .iter()
            .filter_map(|f| f.resolve(version))
            .map(FieldType::width)
            .sum()
    }
}

/// A decoded field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    UInt8(u8),
    Int32(i32),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    /// Unresolved string reference (raw offset; string data attached later).
    String(StringRef),
}

impl Value {
    fn kind(&self) -> &'static str {
        match self {
            Self::UInt8(_) => "u8",
            Self::Int32(_) => "i32",
            Self::UInt32(_) => "u32",
            Self::UInt64(_) => "u64",
            Self::Float32(_) => "f32",
            Self::String(_) => "string ref",
        }
    }
}

/// One decoded row: the values of every field present under the decode
/// version, in schema order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    fn get(&self, index: usize) -> Result<&Value> {
        self.values.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            count: self.values.len(),
        })
    }

    /// Unsigned integer at `index`, widened to u64 (accepts u8/u32/u64).
    pub fn get_uint(&self, index: usize) -> Result<u64> {
        match self.get(index)? {
            Value::UInt8(v) => Ok(u64::from(*v)),
            Value::UInt32(v) => Ok(u64::from(*v)),
            Value::UInt64(v) => Ok(*v),
            other => Err(Error::FieldKind {
                index,
                expected: "unsigned integer",
                found: other.kind(),
            }),
        }
    }

    pub fn get_u32(&self, index: usize) -> Result<u32> {
        match self.get(index)? {
            Value::UInt32(v) => Ok(*v),
            other => Err(Error::FieldKind {
                index,
                expected: "u32",
                found: other.kind(),
            }),
        }
    }

    pub fn get_i32(&self, index: usize) -> Result<i32> {
        match self.get(index)? {
            Value::Int32(v) => Ok(*v),
            other => Err(Error::FieldKind {
                index,
                expected: "i32",
                found: other.kind(),
            }),
        }
    }

    pub fn get_f32(&self, index: usize) -> Result<f32> {
        match self.get(index)? {
            Value::Float32(v) => Ok(*v),
            other => Err(Error::FieldKind {
                index,
                expected: "f32",
                found: other.kind(),
            }),
        }
    }

    pub fn get_string_ref(&self, index: usize) -> Result<&StringRef> {
        match self.get(index)? {
            Value::String(r) => Ok(r),
            other => Err(Error::FieldKind {
                index,
                expected: "string ref",
                found: other.kind(),
            }),
        }
    }
}

/// Decode one fixed-size row.
///
/// `bytes` must be exactly the row's on-disk bytes. Fields are consumed in
/// schema order using the version-resolved width of each; after the last
/// field the cursor must land exactly at the end of `bytes`, otherwise the
/// schema, version, and buffer disagree and the decode fails.
pub fn decode_row(bytes: &[u8], schema: &RecordSchema, version: GameVersion) -> Result<Row> {
    let mut c = Cursor::new(bytes);
    let mut row = Row::new();

    for field in schema.fields {
        let Some(ty) = field.resolve(version) else {
            continue;
        };
        let value = match ty {
            FieldType::UInt8 => Value::UInt8(c.read_u8()?),
            FieldType::Int32 => Value::Int32(c.read_i32()?),
            FieldType::UInt32 => Value::UInt32(c.read_u32()?),
            FieldType::UInt64 => Value::UInt64(c.read_u64()?),
            FieldType::Float32 => Value::Float32(c.read_f32()?),
            FieldType::StringRef => Value::String(StringRef::new(c.read_u32()?)),
        };
        row.push(value);
    }

    if !c.is_empty() {
        return Err(Error::RowLayout {
            consumed: c.position(),
            record_size: bytes.len(),
        });
    }
    Ok(row)
}

/// Encode one row, the exact inverse of [`decode_row`].
///
/// Values must match the version-resolved type of each present field, in
/// order; a count or kind mismatch means the row was not produced by this
/// schema/version pair.
pub fn encode_row(
    row: &Row,
    schema: &RecordSchema,
    version: GameVersion,
    w: &mut Writer,
) -> Result<()> {
    let mut index = 0;

    for field in schema.fields {
        let Some(ty) = field.resolve(version) else {
            continue;
        };
        let value = row.get(index)?;
        match (ty, value) {
            (FieldType::UInt8, Value::UInt8(v)) => w.write_u8(*v),
            (FieldType::Int32, Value::Int32(v)) => w.write_i32(*v),
            (FieldType::UInt32, Value::UInt32(v)) => w.write_u32(*v),
            (FieldType::UInt64, Value::UInt64(v)) => w.write_u64(*v),
            (FieldType::Float32, Value::Float32(v)) => w.write_f32(*v),
            (FieldType::StringRef, Value::String(r)) => w.write_u32(r.offset),
            (ty, value) => {
                return Err(Error::FieldKind {
                    index,
                    expected: match ty {
                        FieldType::UInt8 => "u8",
                        FieldType::Int32 => "i32",
                        FieldType::UInt32 => "u32",
                        FieldType::UInt64 => "u64",
                        FieldType::Float32 => "f32",
                        FieldType::StringRef => "string ref",
                    },
                    found: value.kind(),
                })
            }
        }
        index += 1;
    }

    if index != row.len() {
        return Err(Error::SchemaMismatch {
            what: "row values",
            expected: index,
            found: row.len(),
        });
    }
    Ok(())
}
