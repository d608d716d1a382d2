use crate::error::Result;
use crate::schema::{RecordSchema, Row};
use crate::version::GameVersion;

/// A reference into a database's trailing string block.
///
/// Records store string fields as byte offsets relative to the string block's
/// start. A freshly decoded reference is unresolved: it carries only the
/// offset. The table accessor resolves it against the string block before the
/// record is handed out; resolution never fails (a dangling offset yields the
/// empty string, since missing strings are common in partial data).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StringRef {
    /// Byte offset relative to the string block start.
    pub offset: u32,
    value: Option<String>,
}

impl StringRef {
    pub fn new(offset: u32) -> Self {
        Self {
            offset,
            value: None,
        }
    }

    /// Whether the reference has been resolved against a string block.
    pub fn is_resolved(&self) -> bool {
        self.value.is_some()
    }

    /// The resolved string, or `None` if not yet resolved.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub(crate) fn set_value(&mut self, value: String) {
        self.value = Some(value);
    }
}

/// Capability contract for a typed database record.
///
/// Concrete record layouts live outside this crate; a record type declares
/// its on-disk schema as data and converts between the generic decoded `Row`
/// and its typed form. The table accessor drives decode, string resolution,
/// and caching through this trait.
pub trait DbcRecord: Sized {
    /// The on-disk field schema, with version-gated layout rules.
    fn schema() -> &'static RecordSchema;

    /// Build the typed record from a decoded row.
    fn from_row(row: &Row, version: GameVersion) -> Result<Self>;

    /// Convert back into a row using the same version-resolved layout.
    fn to_row(&self, version: GameVersion) -> Row;

    /// Primary key.
    fn id(&self) -> u32;

    /// Mutable access to the record's string references, for resolution
    /// against the string block. Records without string fields keep the
    /// default.
    fn string_refs_mut(&mut self) -> Vec<&mut StringRef> {
        Vec::new()
    }
}
