/// Client version a database or terrain file was built for.
///
/// Field layouts in the client databases shift across expansions: fields
/// appear, disappear, or change width. The version is supplied by the caller
/// (detection is out of scope here) and gates which layout rule applies to
/// each schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GameVersion(pub u8);

impl GameVersion {
    /// Original release (1.x).
    pub const CLASSIC: Self = Self(1);
    /// The Burning Crusade (2.x).
    pub const BURNING_CRUSADE: Self = Self(2);
    /// Wrath of the Lich King (3.x).
    pub const WRATH: Self = Self(3);
    /// Cataclysm (4.x).
    pub const CATACLYSM: Self = Self(4);

    /// Whether database string columns carry per-locale sub-columns.
    /// From 2.x on, localized text widened from 9 to 17 words.
    pub fn has_extended_localization(self) -> bool {
        self.0 >= 2
    }

    /// Whether terrain placement entries include the scale word.
    pub fn has_placement_scale(self) -> bool {
        self.0 >= 2
    }
}

impl std::fmt::Display for GameVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
