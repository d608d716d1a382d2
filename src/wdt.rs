use crate::chunk::{read_chunk, write_chunk};
use crate::chunks::{
    AreaInfo, AreaInfoEntry, ModelObjectNames, ModelPlacementInfo, TerrainVersion,
    WorldTableHeader,
};
use crate::cursor::{Cursor, Writer};
use crate::error::Result;

/// A parsed world table (WDT) file.
///
/// Fixed chunk order: MVER, MPHD, MAIN, MWMO, then MODF — but MODF is
/// present only when the MWMO filename list is non-empty. The same predicate
/// drives serialization, so an empty world round-trips without the
/// placement chunk and a populated one keeps it.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldTable {
    pub version: TerrainVersion,
    pub header: WorldTableHeader,
    pub area_info: AreaInfo,
    pub model_objects: ModelObjectNames,
    pub placement: Option<ModelPlacementInfo>,
}

impl WorldTable {
    /// Parse a world table from a fully buffered file. All chunks are read
    /// eagerly; there is no laziness at the document level.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut c = Cursor::new(data);

        let version = read_chunk::<TerrainVersion>(&mut c)?;
        let header = read_chunk::<WorldTableHeader>(&mut c)?;
        let area_info = read_chunk::<AreaInfo>(&mut c)?;
        let model_objects = read_chunk::<ModelObjectNames>(&mut c)?;

        let placement = if model_objects.filenames.is_empty() {
            None
        } else {
            Some(read_chunk::<ModelPlacementInfo>(&mut c)?)
        };

        Ok(Self {
            version,
            header,
            area_info,
            model_objects,
            placement,
        })
    }

    /// Serialize back to bytes, applying the same placement predicate as
    /// [`WorldTable::decode`].
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut w = Writer::new();
        write_chunk(&mut w, &self.version);
        write_chunk(&mut w, &self.header);
        write_chunk(&mut w, &self.area_info);
        write_chunk(&mut w, &self.model_objects);

        if !self.model_objects.filenames.is_empty() {
            if let Some(placement) = &self.placement {
                write_chunk(&mut w, placement);
            }
        }

        w.into_bytes()
    }

    /// Tiles currently marked loaded. Files on disk (outside a running
    /// game) never mark any.
    pub fn loaded_areas(&self) -> impl Iterator<Item = &AreaInfoEntry> {
        self.area_info.entries.iter().filter(|e| e.is_loaded())
    }

    /// Tiles that have terrain data.
    pub fn areas_with_terrain(&self) -> impl Iterator<Item = &AreaInfoEntry> {
        self.area_info.entries.iter().filter(|e| e.has_terrain())
    }

    /// Whether any tile has terrain data.
    pub fn has_any_terrain(&self) -> bool {
        self.area_info.entries.iter().any(|e| e.has_terrain())
    }

    /// Whether the tile at the given 0-based coordinates has terrain data.
    pub fn is_tile_populated(&self, tile_x: usize, tile_y: usize) -> bool {
        self.area_info
            .entry(tile_x, tile_y)
            .is_some_and(|e| e.has_terrain())
    }

    /// Entry for the tile at the given 0-based coordinates.
    pub fn area_info(&self, tile_x: usize, tile_y: usize) -> Option<&AreaInfoEntry> {
        self.area_info.entry(tile_x, tile_y)
    }
}
