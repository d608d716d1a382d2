//! Typed codecs for individual chunk formats, one file per signature.

pub mod main;
pub mod modf;
pub mod movv;
pub mod mphd;
pub mod mver;
pub mod mwmo;

pub use main::{AreaInfo, AreaInfoEntry};
pub use modf::{ModelPlacementEntry, ModelPlacementInfo};
pub use movv::VisibleVertices;
pub use mphd::WorldTableHeader;
pub use mver::TerrainVersion;
pub use mwmo::ModelObjectNames;
