// Sprite sheet animation generator
//
// Slices sprite sheets into frame grids, one grid per variant, and turns each
// grid row into a looping clip. Clips are gathered into a controller for the
// main sheet and into override controllers for every additional sheet.

pub mod config;
pub mod core;
pub mod export;
pub mod preview;
pub mod sheet;

pub use config::{AnimationDefinition, ConfigError, ExportSettings, GridConfig, ProjectConfig};
pub use crate::core::CoreError;
pub use export::{AssetStore, ExportError, Generator};
pub use sheet::{Frame, SheetError, SheetSource};
