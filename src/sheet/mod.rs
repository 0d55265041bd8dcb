// Sprite sheet input
//
// Turns a sheet on disk into an ordered frame sequence. Frames are opaque to
// the sequencing core: only their names matter for ordering.

mod loader;
mod region;

pub use loader::{open_sheet, DirectorySheetSource, ImageSheetSource, FRAME_EXTENSIONS};
pub use region::{FrameRegion, GridSlicer};

use serde::{Deserialize, Serialize};

/// One frame cut from a sprite sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Display name carrying the frame's ordinal, e.g. `hero_7`
    pub name: String,

    /// Where the frame lives in its source image
    pub region: FrameRegion,
}

impl Frame {
    pub fn new(name: impl Into<String>, region: FrameRegion) -> Self {
        Self {
            name: name.into(),
            region,
        }
    }
}

/// A source of frames, sorted by the frame-number collator
pub trait SheetSource {
    /// Human readable name used in logs and clip names
    fn name(&self) -> &str;

    /// List every frame in collated order
    fn list_frames(&self) -> Result<Vec<Frame>, SheetError>;
}

/// Sheet loading errors
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("Sheet not found: {0}")]
    NotFound(String),

    #[error("Invalid cell size {width}x{height}: both must be greater than zero")]
    InvalidCellSize { width: u32, height: u32 },

    #[error("Failed to read image {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
