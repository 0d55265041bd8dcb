// Animation export
//
// Builds clips from grid rows and hands them, together with controllers and
// override controllers, to an asset store.

mod clip;
mod generator;
mod handle;
mod store;

pub use clip::{clip_name, controller_name, AnimationClip, Keyframe};
pub use generator::{GenerationReport, Generator, SheetFrames};
pub use handle::{AssetHandle, AssetId, ClipAsset, ClipHandle, ControllerAsset, ControllerHandle};
pub use store::{
    ControllerFile, ControllerRecord, FsAssetStore, MemoryAssetStore, OverrideControllerFile,
    OverridePair,
};

use crate::core::CoreError;
use std::path::Path;

/// Destination for generated clips and controllers
pub trait AssetStore {
    /// Store a clip in `folder`
    fn create_clip(&mut self, folder: &Path, clip: &AnimationClip) -> Result<ClipHandle, ExportError>;

    /// Store a controller whose states are `clips`; the first clip is the default state
    fn create_controller(
        &mut self,
        folder: &Path,
        name: &str,
        clips: &[ClipHandle],
    ) -> Result<ControllerHandle, ExportError>;

    /// Store a controller that reuses `base` with each `(original, replacement)` swapped
    fn create_override_controller(
        &mut self,
        folder: &Path,
        name: &str,
        base: ControllerHandle,
        overrides: &[(ClipHandle, ClipHandle)],
    ) -> Result<ControllerHandle, ExportError>;
}

/// Export errors
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Invalid frame rate {0}: must be a finite number greater than zero")]
    InvalidFrameRate(f32),

    #[error("Unknown asset handle: {0:?}")]
    UnknownHandle(AssetId),

    #[error("Failed to serialize asset: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
