// Asset stores: JSON files on disk, or plain memory

use super::{
    AnimationClip, AssetHandle, AssetId, AssetStore, ClipHandle, ControllerHandle, ExportError,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const CLIP_EXTENSION: &str = "anim.json";
const CONTROLLER_EXTENSION: &str = "controller.json";
const OVERRIDE_EXTENSION: &str = "overrideController.json";

fn asset_path(folder: &Path, name: &str, extension: &str) -> PathBuf {
    folder.join(format!("{}.{}", name, extension))
}

/// On-disk controller description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerFile {
    pub name: String,
    /// Clip played on entry
    pub default_state: Option<String>,
    /// Clip file names, one state each
    pub motions: Vec<String>,
}

/// One swapped clip in an override controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverridePair {
    pub original: String,
    pub replacement: String,
}

/// On-disk override controller description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideControllerFile {
    pub name: String,
    /// Path of the base controller file
    pub base: String,
    pub overrides: Vec<OverridePair>,
}

/// Writes every asset as a pretty-printed JSON file in its export folder
#[derive(Debug, Default)]
pub struct FsAssetStore {
    /// Written asset paths by ID, used to resolve handles
    paths: HashMap<AssetId, PathBuf>,
}

impl FsAssetStore {
    /// Create a new file-system store
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of a previously written asset
    pub fn path_of<T>(&self, handle: AssetHandle<T>) -> Option<&Path> {
        self.paths.get(&handle.id()).map(PathBuf::as_path)
    }

    fn resolve<T>(&self, handle: AssetHandle<T>) -> Result<String, ExportError> {
        self.path_of(handle)
            .map(|path| path.to_string_lossy().to_string())
            .ok_or(ExportError::UnknownHandle(handle.id()))
    }

    fn file_name<T>(&self, handle: AssetHandle<T>) -> Result<String, ExportError> {
        let path = self
            .path_of(handle)
            .ok_or(ExportError::UnknownHandle(handle.id()))?;
        Ok(path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default())
    }

    fn write<S: Serialize, T>(&mut self, path: PathBuf, value: &S) -> Result<AssetHandle<T>, ExportError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(&path, json)?;
        debug!("Wrote {}", path.display());

        let id = AssetId::from_path(&path);
        self.paths.insert(id, path);
        Ok(AssetHandle::new(id))
    }
}

impl AssetStore for FsAssetStore {
    fn create_clip(&mut self, folder: &Path, clip: &AnimationClip) -> Result<ClipHandle, ExportError> {
        let path = asset_path(folder, &clip.name, CLIP_EXTENSION);
        self.write(path, clip)
    }

    fn create_controller(
        &mut self,
        folder: &Path,
        name: &str,
        clips: &[ClipHandle],
    ) -> Result<ControllerHandle, ExportError> {
        let motions = clips
            .iter()
            .map(|clip| self.file_name(*clip))
            .collect::<Result<Vec<_>, _>>()?;

        let file = ControllerFile {
            name: name.to_string(),
            default_state: motions.first().cloned(),
            motions,
        };
        self.write(asset_path(folder, name, CONTROLLER_EXTENSION), &file)
    }

    fn create_override_controller(
        &mut self,
        folder: &Path,
        name: &str,
        base: ControllerHandle,
        overrides: &[(ClipHandle, ClipHandle)],
    ) -> Result<ControllerHandle, ExportError> {
        let base = self.resolve(base)?;
        let overrides = overrides
            .iter()
            .map(|(original, replacement)| {
                Ok(OverridePair {
                    original: self.file_name(*original)?,
                    replacement: self.file_name(*replacement)?,
                })
            })
            .collect::<Result<Vec<_>, ExportError>>()?;

        let file = OverrideControllerFile {
            name: name.to_string(),
            base,
            overrides,
        };
        self.write(asset_path(folder, name, OVERRIDE_EXTENSION), &file)
    }
}

/// A stored controller
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerRecord {
    Controller {
        name: String,
        motions: Vec<ClipHandle>,
    },
    Override {
        name: String,
        base: ControllerHandle,
        overrides: Vec<(ClipHandle, ClipHandle)>,
    },
}

impl ControllerRecord {
    pub fn name(&self) -> &str {
        match self {
            ControllerRecord::Controller { name, .. } => name,
            ControllerRecord::Override { name, .. } => name,
        }
    }
}

/// Keeps generated assets in memory (dry runs and tests)
#[derive(Debug, Default)]
pub struct MemoryAssetStore {
    clips: HashMap<AssetId, AnimationClip>,
    controllers: HashMap<AssetId, ControllerRecord>,
    /// Creation order of clip IDs
    clip_order: Vec<AssetId>,
    /// Creation order of controller IDs
    controller_order: Vec<AssetId>,
}

impl MemoryAssetStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a clip by handle
    pub fn clip(&self, handle: ClipHandle) -> Option<&AnimationClip> {
        self.clips.get(&handle.id())
    }

    /// Get a controller by handle
    pub fn controller(&self, handle: ControllerHandle) -> Option<&ControllerRecord> {
        self.controllers.get(&handle.id())
    }

    /// All clips in creation order
    pub fn clips(&self) -> impl Iterator<Item = &AnimationClip> {
        self.clip_order.iter().filter_map(|id| self.clips.get(id))
    }

    /// All controllers in creation order
    pub fn controllers(&self) -> impl Iterator<Item = &ControllerRecord> {
        self.controller_order
            .iter()
            .filter_map(|id| self.controllers.get(id))
    }

    /// Find a clip by name
    pub fn clip_named(&self, name: &str) -> Option<&AnimationClip> {
        self.clips().find(|clip| clip.name == name)
    }

    /// Find a controller by name
    pub fn controller_named(&self, name: &str) -> Option<&ControllerRecord> {
        self.controllers().find(|record| record.name() == name)
    }

    fn ensure_clip(&self, handle: ClipHandle) -> Result<(), ExportError> {
        if self.clips.contains_key(&handle.id()) {
            Ok(())
        } else {
            Err(ExportError::UnknownHandle(handle.id()))
        }
    }

    fn insert_controller(&mut self, id: AssetId, record: ControllerRecord) -> ControllerHandle {
        if self.controllers.insert(id, record).is_none() {
            self.controller_order.push(id);
        }
        AssetHandle::new(id)
    }
}

impl AssetStore for MemoryAssetStore {
    fn create_clip(&mut self, folder: &Path, clip: &AnimationClip) -> Result<ClipHandle, ExportError> {
        let id = AssetId::from_path(asset_path(folder, &clip.name, CLIP_EXTENSION));
        if self.clips.insert(id, clip.clone()).is_none() {
            self.clip_order.push(id);
        }
        Ok(AssetHandle::new(id))
    }

    fn create_controller(
        &mut self,
        folder: &Path,
        name: &str,
        clips: &[ClipHandle],
    ) -> Result<ControllerHandle, ExportError> {
        for clip in clips {
            self.ensure_clip(*clip)?;
        }

        let id = AssetId::from_path(asset_path(folder, name, CONTROLLER_EXTENSION));
        let record = ControllerRecord::Controller {
            name: name.to_string(),
            motions: clips.to_vec(),
        };
        Ok(self.insert_controller(id, record))
    }

    fn create_override_controller(
        &mut self,
        folder: &Path,
        name: &str,
        base: ControllerHandle,
        overrides: &[(ClipHandle, ClipHandle)],
    ) -> Result<ControllerHandle, ExportError> {
        if !self.controllers.contains_key(&base.id()) {
            return Err(ExportError::UnknownHandle(base.id()));
        }
        for (original, replacement) in overrides {
            self.ensure_clip(*original)?;
            self.ensure_clip(*replacement)?;
        }

        let id = AssetId::from_path(asset_path(folder, name, OVERRIDE_EXTENSION));
        let record = ControllerRecord::Override {
            name: name.to_string(),
            base,
            overrides: overrides.to_vec(),
        };
        Ok(self.insert_controller(id, record))
    }
}
