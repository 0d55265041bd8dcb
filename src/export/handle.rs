// Type-safe handles to generated assets

use std::marker::PhantomData;
use std::path::Path;

/// Unique identifier for a generated asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(pub(crate) u64);

impl AssetId {
    /// Create a new asset ID from the asset's path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        path.as_ref().hash(&mut hasher);
        Self(hasher.finish())
    }

    /// Get the raw u64 value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Type-safe handle to a generated asset
///
/// The `T` parameter keeps clip handles and controller handles apart.
#[derive(Debug)]
pub struct AssetHandle<T> {
    pub(crate) id: AssetId,
    _phantom: PhantomData<T>,
}

// Manual impls: derives would demand `T: Copy`/`T: PartialEq` of the marker
impl<T> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AssetHandle<T> {}

impl<T> PartialEq for AssetHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for AssetHandle<T> {}

impl<T> std::hash::Hash for AssetHandle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> AssetHandle<T> {
    /// Create a new asset handle
    pub(crate) fn new(id: AssetId) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    /// Get the underlying asset ID
    pub fn id(&self) -> AssetId {
        self.id
    }
}

// Marker types for different asset kinds
#[derive(Debug)]
pub struct ClipAsset;
#[derive(Debug)]
pub struct ControllerAsset;

/// Convenience type aliases
pub type ClipHandle = AssetHandle<ClipAsset>;
pub type ControllerHandle = AssetHandle<ControllerAsset>;
