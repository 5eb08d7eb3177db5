//! AssetProvider trait for abstracting image byte sources.
//!
//! The export engine never touches the filesystem or network directly: every
//! image locator a record resolves to is handed to an `AssetProvider`, which
//! returns the raw encoded bytes (PNG, JPEG, GIF). Decoding happens later.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for asset fetches.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to load asset '{locator}': {message}")]
    LoadFailed { locator: String, message: String },

    #[error("Invalid asset locator: {0}")]
    InvalidLocator(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for AssetError {
    fn from(err: std::io::Error) -> Self {
        AssetError::Io(err.to_string())
    }
}

/// Shared asset bytes (reference-counted).
pub type SharedAssetData = Arc<Vec<u8>>;

/// A source of encoded image bytes keyed by locator.
///
/// Locators are the strings stored on records and in the default image
/// table, e.g. `/images/whey.png` or `/placeholder.png?text=Proteina`.
/// Implementations must be callable from blocking worker threads.
pub trait AssetProvider: Send + Sync + Debug {
    /// Fetch the bytes behind `locator`.
    fn fetch(&self, locator: &str) -> Result<SharedAssetData, AssetError>;

    /// Human-readable provider name for log lines.
    fn name(&self) -> &'static str;
}

/// Drops any `?query` or `#fragment` suffix from a locator.
///
/// Storefront locators carry presentation hints in the query string
/// (`?height=200&width=200`) that do not identify a different asset.
pub fn strip_locator_suffix(locator: &str) -> &str {
    let end = locator.find(['?', '#']).unwrap_or(locator.len());
    &locator[..end]
}

/// An asset provider backed by a pre-populated map.
///
/// Works in any environment and is the provider used by tests.
#[derive(Debug, Default)]
pub struct InMemoryAssetProvider {
    assets: RwLock<HashMap<String, SharedAssetData>>,
}

impl InMemoryAssetProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` under `locator` (query suffixes are ignored).
    ///
    /// # Errors
    ///
    /// Returns `AssetError::LoadFailed` if the internal lock is poisoned.
    pub fn insert(&self, locator: impl Into<String>, data: Vec<u8>) -> Result<(), AssetError> {
        self.insert_shared(locator, Arc::new(data))
    }

    /// Store already-shared bytes under `locator`.
    ///
    /// # Errors
    ///
    /// Returns `AssetError::LoadFailed` if the internal lock is poisoned.
    pub fn insert_shared(
        &self,
        locator: impl Into<String>,
        data: SharedAssetData,
    ) -> Result<(), AssetError> {
        let locator = locator.into();
        let key = strip_locator_suffix(&locator).to_string();
        let mut assets = self.assets.write().map_err(|_| AssetError::LoadFailed {
            locator: locator.clone(),
            message: "asset store lock poisoned".to_string(),
        })?;
        assets.insert(key, data);
        Ok(())
    }

    /// Returns `None` if the lock is poisoned or the asset doesn't exist.
    pub fn remove(&self, locator: &str) -> Option<SharedAssetData> {
        self.assets
            .write()
            .ok()?
            .remove(strip_locator_suffix(locator))
    }

    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.assets.read().map(|a| a.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AssetProvider for InMemoryAssetProvider {
    fn fetch(&self, locator: &str) -> Result<SharedAssetData, AssetError> {
        let assets = self.assets.read().map_err(|_| AssetError::LoadFailed {
            locator: locator.to_string(),
            message: "asset store lock poisoned".to_string(),
        })?;
        assets
            .get(strip_locator_suffix(locator))
            .cloned()
            .ok_or_else(|| AssetError::NotFound(locator.to_string()))
    }

    fn name(&self) -> &'static str {
        "InMemoryAssetProvider"
    }
}
