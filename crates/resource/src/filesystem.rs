//! Filesystem-backed asset provider.
//!
//! Storefront locators are site-root relative (`/images/whey.png`), so the
//! provider maps them onto an asset root directory, the equivalent of the
//! site's `public/` folder.
//!
//! # Security
//!
//! Resolved paths must stay inside the asset root. Locators containing `..`
//! or resolving outside the root are reported as `NotFound`.

use catalog_traits::{strip_locator_suffix, AssetError, AssetProvider, SharedAssetData};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
pub struct FilesystemAssetProvider {
    root: PathBuf,
    canonical_root: Option<PathBuf>,
}

impl FilesystemAssetProvider {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let canonical_root = root.canonicalize().ok();
        Self {
            root,
            canonical_root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a locator to a path under the asset root.
    ///
    /// Returns `Err(InvalidLocator)` for remote URLs and `Ok(None)` when the
    /// locator would escape the root.
    fn resolve(&self, locator: &str) -> Result<Option<PathBuf>, AssetError> {
        let trimmed = strip_locator_suffix(locator.trim());
        if trimmed.contains("://") {
            return Err(AssetError::InvalidLocator(format!(
                "{} (remote locators are not served from the filesystem)",
                locator
            )));
        }

        let relative = Path::new(trimmed.trim_start_matches('/'));
        if relative.as_os_str().is_empty() {
            return Err(AssetError::InvalidLocator(locator.to_string()));
        }
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Ok(None);
        }

        let full_path = self.root.join(relative);
        if let (Ok(canonical), Some(base)) = (full_path.canonicalize(), &self.canonical_root) {
            return Ok(canonical.starts_with(base).then_some(canonical));
        }
        Ok(Some(full_path))
    }
}

impl AssetProvider for FilesystemAssetProvider {
    fn fetch(&self, locator: &str) -> Result<SharedAssetData, AssetError> {
        let path = self.resolve(locator)?.ok_or_else(|| {
            AssetError::NotFound(format!("{} (outside asset root)", locator))
        })?;

        std::fs::read(&path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AssetError::NotFound(locator.to_string())
            } else {
                AssetError::LoadFailed {
                    locator: locator.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn name(&self) -> &'static str {
        "FilesystemAssetProvider"
    }
}
