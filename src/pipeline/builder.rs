use super::exporter::CatalogExporter;
use crate::config::ExportConfig;
use crate::error::ExportError;
use catalog_resource::FilesystemAssetProvider;
use catalog_traits::AssetProvider;
use chrono::NaiveDate;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Asset root used when no provider is configured.
pub const DEFAULT_ASSET_DIR: &str = "public";

/// A builder for creating a `CatalogExporter`.
#[derive(Default)]
pub struct ExporterBuilder {
    config: ExportConfig,
    provider: Option<Arc<dyn AssetProvider>>,
    generated_on: Option<NaiveDate>,
}

impl ExporterBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads the configuration from a JSON file. Missing fields keep their defaults.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ExportError> {
        self.config = ExportConfig::from_json_file(path)?;
        Ok(self)
    }

    /// Uses `provider` to fetch every image.
    pub fn with_provider(mut self, provider: Arc<dyn AssetProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Serves images from a directory on disk.
    pub fn with_asset_dir<P: AsRef<Path>>(self, dir: P) -> Self {
        self.with_provider(Arc::new(FilesystemAssetProvider::new(dir.as_ref())))
    }

    /// Bounds each image load. Loads that take longer fall back to the
    /// category default or render without an image.
    pub fn with_image_timeout(mut self, timeout: Duration) -> Self {
        self.config.images.image_timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    pub fn with_max_image_pixels(mut self, pixels: u32) -> Self {
        self.config.images.max_image_pixels = pixels;
        self
    }

    pub fn with_generation_date(mut self, date: NaiveDate) -> Self {
        self.generated_on = Some(date);
        self
    }

    /// Validates the configuration and creates the exporter.
    pub fn build(self) -> Result<CatalogExporter, ExportError> {
        self.config.validate()?;
        let provider = match self.provider {
            Some(provider) => provider,
            None => {
                log::info!("No asset provider configured, serving images from '{}'", DEFAULT_ASSET_DIR);
                Arc::new(FilesystemAssetProvider::new(DEFAULT_ASSET_DIR))
            }
        };

        let exporter = CatalogExporter::new(self.config, provider);
        Ok(match self.generated_on {
            Some(date) => exporter.with_generation_date(date),
            None => exporter,
        })
    }
}
