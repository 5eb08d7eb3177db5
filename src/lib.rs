//! Paginated PDF export for the supplement product catalog.
//!
//! Records are grouped by category, every product image is preloaded
//! concurrently, and the rows are laid out into an A4 landscape table whose
//! page count is fixed before drawing starts.

pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod images;
pub mod pipeline;
pub mod render;

pub use catalog::{load_records, sort_by_category_order, CatalogFilter, PriceOrder};
pub use config::{Branding, Contact, ExportConfig, ImageSettings, Theme};
pub use error::{ConfigError, ExportError, RenderError};
pub use format::{format_long_date, format_price};
pub use images::{ImageCache, ImageLoadError, ImageLoader, ImageResolver, LoadedImage};
pub use pipeline::{CatalogExporter, DocumentAssembler, ExportArtifact, ExporterBuilder, LayoutCursor};

pub use catalog_layout::{LayoutError, PageGeometry, PagePlan};
pub use catalog_resource::FilesystemAssetProvider;
pub use catalog_traits::{AssetError, AssetProvider, InMemoryAssetProvider};
pub use catalog_types::{Category, Color, Record};
