//! Asset providers for the catalog export engine.
//!
//! ## Available Providers
//!
//! - [`FilesystemAssetProvider`]: serves site-root-relative locators from a local asset directory
//!
//! ## Re-exports
//!
//! - [`InMemoryAssetProvider`]: pre-populated in-memory storage from catalog-traits

mod filesystem;

pub use filesystem::FilesystemAssetProvider;

pub use catalog_traits::InMemoryAssetProvider;
