#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use catalog_export::{
    AssetError, AssetProvider, CatalogExporter, ExportArtifact, ExportConfig, InMemoryAssetProvider,
};
use chrono::NaiveDate;
use lopdf::Document as LopdfDocument;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn from_artifact(artifact: &ExportArtifact) -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_bytes(artifact.bytes.clone())
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// The date every test export prints in its header.
pub fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

/// An exporter with default configuration, a pinned date and `provider`.
pub fn exporter_with(provider: Arc<dyn AssetProvider>) -> CatalogExporter {
    CatalogExporter::builder()
        .with_provider(provider)
        .with_generation_date(fixed_date())
        .build()
        .unwrap()
}

/// An exporter whose provider has no images at all.
pub fn exporter() -> CatalogExporter {
    exporter_with(Arc::new(InMemoryAssetProvider::new()))
}

pub fn exporter_with_config(config: ExportConfig) -> CatalogExporter {
    CatalogExporter::new(config, Arc::new(InMemoryAssetProvider::new()))
        .with_generation_date(fixed_date())
}

/// An in-memory provider that sleeps before answering selected locators
/// and records the order in which fetches complete.
#[derive(Debug, Default)]
pub struct DelayedProvider {
    inner: InMemoryAssetProvider,
    delays: HashMap<String, Duration>,
    completed: Mutex<Vec<String>>,
}

impl DelayedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset(self, locator: &str, bytes: Vec<u8>) -> Self {
        self.inner.insert(locator, bytes).unwrap();
        self
    }

    pub fn with_delay(mut self, locator: &str, delay: Duration) -> Self {
        self.delays.insert(locator.to_string(), delay);
        self
    }

    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

impl AssetProvider for DelayedProvider {
    fn fetch(&self, locator: &str) -> Result<Arc<Vec<u8>>, AssetError> {
        if let Some(delay) = self.delays.get(locator) {
            std::thread::sleep(*delay);
        }
        let result = self.inner.fetch(locator);
        self.completed.lock().unwrap().push(locator.to_string());
        result
    }

    fn name(&self) -> &'static str {
        "DelayedProvider"
    }
}
