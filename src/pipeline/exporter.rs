use super::artifact::ExportArtifact;
use super::assembler::DocumentAssembler;
use super::builder::ExporterBuilder;
use crate::catalog::sort_by_category_order;
use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::format::{format_long_date, today};
use crate::images::ImageLoader;
use catalog_layout::PagePlan;
use catalog_traits::AssetProvider;
use catalog_types::Record;
use chrono::NaiveDate;
use log::{error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// The export entry point.
///
/// Only one export runs at a time per exporter; a call made while another
/// is in flight fails with [`ExportError::Busy`] without doing any work.
pub struct CatalogExporter {
    config: Arc<ExportConfig>,
    loader: ImageLoader,
    generated_on: Option<NaiveDate>,
    in_progress: AtomicBool,
}

impl CatalogExporter {
    pub fn builder() -> ExporterBuilder {
        ExporterBuilder::new()
    }

    /// Creates an exporter without validating `config`. Invalid geometry
    /// surfaces as an error from [`export`](Self::export) instead.
    pub fn new(config: ExportConfig, provider: Arc<dyn AssetProvider>) -> Self {
        let loader = ImageLoader::new(provider, &config.images);
        Self {
            config: Arc::new(config),
            loader,
            generated_on: None,
            in_progress: AtomicBool::new(false),
        }
    }

    /// Pins the date printed in the header. Defaults to the local date at export time.
    pub fn with_generation_date(mut self, date: NaiveDate) -> Self {
        self.generated_on = Some(date);
        self
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn is_exporting(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    /// Renders `records` into a PDF.
    ///
    /// Records are ordered by category first; every image is loaded before
    /// the first page is drawn.
    pub async fn export(&self, records: &[Record]) -> Result<ExportArtifact, ExportError> {
        let Some(_guard) = ExportGuard::acquire(&self.in_progress) else {
            warn!("Export requested while another export is running");
            return Err(ExportError::Busy);
        };

        let result = self.run(records).await;
        if let Err(e) = &result {
            error!("Catalog export failed: {}", e);
        }
        result
    }

    async fn run(&self, records: &[Record]) -> Result<ExportArtifact, ExportError> {
        let started = Instant::now();
        let mut ordered = records.to_vec();
        sort_by_category_order(&mut ordered);

        // Reject bad geometry before fetching anything.
        PagePlan::for_geometry(&self.config.geometry, ordered.len())?;

        let images = self.loader.load(&ordered).await;
        let date = format_long_date(self.generated_on.unwrap_or_else(today));
        let artifact = DocumentAssembler::new(&self.config, date).assemble(&ordered, &images)?;

        info!(
            "Exported {} records to {} pages ({} bytes) in {:.2?}",
            artifact.rows_rendered,
            artifact.page_count,
            artifact.bytes.len(),
            started.elapsed()
        );
        Ok(artifact)
    }
}

/// Holds the in-progress flag for the lifetime of one export.
struct ExportGuard<'a>(&'a AtomicBool);

impl<'a> ExportGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
