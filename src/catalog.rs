//! Catalog loading, filtering and the canonical export ordering.

use crate::error::ExportError;
use catalog_types::{Category, Record};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fs;
use std::path::Path;

/// Reads a JSON array of records.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, ExportError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to read catalog from '{}': {}", path.display(), e),
        )
    })?;
    let records: Vec<Record> = serde_json::from_str(&source)?;
    log::info!("Loaded {} record(s) from {}", records.len(), path.display());
    Ok(records)
}

/// Stable sort by category order; categories outside the order go last.
pub fn sort_by_category_order(records: &mut [Record]) {
    records.sort_by_key(|r| r.category.order_rank());
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceOrder {
    Ascending,
    Descending,
}

/// The storefront's record filters.
///
/// An empty filter keeps every record. Matching records keep their input
/// order unless a price order is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFilter {
    /// Case-insensitive substring of the product name or of any flavor.
    pub search: Option<String>,
    pub category: Option<Category>,
    /// Exact brand match.
    pub brand: Option<String>,
    pub price_order: Option<PriceOrder>,
}

impl CatalogFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_price_order(mut self, order: PriceOrder) -> Self {
        self.price_order = Some(order);
        self
    }

    pub fn matches(&self, record: &Record) -> bool {
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let hit = record.product.to_lowercase().contains(&needle)
                || record
                    .flavors
                    .iter()
                    .any(|f| f.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        if self.category.as_ref().is_some_and(|c| *c != record.category) {
            return false;
        }
        if self.brand.as_ref().is_some_and(|b| *b != record.brand) {
            return false;
        }
        true
    }

    pub fn apply(&self, records: &[Record]) -> Vec<Record> {
        let mut kept: Vec<Record> = records.iter().filter(|r| self.matches(r)).cloned().collect();
        match self.price_order {
            Some(PriceOrder::Ascending) => kept.sort_by(|a, b| compare_price(a, b)),
            Some(PriceOrder::Descending) => kept.sort_by(|a, b| compare_price(b, a)),
            None => {}
        }
        kept
    }
}

fn compare_price(a: &Record, b: &Record) -> Ordering {
    a.price.total_cmp(&b.price)
}
