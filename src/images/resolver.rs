use crate::config::ImageSettings;
use catalog_types::{Category, Record};

/// Picks the image locator for a record.
///
/// Resolution never fails: an explicit record image wins, then the category
/// default, then the generic default.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    settings: ImageSettings,
}

impl ImageResolver {
    pub fn new(settings: ImageSettings) -> Self {
        Self { settings }
    }

    pub fn resolve<'a>(&'a self, record: &'a Record) -> &'a str {
        record
            .image_locator()
            .unwrap_or_else(|| self.category_fallback(&record.category))
    }

    /// The category default, or the generic default when the category has none.
    pub fn category_fallback(&self, category: &Category) -> &str {
        self.settings
            .category_default(category)
            .unwrap_or(self.settings.generic_default.as_str())
    }

    /// Locators to try in order: the resolved image, then the category
    /// fallback when it differs.
    pub fn fallback_chain(&self, record: &Record) -> Vec<String> {
        let primary = self.resolve(record);
        let fallback = self.category_fallback(&record.category);
        let mut chain = vec![primary.to_string()];
        if fallback != primary {
            chain.push(fallback.to_string());
        }
        chain
    }
}
