//! Export configuration: branding, contact details, theme colors, page
//! geometry and image defaults.
//!
//! Every section has full defaults, so a config file only needs the keys it
//! overrides:
//!
//! ```json
//! { "contact": { "phone": "+54 11 5555-0000" }, "images": { "image_timeout_ms": 3000 } }
//! ```

use crate::error::ConfigError;
use catalog_layout::PageGeometry;
use catalog_types::{Category, Color};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_FILE_NAME: &str = "catalogo-suplementos.pdf";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub branding: Branding,
    pub contact: Contact,
    pub theme: Theme,
    pub geometry: PageGeometry,
    pub images: ImageSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branding {
    pub title: String,
    pub file_name: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            title: "CATÁLOGO DE SUPLEMENTOS".to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub phone: String,
    pub whatsapp: String,
    pub email: String,
    pub site_url: String,
}

impl Default for Contact {
    fn default() -> Self {
        Self {
            phone: "+54 9 2494 46-8756".to_string(),
            whatsapp: "+54 9 2494 46-8756".to_string(),
            email: "mjmorazzo@gmail.com".to_string(),
            site_url: "https://suplementosfitness.vercel.app".to_string(),
        }
    }
}

/// Colors of the page furniture and row contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub header_fill: Color,
    pub header_text: Color,
    pub table_header_fill: Color,
    pub table_header_text: Color,
    pub footer_fill: Color,
    pub footer_rule: Color,
    pub footer_text: Color,
    pub row_even: Color,
    pub row_odd: Color,
    pub separator: Color,
    pub product_text: Color,
    pub description_text: Color,
    pub body_text: Color,
    pub price_badge: Color,
    pub price_text: Color,
    pub medallion_fill: Color,
    pub medallion_border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        let navy = Color::rgb(25, 55, 125);
        let pale_blue = Color::rgb(200, 220, 240);
        Self {
            header_fill: navy,
            header_text: Color::WHITE,
            table_header_fill: navy,
            table_header_text: Color::WHITE,
            footer_fill: Color::rgb(235, 245, 255),
            footer_rule: navy,
            footer_text: navy,
            row_even: Color::rgb(240, 248, 255),
            row_odd: Color::WHITE,
            separator: pale_blue,
            product_text: navy,
            description_text: Color::gray(80),
            body_text: Color::gray(50),
            price_badge: Color::rgb(230, 240, 255),
            price_text: navy,
            medallion_fill: Color::WHITE,
            medallion_border: pale_blue,
        }
    }
}

/// Default images and decode limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    /// Category slug to image locator.
    pub category_defaults: BTreeMap<String, String>,
    /// Used when neither the record nor its category has an image.
    pub generic_default: String,
    /// Longest side, in pixels, of a decoded image after downscaling.
    pub max_image_pixels: u32,
    /// Per-attempt fetch timeout. `None` waits indefinitely.
    pub image_timeout_ms: Option<u64>,
}

impl Default for ImageSettings {
    fn default() -> Self {
        let category_defaults = catalog_types::CATEGORY_ORDER
            .iter()
            .chain([&Category::Otros])
            .filter(|c| **c != Category::Energia)
            .map(|c| (c.slug().to_string(), category_image(c.slug())))
            .collect();
        Self {
            category_defaults,
            generic_default: category_image(Category::Otros.slug()),
            max_image_pixels: 256,
            image_timeout_ms: None,
        }
    }
}

impl ImageSettings {
    pub fn category_default(&self, category: &Category) -> Option<&str> {
        self.category_defaults
            .get(category.slug())
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.image_timeout_ms.map(Duration::from_millis)
    }
}

fn category_image(slug: &str) -> String {
    format!("/images/categories/{}.png", slug)
}

impl ExportConfig {
    /// Reads and validates a JSON config file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&source)
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: ExportConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.geometry
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        let file_name = self.branding.file_name.trim();
        if file_name.is_empty() || file_name.contains(['/', '\\']) {
            return Err(ConfigError::Invalid(format!(
                "file_name must be a bare file name, got '{}'",
                self.branding.file_name
            )));
        }
        if self.images.max_image_pixels == 0 {
            return Err(ConfigError::Invalid(
                "max_image_pixels must be at least 1".to_string(),
            ));
        }
        if self.images.generic_default.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "generic_default image must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
