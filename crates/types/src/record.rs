use crate::category::Category;
use serde::{Deserialize, Serialize};

/// One catalog entry, as supplied by the catalog data source.
///
/// Field names follow the catalog JSON (`categoria` and `descripcion` are
/// accepted as written by the storefront).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub id: Option<u32>,
    pub product: String,
    #[serde(default)]
    pub brand: String,
    #[serde(alias = "categoria")]
    pub category: Category,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub flavors: Vec<String>,
    #[serde(default, rename = "descripcion", alias = "description")]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Record {
    pub fn new(
        id: u32,
        product: impl Into<String>,
        brand: impl Into<String>,
        category: Category,
        price: f64,
    ) -> Self {
        Self {
            id: Some(id),
            product: product.into(),
            brand: brand.into(),
            category,
            price,
            flavors: Vec::new(),
            description: None,
            image: None,
        }
    }

    pub fn with_flavors<I, S>(mut self, flavors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flavors = flavors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }

    /// The key used by the image cache. Missing ids and `0` have no key.
    pub fn cache_key(&self) -> Option<u32> {
        self.id.filter(|id| *id != 0)
    }

    /// The explicit image locator, if one is set and non-empty.
    pub fn image_locator(&self) -> Option<&str> {
        self.image.as_deref().filter(|s| !s.is_empty())
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|s| !s.trim().is_empty())
    }
}
