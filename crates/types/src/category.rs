use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed category enumeration of the catalog.
///
/// Strings outside the known set are preserved in [`Category::Unrecognized`]
/// so they can still be displayed and sorted deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Proteina,
    Creatina,
    Aminoacidos,
    PreEntreno,
    Quemadores,
    Vitaminas,
    Colageno,
    Ganador,
    Carbohidratos,
    Barras,
    Energia,
    Otros,
    Unrecognized(String),
}

/// Export ordering. Categories missing from this list sort after all of them.
pub const CATEGORY_ORDER: [Category; 11] = [
    Category::Proteina,
    Category::Creatina,
    Category::Aminoacidos,
    Category::PreEntreno,
    Category::Quemadores,
    Category::Vitaminas,
    Category::Colageno,
    Category::Ganador,
    Category::Carbohidratos,
    Category::Barras,
    Category::Energia,
];

impl Category {
    pub fn from_slug(slug: &str) -> Self {
        match slug {
            "proteina" => Category::Proteina,
            "creatina" => Category::Creatina,
            "aminoacidos" => Category::Aminoacidos,
            "pre-entreno" => Category::PreEntreno,
            "quemadores" => Category::Quemadores,
            "vitaminas" => Category::Vitaminas,
            "colageno" => Category::Colageno,
            "ganador" => Category::Ganador,
            "carbohidratos" => Category::Carbohidratos,
            "barras" => Category::Barras,
            "energia" => Category::Energia,
            "otros" => Category::Otros,
            other => Category::Unrecognized(other.to_string()),
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            Category::Proteina => "proteina",
            Category::Creatina => "creatina",
            Category::Aminoacidos => "aminoacidos",
            Category::PreEntreno => "pre-entreno",
            Category::Quemadores => "quemadores",
            Category::Vitaminas => "vitaminas",
            Category::Colageno => "colageno",
            Category::Ganador => "ganador",
            Category::Carbohidratos => "carbohidratos",
            Category::Barras => "barras",
            Category::Energia => "energia",
            Category::Otros => "otros",
            Category::Unrecognized(raw) => raw,
        }
    }

    /// Position in [`CATEGORY_ORDER`]; every unordered category shares the
    /// rank right after the last ordered one.
    pub fn order_rank(&self) -> usize {
        CATEGORY_ORDER
            .iter()
            .position(|c| c == self)
            .unwrap_or(CATEGORY_ORDER.len())
    }

    /// Display label: the slug with its first letter upper-cased.
    pub fn label(&self) -> String {
        capitalize(self.slug())
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::from_slug(&value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Unrecognized(raw) => raw,
            known => known.slug().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Upper-cases the first character and leaves the remainder untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
