use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Degenerate page geometry: {0}")]
    DegenerateGeometry(String),
    #[error("{what} needs {required:.2}mm but only {available:.2}mm are available.")]
    GeometryOverflow {
        what: &'static str,
        required: f32,
        available: f32,
    },
    #[error("Page plan mismatch: planned {expected} pages, produced {produced}.")]
    PlanMismatch { expected: usize, produced: usize },
}

pub mod algorithms;
pub mod flavors;
pub mod geometry;
pub mod text;

pub use self::algorithms::pagination::PagePlan;
pub use self::flavors::{chunk_flavors, layout_flavor_lines};
pub use self::geometry::{Column, PageGeometry};
pub use self::text::metrics::{text_width_mm, FontFace};
pub use self::text::wrapper::{fit_to_width, truncate_chars, wrap_words};

// Re-export geometry primitives so callers don't need catalog-types for them
pub use catalog_types::geometry::{Rect, Size};
