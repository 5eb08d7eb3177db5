//! PDF output: the lopdf document, a per-page drawing canvas and the
//! catalog page furniture drawn on it.

pub mod canvas;
pub mod document;
pub mod page;

pub use canvas::{PageCanvas, TextAlign, TextSpec};
pub use document::PdfDocument;
pub use page::{price_badge_rect, PageRenderer, RowImage};

pub const MM_TO_PT: f32 = 72.0 / 25.4;

pub fn mm_to_pt(mm: f32) -> f32 {
    mm * MM_TO_PT
}

/// Convert a top-down millimetre y to PDF points measured from the bottom edge.
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    mm_to_pt(page_height - y)
}
