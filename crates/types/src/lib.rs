pub mod category;
pub mod color;
pub mod geometry;
pub mod record;

pub use category::{capitalize, Category, CATEGORY_ORDER};
pub use color::Color;
pub use geometry::{Rect, Size};
pub use record::Record;
