//! Image resolution and asynchronous preloading.

mod loader;
mod resolver;

pub use loader::ImageLoader;
pub use resolver::ImageResolver;

use catalog_traits::AssetError;
use catalog_types::Size;
use image::GenericImageView;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Decoded images keyed by record id, built fresh for every export.
pub type ImageCache = HashMap<u32, Arc<LoadedImage>>;

/// Why one image attempt failed. These never escape the loader.
#[derive(Error, Debug)]
pub enum ImageLoadError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] AssetError),

    #[error("decode failed for '{locator}': {message}")]
    Decode { locator: String, message: String },

    #[error("'{locator}' timed out after {after:?}")]
    TimedOut { locator: String, after: Duration },

    #[error("image task failed: {0}")]
    TaskFailed(String),
}

/// An image ready for embedding: 8-bit RGB samples plus an optional alpha plane.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
    /// Present only when at least one pixel is not fully opaque.
    pub alpha: Option<Vec<u8>>,
    /// The locator the bytes came from.
    pub source: String,
}

impl LoadedImage {
    /// Decodes PNG, JPEG or GIF bytes, downscaling so neither side exceeds
    /// `max_pixels`.
    pub fn decode(bytes: &[u8], locator: &str, max_pixels: u32) -> Result<Self, ImageLoadError> {
        let mut decoded = image::load_from_memory(bytes).map_err(|e| ImageLoadError::Decode {
            locator: locator.to_string(),
            message: e.to_string(),
        })?;

        let (width, height) = decoded.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageLoadError::Decode {
                locator: locator.to_string(),
                message: "image has no pixels".to_string(),
            });
        }
        if width > max_pixels || height > max_pixels {
            decoded = decoded.thumbnail(max_pixels, max_pixels);
        }

        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        let pixel_count = (width * height) as usize;
        let mut rgb = Vec::with_capacity(pixel_count * 3);
        let mut alpha = Vec::with_capacity(pixel_count);
        let mut translucent = false;
        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0;
            translucent |= a != u8::MAX;
            rgb.extend_from_slice(&[r, g, b]);
            alpha.push(a);
        }

        Ok(Self {
            width,
            height,
            rgb,
            alpha: translucent.then_some(alpha),
            source: locator.to_string(),
        })
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    /// Encodes a solid-color PNG of the given size.
    pub fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba(color));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }
}
