use super::canvas::PageCanvas;
use super::mm_to_pt;
use crate::error::RenderError;
use crate::images::{ImageCache, LoadedImage};
use catalog_layout::text::metrics::{to_win_ansi, FontFace};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::collections::HashMap;

/// An in-memory PDF built with `lopdf`.
///
/// All pages share one resources dictionary holding the two base fonts and
/// every image XObject registered for the export.
pub struct PdfDocument {
    document: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    fonts: Dictionary,
    xobjects: Dictionary,
    image_names: HashMap<u32, String>,
    page_width: f32,
    page_height: f32,
}

impl PdfDocument {
    /// Starts an empty document with pages of the given size in millimetres.
    pub fn new(page_width: f32, page_height: f32, title: &str) -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let resources_id = document.new_object_id();

        let mut fonts = Dictionary::new();
        for face in [FontFace::Regular, FontFace::Bold] {
            let font_id = document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(face.resource_name(), font_id);
        }

        let catalog_id = document.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        document.trailer.set("Root", catalog_id);

        let info_id = document.add_object(dictionary! {
            "Title" => Object::String(to_win_ansi(title), StringFormat::Literal),
            "Producer" => Object::string_literal(concat!("catalog-export ", env!("CARGO_PKG_VERSION"))),
        });
        document.trailer.set("Info", info_id);

        Self {
            document,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            fonts,
            xobjects: Dictionary::new(),
            image_names: HashMap::new(),
            page_width,
            page_height,
        }
    }

    /// Embeds every cached image as an XObject, in id order.
    pub fn register_images(&mut self, images: &ImageCache) {
        let mut ids: Vec<&u32> = images.keys().collect();
        ids.sort();
        for id in ids {
            let name = format!("Im{}", id);
            let object_id = self.add_image(&images[id]);
            self.xobjects.set(name.as_bytes(), object_id);
            self.image_names.insert(*id, name);
        }
    }

    fn add_image(&mut self, image: &LoadedImage) -> ObjectId {
        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => image.width as i64,
            "Height" => image.height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        };
        if let Some(alpha) = &image.alpha {
            let mask = Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => image.width as i64,
                    "Height" => image.height as i64,
                    "ColorSpace" => "DeviceGray",
                    "BitsPerComponent" => 8,
                },
                alpha.clone(),
            );
            let mask_id = self.document.add_object(mask);
            dict.set("SMask", mask_id);
        }
        self.document.add_object(Stream::new(dict, image.rgb.clone()))
    }

    /// The XObject name registered for record `id`.
    pub fn image_name(&self, id: u32) -> Option<&str> {
        self.image_names.get(&id).map(String::as_str)
    }

    pub fn new_canvas(&self) -> PageCanvas {
        PageCanvas::new(self.page_height)
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    pub fn add_page(&mut self, canvas: PageCanvas) -> Result<(), RenderError> {
        let content = canvas.finish();
        let content_id = self
            .document
            .add_object(Stream::new(Dictionary::new(), content.encode()?));

        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                mm_to_pt(self.page_width).into(),
                mm_to_pt(self.page_height).into(),
            ],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        };
        let page_id = self.document.add_object(page_dict);
        self.page_ids.push(page_id);
        Ok(())
    }

    /// Links the page tree, compresses every stream and serializes the file.
    pub fn finish(mut self) -> Result<Vec<u8>, RenderError> {
        let mut resources = dictionary! { "Font" => self.fonts };
        if !self.xobjects.is_empty() {
            resources.set("XObject", self.xobjects);
        }
        self.document
            .objects
            .insert(self.resources_id, Object::Dictionary(resources));

        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
        self.document.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => self.page_ids.len() as i64,
            }),
        );

        self.document.compress();
        let mut bytes = Vec::new();
        self.document.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::canvas::TextSpec;
    use catalog_types::Color;
    use std::sync::Arc;

    fn tiny_image(alpha: Option<Vec<u8>>) -> LoadedImage {
        LoadedImage {
            width: 1,
            height: 1,
            rgb: vec![255, 0, 0],
            alpha,
            source: "/x.png".to_string(),
        }
    }

    #[test]
    fn empty_document_has_no_pages() {
        let doc = PdfDocument::new(297.0, 210.0, "Catálogo");
        assert_eq!(doc.page_count(), 0);
        let bytes = doc.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
    }

    #[test]
    fn pages_are_readable_back() {
        let mut doc = PdfDocument::new(297.0, 210.0, "Catálogo");
        for _ in 0..2 {
            let mut canvas = doc.new_canvas();
            canvas.text(TextSpec::new("Hola", 10.0, 10.0, FontFace::Bold, 12.0, Color::BLACK));
            doc.add_page(canvas).unwrap();
        }
        let bytes = doc.finish().unwrap();

        let parsed = Document::load_mem(&bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), 2);
    }

    #[test]
    fn images_get_stable_names_and_soft_masks() {
        let mut cache = ImageCache::new();
        cache.insert(9, Arc::new(tiny_image(Some(vec![0]))));
        cache.insert(2, Arc::new(tiny_image(None)));

        let mut doc = PdfDocument::new(297.0, 210.0, "t");
        doc.register_images(&cache);
        assert_eq!(doc.image_name(2), Some("Im2"));
        assert_eq!(doc.image_name(9), Some("Im9"));
        assert_eq!(doc.image_name(5), None);

        let bytes = doc.finish().unwrap();
        let parsed = Document::load_mem(&bytes).unwrap();
        let masks = parsed
            .objects
            .values()
            .filter_map(|o| o.as_stream().ok())
            .filter(|s| s.dict.get(b"SMask").is_ok())
            .count();
        assert_eq!(masks, 1);
    }
}
