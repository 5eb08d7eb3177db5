use super::artifact::ExportArtifact;
use crate::config::ExportConfig;
use crate::error::{ExportError, RenderError};
use crate::images::ImageCache;
use crate::render::{PageCanvas, PageRenderer, PdfDocument, RowImage};
use catalog_layout::{PageGeometry, PagePlan};
use catalog_types::Record;
use log::debug;

const FIT_EPSILON: f32 = 0.01;

/// Where the next row will be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    /// 1-based page number.
    pub page: usize,
    pub y: f32,
    pub rows_on_page: usize,
}

impl LayoutCursor {
    pub fn top_of_page(page: usize, geometry: &PageGeometry) -> Self {
        Self { page, y: geometry.first_row_y(), rows_on_page: 0 }
    }

    /// True when the next row cannot go on the current page, either because
    /// the planned capacity is used up or because it would cross into the
    /// footer band.
    pub fn needs_break(&self, plan: &PagePlan, geometry: &PageGeometry) -> bool {
        self.rows_on_page >= plan.capacity(self.page)
            || self.y + geometry.row_height > geometry.content_limit() + FIT_EPSILON
    }

    fn advance(&mut self, row_height: f32) {
        self.y += row_height;
        self.rows_on_page += 1;
    }
}

/// Lays records out into table pages and serializes the PDF.
///
/// Records must already be in export order and every image the rows should
/// show must already be in the cache; nothing here touches the network or disk.
pub struct DocumentAssembler<'a> {
    config: &'a ExportConfig,
    generated_on: String,
}

impl<'a> DocumentAssembler<'a> {
    pub fn new(config: &'a ExportConfig, generated_on: impl Into<String>) -> Self {
        Self { config, generated_on: generated_on.into() }
    }

    pub fn assemble(
        &self,
        records: &[Record],
        images: &ImageCache,
    ) -> Result<ExportArtifact, ExportError> {
        let geometry = &self.config.geometry;
        let plan = PagePlan::for_geometry(geometry, records.len())?;
        let renderer = PageRenderer::new(self.config, self.generated_on.clone());

        let mut document =
            PdfDocument::new(geometry.page_width, geometry.page_height, &self.config.branding.title);
        document.register_images(images);

        let mut canvas = Self::open_page(&document, &renderer);
        let mut cursor = LayoutCursor::top_of_page(1, geometry);
        let mut page_rows = Vec::with_capacity(plan.total_pages());
        let mut page_breaks = 0;

        for (index, record) in records.iter().enumerate() {
            if cursor.needs_break(&plan, geometry) {
                renderer.draw_footer(&mut canvas, cursor.page, plan.total_pages());
                page_rows.push(cursor.rows_on_page);
                let finished = std::mem::replace(&mut canvas, Self::open_page(&document, &renderer));
                document.add_page(finished)?;

                cursor = LayoutCursor::top_of_page(cursor.page + 1, geometry);
                page_breaks += 1;
                debug!("Row {} starts page {}", index, cursor.page);
            }

            let image = match record.cache_key().and_then(|id| images.get(&id).map(|img| (id, img))) {
                Some((id, loaded)) => {
                    let name = document.image_name(id).ok_or(RenderError::UnknownImage(id))?;
                    Some(RowImage { name, size: loaded.size() })
                }
                None => None,
            };
            renderer.draw_row(&mut canvas, record, index, cursor.y, image);
            cursor.advance(geometry.row_height);
        }

        renderer.draw_footer(&mut canvas, cursor.page, plan.total_pages());
        page_rows.push(cursor.rows_on_page);
        document.add_page(canvas)?;

        plan.verify(document.page_count())?;
        let page_count = document.page_count();
        debug!("Assembled {} rows on {} pages", records.len(), page_count);

        Ok(ExportArtifact {
            file_name: self.config.branding.file_name.clone(),
            bytes: document.finish()?,
            page_count,
            page_breaks,
            rows_rendered: records.len(),
            page_rows,
        })
    }

    fn open_page(document: &PdfDocument, renderer: &PageRenderer<'_>) -> PageCanvas {
        let mut canvas = document.new_canvas();
        renderer.draw_header(&mut canvas);
        renderer.draw_table_header(&mut canvas);
        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::LoadedImage;
    use catalog_layout::LayoutError;
    use catalog_types::Category;
    use std::sync::Arc;

    fn records(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record::new(i as u32 + 1, format!("Producto {}", i + 1), "Marca", Category::Proteina, 1000.0))
            .collect()
    }

    fn assemble(config: &ExportConfig, n: usize) -> Result<ExportArtifact, ExportError> {
        DocumentAssembler::new(config, "1 de enero de 2026").assemble(&records(n), &ImageCache::new())
    }

    #[test]
    fn first_page_loses_one_row_to_the_header() {
        let config = ExportConfig::default();
        let artifact = assemble(&config, 12).unwrap();
        assert_eq!(artifact.page_count, 3);
        assert_eq!(artifact.page_rows, vec![5, 6, 1]);
        assert_eq!(artifact.page_breaks, 2);
        assert_eq!(artifact.rows_rendered, 12);
    }

    #[test]
    fn empty_catalog_is_one_page() {
        let artifact = assemble(&ExportConfig::default(), 0).unwrap();
        assert_eq!(artifact.page_count, 1);
        assert_eq!(artifact.page_rows, vec![0]);
        assert!(artifact.bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn degenerate_geometry_is_rejected() {
        let mut config = ExportConfig::default();
        config.geometry.row_height = 500.0;
        let err = assemble(&config, 3).unwrap_err();
        assert!(matches!(err, ExportError::Layout(LayoutError::DegenerateGeometry(_))));
    }

    #[test]
    fn cursor_breaks_on_capacity() {
        let geometry = PageGeometry::default();
        let plan = PagePlan::new(6, 20).unwrap();
        let mut cursor = LayoutCursor::top_of_page(1, &geometry);
        assert!(!cursor.needs_break(&plan, &geometry));
        for _ in 0..5 {
            cursor.advance(geometry.row_height);
        }
        assert!(cursor.needs_break(&plan, &geometry));

        let second = LayoutCursor::top_of_page(2, &geometry);
        assert!(!second.needs_break(&plan, &geometry));
    }

    #[test]
    fn cached_images_are_drawn() {
        let image = LoadedImage {
            width: 1,
            height: 1,
            rgb: vec![0, 0, 0],
            alpha: None,
            source: "/a.png".to_string(),
        };
        let mut cache = ImageCache::new();
        cache.insert(1, Arc::new(image));

        let config = ExportConfig::default();
        let artifact = DocumentAssembler::new(&config, "hoy").assemble(&records(2), &cache).unwrap();

        let parsed = lopdf::Document::load_mem(&artifact.bytes).unwrap();
        let page_id = *parsed.get_pages().get(&1).unwrap();
        let content = parsed.get_and_decode_page_content(page_id).unwrap();
        let draws: Vec<_> = content
            .operations
            .iter()
            .filter(|op| op.operator == "Do")
            .collect();
        assert_eq!(draws.len(), 1);
    }
}
