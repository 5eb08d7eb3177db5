use lopdf::content::Content;
use lopdf::{Document as LopdfDocument, Object};
use std::collections::BTreeSet;

fn page_content(doc: &LopdfDocument, page_num: u32) -> Option<Content> {
    let page_id = *doc.get_pages().get(&page_num)?;
    doc.get_and_decode_page_content(page_id).ok()
}

/// Every `Tj` string on a page, in drawing order.
///
/// The export uses WinAnsi-encoded base fonts, so each byte maps back to the
/// Latin-1 character with the same code for the accented letters it emits.
pub fn page_strings(doc: &LopdfDocument, page_num: u32) -> Vec<String> {
    let Some(content) = page_content(doc, page_num) else {
        return Vec::new();
    };
    content
        .operations
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| match op.operands.first() {
            Some(Object::String(bytes, _)) => Some(bytes.iter().map(|b| *b as char).collect()),
            _ => None,
        })
        .collect()
}

/// Extract all text content from a PDF document, one line per string.
pub fn extract_text(doc: &LopdfDocument) -> String {
    let pages = doc.get_pages();
    let mut text = String::new();
    for page_num in 1..=pages.len() as u32 {
        for s in page_strings(doc, page_num) {
            text.push_str(&s);
            text.push('\n');
        }
    }
    text
}

/// Number of image XObjects painted on a page.
pub fn image_draw_count(doc: &LopdfDocument, page_num: u32) -> usize {
    page_content(doc, page_num)
        .map(|c| c.operations.iter().filter(|op| op.operator == "Do").count())
        .unwrap_or(0)
}

/// Base font names of every font object in the file.
pub fn extract_font_names(doc: &LopdfDocument) -> Vec<String> {
    let mut fonts = BTreeSet::new();
    for object in doc.objects.values() {
        let Ok(dict) = object.as_dict() else { continue };
        let is_font = dict
            .get(b"Type")
            .and_then(Object::as_name)
            .map(|name| name == b"Font")
            .unwrap_or(false);
        if !is_font {
            continue;
        }
        if let Ok(base_font) = dict.get(b"BaseFont").and_then(Object::as_name) {
            fonts.insert(String::from_utf8_lossy(base_font).to_string());
        }
    }
    fonts.into_iter().collect()
}

/// Page width and height in points, from the page's MediaBox.
pub fn get_page_dimensions(doc: &LopdfDocument, page_num: u32) -> Option<(f32, f32)> {
    let page_id = *doc.get_pages().get(&page_num)?;
    let page = doc.get_object(page_id).ok()?.as_dict().ok()?;
    let media_box = page.get(b"MediaBox").ok()?.as_array().ok()?;
    let number = |o: &Object| o.as_float().ok().or_else(|| o.as_i64().ok().map(|v| v as f32));
    let width = number(media_box.get(2)?)? - number(media_box.first()?)?;
    let height = number(media_box.get(3)?)? - number(media_box.get(1)?)?;
    Some((width, height))
}

/// Assert that PDF contains specific text
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert that PDF does NOT contain specific text
#[macro_export]
macro_rules! assert_pdf_not_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            !extracted.contains($text),
            "PDF should NOT contain '{}', but it was found in:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

/// Assert that PDF contains a font matching a pattern
#[macro_export]
macro_rules! assert_pdf_has_font {
    ($pdf:expr, $pattern:expr) => {
        let fonts = $crate::common::pdf_assertions::extract_font_names(&$pdf.doc);
        assert!(
            fonts.iter().any(|f| f.contains($pattern)),
            "PDF should have a font matching '{}', found: {:?}",
            $pattern,
            fonts
        );
    };
}
