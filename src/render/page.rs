use super::canvas::{PageCanvas, TextAlign, TextSpec};
use crate::config::ExportConfig;
use crate::format::format_price;
use catalog_layout::flavors::layout_flavor_lines;
use catalog_layout::text::metrics::text_width_mm;
use catalog_layout::{fit_to_width, truncate_chars, wrap_words, Column, FontFace};
use catalog_types::{Color, Rect, Record, Size};

const CELL_PADDING: f32 = 4.0;
const DESCRIPTION_MAX_CHARS: usize = 80;
const DESCRIPTION_MAX_LINES: usize = 2;
const DESCRIPTION_LINE_HEIGHT: f32 = 3.0;
const FLAVOR_MAX_LINES: usize = 3;
const FLAVOR_LINE_HEIGHT: f32 = 3.0;
pub const PRICE_BADGE_PADDING: f32 = 2.0;
const PRICE_BADGE_HEIGHT: f32 = 12.0;
const PRICE_BADGE_RADIUS: f32 = 2.0;
const HEADER_RULE_WIDTH: f32 = 0.5;
const FOOTER_RULE_WIDTH: f32 = 0.3;
const SEPARATOR_WIDTH: f32 = 0.1;
const MEDALLION_BORDER_WIDTH: f32 = 0.2;

/// The embedded image to paint in a row's medallion.
#[derive(Debug, Clone, Copy)]
pub struct RowImage<'a> {
    pub name: &'a str,
    pub size: Size,
}

/// Draws the fixed parts of a catalog page. Holds no per-page state.
pub struct PageRenderer<'a> {
    config: &'a ExportConfig,
    generated_on: String,
}

impl<'a> PageRenderer<'a> {
    pub fn new(config: &'a ExportConfig, generated_on: impl Into<String>) -> Self {
        Self {
            config,
            generated_on: generated_on.into(),
        }
    }

    /// Title, contact details and generation date across the top of the page.
    pub fn draw_header(&self, canvas: &mut PageCanvas) {
        let geometry = &self.config.geometry;
        let theme = &self.config.theme;
        let contact = &self.config.contact;
        let band = geometry.header_band_height;
        let right = geometry.page_width - 15.0;

        canvas.fill_rect(Rect::new(0.0, 0.0, geometry.page_width, band), theme.header_fill);
        canvas.line(
            (0.0, band),
            (geometry.page_width, band),
            Color::WHITE,
            HEADER_RULE_WIDTH,
        );

        canvas.text(TextSpec::new(
            &self.config.branding.title,
            15.0,
            band * 0.6,
            FontFace::Bold,
            20.0,
            theme.header_text,
        ));

        let contact_line = format!("Tel: {} | Email: {}", contact.phone, contact.email);
        let web_line = format!("Web: {}", contact.site_url);
        let date_line = format!("Generado el: {}", self.generated_on);
        let lines = [
            (contact_line.as_str(), band * 0.4, 9.0),
            (web_line.as_str(), band * 0.68, 9.0),
            (date_line.as_str(), band * 0.92, 8.0),
        ];
        for (text, y, size) in lines {
            canvas.text(
                TextSpec::new(text, right, y, FontFace::Regular, size, theme.header_text)
                    .align(TextAlign::Right),
            );
        }
    }

    /// The column label band at the top margin.
    pub fn draw_table_header(&self, canvas: &mut PageCanvas) {
        let geometry = &self.config.geometry;
        let theme = &self.config.theme;
        let band = geometry.band_rect(geometry.top_margin, geometry.table_header_height);

        canvas.fill_rect(band, theme.table_header_fill);
        canvas.line(
            (band.x, band.bottom()),
            (band.right(), band.bottom()),
            Color::WHITE,
            HEADER_RULE_WIDTH,
        );

        let middle = band.center_y();
        for column in Column::ALL {
            let cell = geometry.cell_rect(column, band.y, band.height);
            let (x, align) = if column == Column::Image {
                (cell.center_x(), TextAlign::Center)
            } else {
                (cell.x + CELL_PADDING, TextAlign::Left)
            };
            canvas.text(
                TextSpec::new(
                    column.header_label(),
                    x,
                    middle,
                    FontFace::Bold,
                    11.0,
                    theme.table_header_text,
                )
                .align(align)
                .middle(),
            );
        }
    }

    /// One record row starting at `y`. `row_index` counts rows across the
    /// whole document and selects the background shade.
    pub fn draw_row(
        &self,
        canvas: &mut PageCanvas,
        record: &Record,
        row_index: usize,
        y: f32,
        image: Option<RowImage<'_>>,
    ) {
        let geometry = &self.config.geometry;
        let theme = &self.config.theme;
        let height = geometry.row_height;
        let row = geometry.band_rect(y, height);
        let middle = row.center_y();

        let background = if row_index % 2 == 0 { theme.row_even } else { theme.row_odd };
        canvas.fill_rect(row, background);
        for x in geometry.separator_xs() {
            canvas.line((x, y), (x, row.bottom()), theme.separator, SEPARATOR_WIDTH);
        }
        canvas.line(
            (row.x, row.bottom()),
            (row.right(), row.bottom()),
            theme.separator,
            SEPARATOR_WIDTH,
        );

        if let Some(image) = image {
            let cell = geometry.cell_rect(Column::Image, y, height);
            let square = cell.centered_square(geometry.image_size);
            let radius = geometry.image_size / 2.0 + 1.0;
            canvas.fill_circle(square.center_x(), square.center_y(), radius, theme.medallion_fill);
            canvas.stroke_circle(
                square.center_x(),
                square.center_y(),
                radius,
                theme.medallion_border,
                MEDALLION_BORDER_WIDTH,
            );
            canvas.image_cover(image.name, image.size, square);
        }

        self.draw_product_cell(canvas, record, y);

        let brand = geometry.cell_rect(Column::Brand, y, height).inset_x(CELL_PADDING);
        let brand_text = fit_to_width(&record.brand, FontFace::Bold, 8.0, brand.width);
        canvas.text(
            TextSpec::new(&brand_text, brand.x, middle, FontFace::Bold, 8.0, theme.body_text).middle(),
        );

        let category = geometry.cell_rect(Column::Category, y, height).inset_x(CELL_PADDING);
        let label = fit_to_width(&record.category.label(), FontFace::Regular, 8.0, category.width);
        canvas.text(
            TextSpec::new(&label, category.x, middle, FontFace::Regular, 8.0, theme.body_text).middle(),
        );

        let flavors = geometry.cell_rect(Column::Flavors, y, height).inset_x(CELL_PADDING);
        let flavor_size = if record.flavors.is_empty() { 8.0 } else { 7.0 };
        let lines = layout_flavor_lines(
            &record.flavors,
            FontFace::Regular,
            flavor_size,
            flavors.width,
            FLAVOR_MAX_LINES,
        );
        let first = middle - (lines.len() as f32 - 1.0) * FLAVOR_LINE_HEIGHT / 2.0;
        for (i, line) in lines.iter().enumerate() {
            canvas.text(
                TextSpec::new(
                    line,
                    flavors.x,
                    first + i as f32 * FLAVOR_LINE_HEIGHT,
                    FontFace::Regular,
                    flavor_size,
                    theme.body_text,
                )
                .middle(),
            );
        }

        let price_cell = geometry.cell_rect(Column::Price, y, height);
        let price = format_price(record.price);
        let badge = price_badge_rect(&price, price_cell);
        canvas.fill_rounded_rect(badge, PRICE_BADGE_RADIUS, theme.price_badge);
        canvas.text(
            TextSpec::new(
                &price,
                badge.x + PRICE_BADGE_PADDING,
                middle,
                FontFace::Bold,
                10.0,
                theme.price_text,
            )
            .middle(),
        );
    }

    fn draw_product_cell(&self, canvas: &mut PageCanvas, record: &Record, y: f32) {
        let geometry = &self.config.geometry;
        let theme = &self.config.theme;
        let cell = geometry
            .cell_rect(Column::Product, y, geometry.row_height)
            .inset_x(CELL_PADDING);

        let name = fit_to_width(&record.product, FontFace::Bold, 10.0, cell.width);
        canvas.text(TextSpec::new(&name, cell.x, y + 6.0, FontFace::Bold, 10.0, theme.product_text));

        if let Some(description) = record.description() {
            let short = truncate_chars(description, DESCRIPTION_MAX_CHARS);
            let lines = wrap_words(
                &short,
                FontFace::Regular,
                7.0,
                cell.width,
                DESCRIPTION_MAX_LINES,
            );
            for (i, line) in lines.iter().enumerate() {
                canvas.text(TextSpec::new(
                    line,
                    cell.x,
                    y + 12.0 + i as f32 * DESCRIPTION_LINE_HEIGHT,
                    FontFace::Regular,
                    7.0,
                    theme.description_text,
                ));
            }
        }
    }

    /// Page number, WhatsApp shortcut and site URL along the bottom edge.
    pub fn draw_footer(&self, canvas: &mut PageCanvas, page: usize, total_pages: usize) {
        let geometry = &self.config.geometry;
        let theme = &self.config.theme;
        let contact = &self.config.contact;
        let top = geometry.page_height - geometry.footer_band_height;
        let baseline = geometry.page_height - 5.0;

        canvas.fill_rect(
            Rect::new(0.0, top, geometry.page_width, geometry.footer_band_height),
            theme.footer_fill,
        );
        canvas.line((0.0, top), (geometry.page_width, top), theme.footer_rule, FOOTER_RULE_WIDTH);

        let page_label = format!("Página {} de {}", page, total_pages);
        let whatsapp = format!("WhatsApp: {}", contact.whatsapp);
        let entries = [
            (page_label.as_str(), 10.0, TextAlign::Left),
            (whatsapp.as_str(), geometry.page_width / 2.0, TextAlign::Center),
            (contact.site_url.as_str(), geometry.page_width - 10.0, TextAlign::Right),
        ];
        for (text, x, align) in entries {
            canvas.text(
                TextSpec::new(text, x, baseline, FontFace::Bold, 8.0, theme.footer_text).align(align),
            );
        }
    }
}

/// The highlight behind a formatted price inside `cell`: measured text width
/// plus padding on both sides, vertically centered.
pub fn price_badge_rect(price_text: &str, cell: Rect) -> Rect {
    let text_width = text_width_mm(price_text, FontFace::Bold, 10.0);
    Rect::new(
        cell.x + PRICE_BADGE_PADDING,
        cell.center_y() - PRICE_BADGE_HEIGHT / 2.0,
        text_width + 2.0 * PRICE_BADGE_PADDING,
        PRICE_BADGE_HEIGHT,
    )
}
