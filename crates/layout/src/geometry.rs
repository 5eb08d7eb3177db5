//! Fixed table geometry of the catalog page.
//!
//! Every length is in millimetres, measured from the top-left corner.

use crate::LayoutError;
use catalog_types::geometry::Rect;
use serde::{Deserialize, Serialize};

const EPSILON: f32 = 0.01;

/// The six table columns, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Image,
    Product,
    Brand,
    Category,
    Flavors,
    Price,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Image,
        Column::Product,
        Column::Brand,
        Column::Category,
        Column::Flavors,
        Column::Price,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn header_label(self) -> &'static str {
        match self {
            Column::Image => "Imagen",
            Column::Product => "Producto",
            Column::Brand => "Marca",
            Column::Category => "Categoría",
            Column::Flavors => "Sabores",
            Column::Price => "Precio",
        }
    }
}

/// Page and table dimensions in millimetres.
///
/// `rows_per_page` only budgets rows against the space between `top_margin`
/// and `bottom_band`; the table header has to fit in whatever that leaves
/// over. `validate` rejects a row height whose full page of rows plus the
/// table header crosses the bottom band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub left_margin: f32,
    /// Where the table header starts on every page.
    pub top_margin: f32,
    pub header_band_height: f32,
    pub footer_band_height: f32,
    /// Space reserved at the bottom of the page that rows may not cross.
    pub bottom_band: f32,
    pub table_header_height: f32,
    pub row_height: f32,
    pub column_widths: [f32; 6],
    pub image_size: f32,
}

impl Default for PageGeometry {
    /// A4 landscape.
    fn default() -> Self {
        Self {
            page_width: 297.0,
            page_height: 210.0,
            left_margin: 10.0,
            top_margin: 30.0,
            header_band_height: 25.0,
            footer_band_height: 12.0,
            bottom_band: 15.0,
            table_header_height: 15.0,
            row_height: 25.0,
            column_widths: [30.0, 80.0, 25.0, 25.0, 60.0, 30.0],
            image_size: 20.0,
        }
    }
}

impl PageGeometry {
    /// `floor((page_height - top_margin - bottom_band) / row_height)`.
    pub fn rows_per_page(&self) -> Result<usize, LayoutError> {
        let scalars = [
            ("page_height", self.page_height),
            ("top_margin", self.top_margin),
            ("bottom_band", self.bottom_band),
            ("row_height", self.row_height),
        ];
        for (name, value) in scalars {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::DegenerateGeometry(format!(
                    "{} must be a finite, non-negative length (got {})",
                    name, value
                )));
            }
        }
        if self.row_height <= 0.0 {
            return Err(LayoutError::DegenerateGeometry(
                "row_height must be positive".to_string(),
            ));
        }

        let usable = self.page_height - self.top_margin - self.bottom_band;
        let rows = (usable / self.row_height).floor();
        if rows < 1.0 {
            return Err(LayoutError::DegenerateGeometry(format!(
                "no {}mm row fits in the {:.2}mm between top margin and bottom band",
                self.row_height, usable
            )));
        }
        Ok(rows as usize)
    }

    /// Checks that a full page (table header plus `rows_per_page` rows) fits
    /// above the bottom band and that the table fits the page width.
    ///
    /// Returns the validated rows-per-page figure.
    pub fn validate(&self) -> Result<usize, LayoutError> {
        let rows = self.rows_per_page()?;
        if rows < 2 {
            return Err(LayoutError::DegenerateGeometry(format!(
                "the first page needs the table header row plus at least one record row, \
                 but only {} row fits",
                rows
            )));
        }

        let lengths = [
            self.page_width,
            self.left_margin,
            self.header_band_height,
            self.footer_band_height,
            self.table_header_height,
            self.image_size,
        ];
        if lengths
            .iter()
            .chain(self.column_widths.iter())
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(LayoutError::DegenerateGeometry(
                "lengths must be finite and non-negative".to_string(),
            ));
        }

        let table_right = self.left_margin + self.table_width();
        if table_right > self.page_width + EPSILON {
            return Err(LayoutError::GeometryOverflow {
                what: "table width",
                required: table_right,
                available: self.page_width,
            });
        }

        if self.header_band_height > self.top_margin + EPSILON {
            return Err(LayoutError::GeometryOverflow {
                what: "header band",
                required: self.header_band_height,
                available: self.top_margin,
            });
        }

        let page_bottom = self.first_row_y() + rows as f32 * self.row_height;
        if page_bottom > self.content_limit() + EPSILON {
            return Err(LayoutError::GeometryOverflow {
                what: "table header and rows",
                required: page_bottom - self.top_margin,
                available: self.content_limit() - self.top_margin,
            });
        }

        let image_cell = self.column_widths[Column::Image.index()];
        if self.image_size > image_cell.min(self.row_height) + EPSILON {
            return Err(LayoutError::GeometryOverflow {
                what: "image medallion",
                required: self.image_size,
                available: image_cell.min(self.row_height),
            });
        }

        Ok(rows)
    }

    pub fn table_width(&self) -> f32 {
        self.column_widths.iter().sum()
    }

    /// y of the first data row on any page.
    pub fn first_row_y(&self) -> f32 {
        self.top_margin + self.table_header_height
    }

    /// Rows must end at or above this y.
    pub fn content_limit(&self) -> f32 {
        self.page_height - self.bottom_band
    }

    pub fn column_x(&self, column: Column) -> f32 {
        self.left_margin
            + self.column_widths[..column.index()]
                .iter()
                .sum::<f32>()
    }

    pub fn column_width(&self, column: Column) -> f32 {
        self.column_widths[column.index()]
    }

    /// The cell of `column` in the band starting at `y` with the given height.
    pub fn cell_rect(&self, column: Column, y: f32, height: f32) -> Rect {
        Rect::new(self.column_x(column), y, self.column_width(column), height)
    }

    /// Full-width band of the table starting at `y`.
    pub fn band_rect(&self, y: f32, height: f32) -> Rect {
        Rect::new(self.left_margin, y, self.table_width(), height)
    }

    /// x positions of the separators between adjacent columns.
    pub fn separator_xs(&self) -> impl Iterator<Item = f32> + '_ {
        Column::ALL[1..].iter().map(|c| self.column_x(*c))
    }
}
