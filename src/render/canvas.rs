use super::{flip_y, mm_to_pt};
use catalog_layout::text::metrics::{text_width_mm, to_win_ansi, FontFace};
use catalog_types::{Color, Rect, Size};
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};

/// Bezier control distance for a quarter circle of radius 1.
const KAPPA: f32 = 0.552_284_8;

/// Ratio of the distance from the visual middle of a line of text to its
/// baseline, relative to the font size (half of Helvetica's cap height).
const MIDDLE_TO_BASELINE: f32 = 0.359;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// A text run in page space. `y` is the baseline unless `middle` is set, in
/// which case it is the vertical middle of the glyphs.
#[derive(Debug, Clone, Copy)]
pub struct TextSpec<'a> {
    pub text: &'a str,
    pub x: f32,
    pub y: f32,
    pub face: FontFace,
    pub size_pt: f32,
    pub color: Color,
    pub align: TextAlign,
    pub middle: bool,
}

impl<'a> TextSpec<'a> {
    pub fn new(text: &'a str, x: f32, y: f32, face: FontFace, size_pt: f32, color: Color) -> Self {
        Self {
            text,
            x,
            y,
            face,
            size_pt,
            color,
            align: TextAlign::Left,
            middle: false,
        }
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn middle(mut self) -> Self {
        self.middle = true;
        self
    }
}

#[derive(Default, Clone)]
struct CanvasState {
    font: Option<(FontFace, f32)>,
    fill_color: Option<Color>,
    stroke_color: Option<Color>,
    line_width: Option<f32>,
}

/// Records drawing operations for one page.
///
/// Callers work in millimetres from the top-left corner; the canvas converts
/// to PDF points with the origin at the bottom-left.
pub struct PageCanvas {
    page_height: f32,
    content: Content,
    state: CanvasState,
}

impl PageCanvas {
    pub fn new(page_height_mm: f32) -> Self {
        Self {
            page_height: page_height_mm,
            content: Content { operations: vec![] },
            state: CanvasState::default(),
        }
    }

    pub fn finish(self) -> Content {
        self.content
    }

    pub fn operations(&self) -> &[Operation] {
        &self.content.operations
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn point(&self, x: f32, y: f32) -> (f32, f32) {
        (mm_to_pt(x), flip_y(y, self.page_height))
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            let [r, g, b] = color.unit_components();
            self.push("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill_color = Some(color);
        }
    }

    fn set_stroke(&mut self, color: Color, width_mm: f32) {
        if self.state.stroke_color != Some(color) {
            let [r, g, b] = color.unit_components();
            self.push("RG", vec![r.into(), g.into(), b.into()]);
            self.state.stroke_color = Some(color);
        }
        if self.state.line_width != Some(width_mm) {
            self.push("w", vec![mm_to_pt(width_mm).into()]);
            self.state.line_width = Some(width_mm);
        }
    }

    fn set_font(&mut self, face: FontFace, size_pt: f32) {
        if self.state.font != Some((face, size_pt)) {
            self.push(
                "Tf",
                vec![Object::Name(face.resource_name().as_bytes().to_vec()), size_pt.into()],
            );
            self.state.font = Some((face, size_pt));
        }
    }

    fn append_rect(&mut self, rect: Rect) {
        let (x, y) = self.point(rect.x, rect.bottom());
        self.push(
            "re",
            vec![
                x.into(),
                y.into(),
                mm_to_pt(rect.width).into(),
                mm_to_pt(rect.height).into(),
            ],
        );
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.set_fill_color(color);
        self.append_rect(rect);
        self.push("f", vec![]);
    }

    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Color, width_mm: f32) {
        self.set_stroke(color, width_mm);
        let (x1, y1) = self.point(from.0, from.1);
        let (x2, y2) = self.point(to.0, to.1);
        self.push("m", vec![x1.into(), y1.into()]);
        self.push("l", vec![x2.into(), y2.into()]);
        self.push("S", vec![]);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        let (px, py) = self.point(x, y);
        self.push("m", vec![px.into(), py.into()]);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (px, py) = self.point(x, y);
        self.push("l", vec![px.into(), py.into()]);
    }

    fn curve_to(&mut self, c1: (f32, f32), c2: (f32, f32), end: (f32, f32)) {
        let (x1, y1) = self.point(c1.0, c1.1);
        let (x2, y2) = self.point(c2.0, c2.1);
        let (x3, y3) = self.point(end.0, end.1);
        self.push(
            "c",
            vec![x1.into(), y1.into(), x2.into(), y2.into(), x3.into(), y3.into()],
        );
    }

    fn append_circle(&mut self, cx: f32, cy: f32, r: f32) {
        let k = r * KAPPA;
        self.move_to(cx + r, cy);
        self.curve_to((cx + r, cy + k), (cx + k, cy + r), (cx, cy + r));
        self.curve_to((cx - k, cy + r), (cx - r, cy + k), (cx - r, cy));
        self.curve_to((cx - r, cy - k), (cx - k, cy - r), (cx, cy - r));
        self.curve_to((cx + k, cy - r), (cx + r, cy - k), (cx + r, cy));
        self.push("h", vec![]);
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: Color) {
        self.set_fill_color(color);
        self.append_circle(cx, cy, r);
        self.push("f", vec![]);
    }

    pub fn stroke_circle(&mut self, cx: f32, cy: f32, r: f32, color: Color, width_mm: f32) {
        self.set_stroke(color, width_mm);
        self.append_circle(cx, cy, r);
        self.push("S", vec![]);
    }

    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        let r = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
        let k = r * KAPPA;
        let (left, top, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());

        self.set_fill_color(color);
        self.move_to(left + r, top);
        self.line_to(right - r, top);
        self.curve_to((right - r + k, top), (right, top + r - k), (right, top + r));
        self.line_to(right, bottom - r);
        self.curve_to((right, bottom - r + k), (right - r + k, bottom), (right - r, bottom));
        self.line_to(left + r, bottom);
        self.curve_to((left + r - k, bottom), (left, bottom - r + k), (left, bottom - r));
        self.line_to(left, top + r);
        self.curve_to((left, top + r - k), (left + r - k, top), (left + r, top));
        self.push("h", vec![]);
        self.push("f", vec![]);
    }

    /// Draws `text` and returns its measured width in millimetres.
    pub fn text(&mut self, spec: TextSpec<'_>) -> f32 {
        let width = text_width_mm(spec.text, spec.face, spec.size_pt);
        if spec.text.trim().is_empty() {
            return width;
        }

        let x = match spec.align {
            TextAlign::Left => spec.x,
            TextAlign::Center => spec.x - width / 2.0,
            TextAlign::Right => spec.x - width,
        };
        let baseline = if spec.middle {
            spec.y + spec.size_pt * MIDDLE_TO_BASELINE * 25.4 / 72.0
        } else {
            spec.y
        };
        let (px, py) = self.point(x, baseline);

        self.push("BT", vec![]);
        self.set_font(spec.face, spec.size_pt);
        self.set_fill_color(spec.color);
        self.push("Td", vec![px.into(), py.into()]);
        self.push(
            "Tj",
            vec![Object::String(to_win_ansi(spec.text), StringFormat::Literal)],
        );
        self.push("ET", vec![]);
        width
    }

    /// Paints the image XObject `name` so it covers `square` completely,
    /// clipping whatever overflows.
    pub fn image_cover(&mut self, name: &str, image: Size, square: Rect) {
        let scale = image.cover_scale(square.width.max(square.height));
        if scale <= 0.0 {
            return;
        }
        let drawn_w = image.width * scale;
        let drawn_h = image.height * scale;
        let drawn = Rect::new(
            square.center_x() - drawn_w / 2.0,
            square.center_y() - drawn_h / 2.0,
            drawn_w,
            drawn_h,
        );

        self.push("q", vec![]);
        self.append_rect(square);
        self.push("W", vec![]);
        self.push("n", vec![]);
        let (x, y) = self.point(drawn.x, drawn.bottom());
        self.push(
            "cm",
            vec![
                mm_to_pt(drawn.width).into(),
                0.into(),
                0.into(),
                mm_to_pt(drawn.height).into(),
                x.into(),
                y.into(),
            ],
        );
        self.push("Do", vec![Object::Name(name.as_bytes().to_vec())]);
        self.push("Q", vec![]);
        // q/Q restores graphics state but not our cached copy of it
        self.state.fill_color = None;
        self.state.stroke_color = None;
        self.state.line_width = None;
    }
}
