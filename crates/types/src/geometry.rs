//! Page-space primitives. All values are millimetres measured from the
//! top-left corner of the page, y growing downwards.

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// A square of side `size` centered inside this rectangle.
    pub fn centered_square(&self, size: f32) -> Rect {
        Rect {
            x: self.x + (self.width - size) / 2.0,
            y: self.y + (self.height - size) / 2.0,
            width: size,
            height: size,
        }
    }

    /// Shrinks the rectangle horizontally by `inset` on both sides.
    pub fn inset_x(&self, inset: f32) -> Rect {
        Rect {
            x: self.x + inset,
            width: (self.width - 2.0 * inset).max(0.0),
            ..*self
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Scale factor that makes `self` cover a `target` square completely.
    pub fn cover_scale(&self, target: f32) -> f32 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return 0.0;
        }
        (target / self.width).max(target / self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_square_is_centered() {
        let cell = Rect::new(10.0, 40.0, 30.0, 25.0);
        let square = cell.centered_square(20.0);
        assert_eq!(square, Rect::new(15.0, 42.5, 20.0, 20.0));
        assert_eq!(square.center_x(), cell.center_x());
        assert_eq!(square.center_y(), cell.center_y());
    }

    #[test]
    fn inset_never_goes_negative() {
        let narrow = Rect::new(0.0, 0.0, 6.0, 10.0).inset_x(4.0);
        assert_eq!(narrow.x, 4.0);
        assert_eq!(narrow.width, 0.0);
    }

    #[test]
    fn cover_scale_fills_the_short_side() {
        let landscape = Size::new(200.0, 100.0);
        assert_eq!(landscape.cover_scale(20.0), 0.2);
        assert_eq!(Size::new(0.0, 0.0).cover_scale(20.0), 0.0);
    }
}
