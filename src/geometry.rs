use serde::{Deserialize, Serialize};

/// Screen-space rectangle handed to the drawing layer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Shrink by `padding` on every side, flooring the size at zero.
    pub fn shrink(&self, padding: Padding) -> Rect {
        Rect {
            x: self.x + padding.left,
            y: self.y + padding.top,
            width: (self.width - padding.horizontal()).max(0.0),
            height: (self.height - padding.vertical()).max(0.0),
        }
    }
}

/// Four-sided inset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Padding {
    pub const ZERO: Padding = Padding::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Uniform padding on all sides.
    pub const fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Left and right only.
    pub const fn horizontal_only(x: f32) -> Self {
        Self::new(x, 0.0, x, 0.0)
    }

    /// Top and bottom only.
    pub const fn vertical_only(y: f32) -> Self {
        Self::new(0.0, y, 0.0, y)
    }

    pub const fn left_only(x: f32) -> Self {
        Self::new(x, 0.0, 0.0, 0.0)
    }

    pub const fn right_only(x: f32) -> Self {
        Self::new(0.0, 0.0, x, 0.0)
    }

    /// Total horizontal padding.
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical padding.
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    pub fn is_zero(&self) -> bool {
        *self == Padding::ZERO
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shrink_applies_each_side() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        let inner = rect.shrink(Padding::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(inner, Rect::new(11.0, 22.0, 96.0, 44.0));
    }

    #[test]
    fn shrink_floors_at_zero() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let inner = rect.shrink(Padding::all(8.0));
        assert_eq!(inner.width, 0.0);
        assert_eq!(inner.height, 0.0);
        assert_eq!(inner.x, 8.0);
    }

    #[test]
    fn axis_helpers() {
        assert_eq!(Padding::horizontal_only(5.0), Padding::new(5.0, 0.0, 5.0, 0.0));
        assert_eq!(Padding::vertical_only(5.0), Padding::new(0.0, 5.0, 0.0, 5.0));
        assert_eq!(Padding::left_only(3.0).horizontal(), 3.0);
        assert_eq!(Padding::right_only(3.0).right, 3.0);
        assert!(Padding::ZERO.is_zero());
    }
}
