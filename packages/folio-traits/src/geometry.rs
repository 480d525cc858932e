use serde::{Deserialize, Serialize};

/// A point
#[derive(Clone, Debug, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point<T> {
    /// The x coordinate
    pub x: T,
    /// The y coordinate
    pub y: T,
}

impl Point<f64> {
    pub const ZERO: Self = Point { x: 0.0, y: 0.0 };
}

/// An axis-aligned rectangle in CSS pixels.
///
/// Rectangles reported by the host are in viewport coordinates (the same space as
/// `Element.getBoundingClientRect()`), so they move when the page scrolls.
#[derive(Clone, Debug, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const ZERO: Self = Rect {
        left: 0.0,
        top: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// The horizontal centre of the rectangle
    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 && self.height <= 0.0
    }

    /// The smallest rectangle containing both `self` and `other`
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        Rect {
            left,
            top,
            width: self.right().max(other.right()) - left,
            height: self.bottom().max(other.bottom()) - top,
        }
    }

    pub fn contains(&self, point: Point<f64>) -> bool {
        point.x >= self.left
            && point.x < self.right()
            && point.y >= self.top
            && point.y < self.bottom()
    }
}

#[test]
fn union_covers_both_rects() {
    let a = Rect::new(10.0, 10.0, 20.0, 5.0);
    let b = Rect::new(0.0, 30.0, 5.0, 5.0);
    assert_eq!(a.union(&b), Rect::new(0.0, 10.0, 30.0, 25.0));
}
