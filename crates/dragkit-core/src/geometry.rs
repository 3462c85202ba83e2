//! Geometry and collision utilities backing all hit-testing.
//!
//! Everything here is a pure function of its inputs; the engine's stateful
//! parts (coordinator, controllers) live elsewhere and call into this module.

use crate::math::Vec2;

/// An axis-aligned rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from a top-left origin and extents.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from top-left origin and size vectors.
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.x,
            height: size.y,
        }
    }

    /// Top-left corner.
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Width/height as a vector.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Geometric center of the rectangle.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Area of the rectangle. Zero for degenerate rectangles.
    pub fn area(&self) -> f32 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return 0.0;
        }
        self.width * self.height
    }

    /// Check if a point lies within the rectangle.
    ///
    /// Edges count as inside; a zero-area rectangle contains nothing.
    pub fn contains(&self, point: Vec2) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 {
            return false;
        }
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Check if two rectangles overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.intersection(other).is_some()
    }

    /// The overlapping region of two rectangles, if any.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = (self.x + self.width).min(other.x + other.width);
        let bottom = (self.y + self.height).min(other.y + other.height);
        if right <= x || bottom <= y {
            return None;
        }
        Some(Rect::new(x, y, right - x, bottom - y))
    }

    /// How much of `self` is covered by `other`, as a 0.0-1.0 ratio.
    ///
    /// Defined as intersection area divided by the area of `self`. Returns
    /// 0.0 when `self` is degenerate. Backs best-overlap drop strategies.
    pub fn intersection_ratio(&self, other: &Rect) -> f32 {
        let area = self.area();
        if area <= 0.0 {
            return 0.0;
        }
        self.intersection(other)
            .map_or(0.0, |overlap| overlap.area() / area)
    }

    /// Distance between the centers of two rectangles.
    pub fn center_distance(&self, other: &Rect) -> f32 {
        distance(self.center(), other.center())
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Offset that moves `from` onto `to`.
pub fn delta(from: Vec2, to: Vec2) -> Vec2 {
    to - from
}
