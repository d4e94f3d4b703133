//! Basic geometry types shared by the scene graph and input code

use serde::Serialize;

/// A point in the global layout coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl PointF {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Geometry {
    /// X position
    pub x: i32,
    /// Y position
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl Geometry {
    /// Create a new rectangle
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the point lies inside the rectangle (right and bottom edges excluded)
    pub fn contains(&self, at: PointF) -> bool {
        let x = f64::from(self.x);
        let y = f64::from(self.y);
        at.x >= x
            && at.y >= y
            && at.x < x + f64::from(self.width)
            && at.y < y + f64::from(self.height)
    }

    /// Translate a global point into coordinates relative to the rectangle origin
    pub fn to_local(&self, at: PointF) -> PointF {
        PointF::new(at.x - f64::from(self.x), at.y - f64::from(self.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_edges() {
        let g = Geometry::new(10, 10, 100, 50);
        assert!(g.contains(PointF::new(10.0, 10.0)));
        assert!(g.contains(PointF::new(109.5, 59.5)));
        assert!(!g.contains(PointF::new(110.0, 20.0)));
        assert!(!g.contains(PointF::new(20.0, 60.0)));
        assert!(!g.contains(PointF::new(9.9, 20.0)));
    }

    #[test]
    fn test_empty_geometry_contains_nothing() {
        let g = Geometry::default();
        assert!(!g.contains(PointF::new(0.0, 0.0)));
    }

    #[test]
    fn test_to_local() {
        let g = Geometry::new(100, 200, 10, 10);
        assert_eq!(g.to_local(PointF::new(105.0, 202.5)), PointF::new(5.0, 2.5));
    }
}
