use egui::{Pos2, Vec2};

/// Axis-aligned rectangle in canvas pixel coordinates.
///
/// Stored in corner form (`x1 < x2`, `y1 < y2` after normalization). The live
/// selection reads and writes the same value through the origin+extent
/// accessors, so the two forms cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Rectangle {
    /// Builds a rectangle from two arbitrary corners, swapping them as needed.
    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    /// Origin+extent form: `x2 = x + width`, `y2 = y + height`.
    pub fn from_origin_size(origin: Pos2, size: Vec2) -> Self {
        Self::from_corners(origin.x, origin.y, origin.x + size.x, origin.y + size.y)
    }

    pub fn x(&self) -> f32 {
        self.x1
    }

    pub fn y(&self) -> f32 {
        self.y1
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    pub fn origin(&self) -> Pos2 {
        Pos2::new(self.x1, self.y1)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    pub fn center(&self) -> Pos2 {
        Pos2::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, point: Pos2) -> bool {
        point.x >= self.x1 && point.x <= self.x2 && point.y >= self.y1 && point.y <= self.y2
    }

    /// True when the interiors overlap. Rectangles that only share an edge do not.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.x1 < other.x2 && other.x1 < self.x2 && self.y1 < other.y2 && other.y1 < self.y2
    }

    /// Grows the rectangle by `amount` on every side.
    pub fn expand(&self, amount: f32) -> Self {
        Self::from_corners(
            self.x1 - amount,
            self.y1 - amount,
            self.x2 + amount,
            self.y2 + amount,
        )
    }

    /// Returns a copy moved so its origin sits at `origin`, keeping the extent.
    pub fn with_origin(&self, origin: Pos2) -> Self {
        Self::from_origin_size(origin, self.size())
    }

    /// Returns a copy with the same origin and a new extent.
    pub fn with_size(&self, size: Vec2) -> Self {
        Self::from_origin_size(self.origin(), size)
    }

    pub fn to_egui(&self) -> egui::Rect {
        egui::Rect::from_min_max(Pos2::new(self.x1, self.y1), Pos2::new(self.x2, self.y2))
    }

    /// Rectangle spanning a whole canvas of the given size.
    pub fn full_canvas(width: u32, height: u32) -> Self {
        Self::from_corners(0.0, 0.0, width as f32, height as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_normalized() {
        let rect = Rectangle::from_corners(150.0, 20.0, 50.0, 10.0);
        assert_eq!(rect, Rectangle { x1: 50.0, y1: 10.0, x2: 150.0, y2: 20.0 });
    }

    #[test]
    fn origin_extent_view_matches_corners() {
        let rect = Rectangle::from_origin_size(Pos2::new(50.0, 60.0), Vec2::new(100.0, 40.0));
        assert_eq!(rect.x2, 150.0);
        assert_eq!(rect.y2, 100.0);
        assert_eq!(rect.origin(), Pos2::new(50.0, 60.0));
        assert_eq!(rect.size(), Vec2::new(100.0, 40.0));
    }

    #[test]
    fn negative_extent_flips_into_a_valid_rectangle() {
        let rect = Rectangle::from_origin_size(Pos2::new(50.0, 50.0), Vec2::new(-20.0, -10.0));
        assert_eq!(rect, Rectangle::from_corners(30.0, 40.0, 50.0, 50.0));
    }

    #[test]
    fn contains_is_inclusive() {
        let rect = Rectangle::from_corners(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Pos2::new(0.0, 0.0)));
        assert!(rect.contains(Pos2::new(10.0, 10.0)));
        assert!(!rect.contains(Pos2::new(10.1, 5.0)));
    }

    #[test]
    fn overlap_requires_shared_interior() {
        let a = Rectangle::from_corners(0.0, 0.0, 100.0, 100.0);
        assert!(a.intersects(&Rectangle::from_corners(50.0, 50.0, 150.0, 150.0)));
        assert!(!a.intersects(&Rectangle::from_corners(100.0, 0.0, 200.0, 100.0)));
        assert!(!a.intersects(&Rectangle::from_corners(300.0, 300.0, 400.0, 400.0)));
    }

    #[test]
    fn expand_grows_every_side() {
        let rect = Rectangle::from_corners(10.0, 10.0, 20.0, 30.0).expand(2.0);
        assert_eq!(rect, Rectangle::from_corners(8.0, 8.0, 22.0, 32.0));
    }
}
