use egui::Pos2;

use super::Rectangle;

// Side length of the square grab area at the selection's bottom-right corner.
pub const RESIZE_HANDLE_SIZE: f32 = 14.0;

/// Picks, among the rectangles containing `point`, the one whose center is
/// nearest to it. Ties keep the earliest candidate.
pub fn nearest_containing<'a, T, I>(point: Pos2, candidates: I) -> Option<&'a T>
where
    T: 'a,
    I: IntoIterator<Item = (&'a T, Rectangle)>,
{
    let mut closest: Option<(&'a T, f32)> = None;

    for (item, rect) in candidates {
        if !rect.contains(point) {
            continue;
        }
        let distance = point.distance(rect.center());
        match closest {
            Some((_, best)) if distance >= best => {}
            _ => closest = Some((item, distance)),
        }
    }

    closest.map(|(item, _)| item)
}

/// Grab area of the resize handle, in the same coordinates as `rect`.
///
/// Never larger than half the rectangle on either axis, so small selections
/// keep a body that can be grabbed to move them.
pub fn resize_handle_rect(rect: &Rectangle, handle_size: f32) -> Rectangle {
    let size = handle_size.min(rect.width() / 2.0).min(rect.height() / 2.0);
    Rectangle::from_corners(rect.x2 - size, rect.y2 - size, rect.x2, rect.y2)
}

pub fn is_point_on_resize_handle(point: Pos2, rect: &Rectangle, handle_size: f32) -> bool {
    resize_handle_rect(rect, handle_size).contains(point)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_center_wins_among_overlaps() {
        let shapes = [
            ("a", Rectangle::from_corners(0.0, 0.0, 100.0, 100.0)),
            ("b", Rectangle::from_corners(50.0, 50.0, 200.0, 200.0)),
        ];
        let hit = nearest_containing(Pos2::new(60.0, 60.0), shapes.iter().map(|(n, r)| (n, *r)));
        assert_eq!(hit, Some(&"a"));

        let hit = nearest_containing(Pos2::new(110.0, 110.0), shapes.iter().map(|(n, r)| (n, *r)));
        assert_eq!(hit, Some(&"b"));
    }

    #[test]
    fn equal_distance_keeps_first() {
        let shapes = [
            (1, Rectangle::from_corners(0.0, 0.0, 10.0, 10.0)),
            (2, Rectangle::from_corners(0.0, 0.0, 10.0, 10.0)),
        ];
        let hit = nearest_containing(Pos2::new(5.0, 5.0), shapes.iter().map(|(n, r)| (n, *r)));
        assert_eq!(hit, Some(&1));
    }

    #[test]
    fn handle_sits_in_bottom_right_corner() {
        let rect = Rectangle::from_corners(0.0, 0.0, 100.0, 100.0);
        assert!(is_point_on_resize_handle(Pos2::new(95.0, 95.0), &rect, RESIZE_HANDLE_SIZE));
        assert!(!is_point_on_resize_handle(Pos2::new(50.0, 50.0), &rect, RESIZE_HANDLE_SIZE));
    }

    #[test]
    fn smallest_selection_keeps_a_movable_body() {
        let rect = Rectangle::from_corners(0.0, 0.0, 10.0, 10.0);
        assert_eq!(
            resize_handle_rect(&rect, RESIZE_HANDLE_SIZE),
            Rectangle::from_corners(5.0, 5.0, 10.0, 10.0)
        );
        assert!(!is_point_on_resize_handle(Pos2::new(1.0, 1.0), &rect, RESIZE_HANDLE_SIZE));
        assert!(is_point_on_resize_handle(Pos2::new(9.0, 9.0), &rect, RESIZE_HANDLE_SIZE));

        // A zoomed-out canvas inflates the handle in canvas pixels.
        let wide = Rectangle::from_corners(0.0, 0.0, 40.0, 12.0);
        assert!(!is_point_on_resize_handle(Pos2::new(30.0, 2.0), &wide, RESIZE_HANDLE_SIZE / 0.25));
    }
}
