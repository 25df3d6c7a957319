//! Label placement on the ribbon band

use crate::types::Point;

use super::outline::{large_distance, short_distance};

/// Where the label goes and how it is turned.
///
/// `center` is in overlay space, whose origin sits at
/// `(-decoration_size, -decoration_size)` in container space so the overlay
/// also covers the folds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub center: Point,
    /// Length of the outer, label-bearing edge.
    pub width: f64,
    pub height: f64,
    /// Length of the inner edge. Text wider than this spills off a corner
    /// band.
    pub inner_width: f64,
    /// Radians, clockwise on screen.
    pub rotation: f64,
}

impl LabelPlacement {
    /// Place a label on a closed outline.
    ///
    /// The center is the mean of every point but the first (the closing
    /// repeat covers it). Returns `None` for outlines with fewer than two
    /// points.
    pub fn from_outline(
        points: &[Point],
        decoration_size: f64,
        ribbon_width: f64,
        rotation: f64,
    ) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let rest = &points[1..];
        let mean = rest.iter().copied().sum::<Point>() / rest.len() as f64;
        Some(LabelPlacement {
            center: mean + Point::splat(decoration_size),
            width: large_distance(points),
            height: ribbon_width,
            inner_width: short_distance(points),
            rotation,
        })
    }

    /// The center converted back to container space.
    pub fn center_in_container(&self, decoration_size: f64) -> Point {
        self.center - Point::splat(decoration_size)
    }

    pub fn rotation_degrees(&self) -> f64 {
        self.rotation.to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_mean_of_tail_plus_overlay_offset() {
        let points = [
            Point::new(0.5, 30.5),
            Point::new(0.5, 50.5),
            Point::new(100.5, 50.5),
            Point::new(100.5, 30.5),
            Point::new(0.5, 30.5),
        ];
        let p = LabelPlacement::from_outline(&points, 18.0, 20.0, 0.0).unwrap();
        assert_eq!(p.center, Point::new(50.5 + 18.0, 40.5 + 18.0));
        assert_eq!(p.width, 100.0);
        assert_eq!(p.height, 20.0);
        assert_eq!(p.inner_width, 100.0);
        assert_eq!(p.center_in_container(18.0), Point::new(50.5, 40.5));
    }

    #[test]
    fn degenerate_outlines_are_skipped() {
        assert_eq!(LabelPlacement::from_outline(&[], 18.0, 20.0, 0.0), None);
        assert_eq!(LabelPlacement::from_outline(&[Point::ONE], 18.0, 20.0, 0.0), None);
    }

    #[test]
    fn two_points_place_without_width() {
        let p = LabelPlacement::from_outline(&[Point::ZERO, Point::new(4.0, 6.0)], 0.0, 5.0, 0.0)
            .unwrap();
        assert_eq!(p.center, Point::new(4.0, 6.0));
        assert_eq!(p.width, 0.0);
        assert_eq!(p.inner_width, 0.0);
    }

    #[test]
    fn corner_inner_edge_is_shorter() {
        // Top-left corner, distance 50, width 20, margin 1.
        let points = [
            Point::new(51.0, 0.5),
            Point::new(69.0, 0.5),
            Point::new(0.5, 69.0),
            Point::new(0.5, 51.0),
            Point::new(51.0, 0.5),
        ];
        let p = LabelPlacement::from_outline(&points, 18.0, 20.0, 0.0).unwrap();
        assert!((p.inner_width - 50.5 * 2f64.sqrt()).abs() < 1e-9);
        assert!(p.inner_width < p.width);
    }
}
