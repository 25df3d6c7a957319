//! Ribbon body outline

use crate::orientation::{OrientationSpec, OutlineShape};
use crate::style::Style;
use crate::types::{Point, Size};

use super::Polygon;

/// Build the closed five-point ribbon outline for an orientation.
///
/// The outline is generated for the top-left corner (diagonal strip) or the
/// left edge (band), then mirrored into place.
pub fn ribbon_outline(
    spec: &OrientationSpec,
    style: &Style,
    container: Size,
    distance: f64,
    horizontal_offset: f64,
) -> Polygon {
    let base = match spec.shape {
        OutlineShape::Diagonal if horizontal_offset == 0.0 => diagonal(style, distance),
        OutlineShape::Diagonal => stretched(style, container, horizontal_offset),
        OutlineShape::Band => band(style, distance),
    };
    base.map(|p| spec.mirror.apply(p, container))
}

fn diagonal(style: &Style, d: f64) -> Polygon {
    let w = style.ribbon_width;
    let m = style.margin_width;
    closed([
        Point::new(d + m, m / 2.0),
        Point::new(d + w - m, m / 2.0),
        Point::new(m / 2.0, d + w - m),
        Point::new(m / 2.0, d + m),
    ])
}

/// Diagonal strip stretched down to the container's bottom edge, used once a
/// horizontally moving ribbon no longer fits.
fn stretched(style: &Style, container: Size, h: f64) -> Polygon {
    let w = style.ribbon_width;
    let m = style.margin_width;
    closed([
        Point::new(h + m, m / 2.0),
        Point::new(h + w - m, m / 2.0),
        Point::new(m / 2.0 + w, container.height - m),
        Point::new(m / 2.0, h + m),
    ])
}

fn band(style: &Style, d: f64) -> Polygon {
    let w = style.ribbon_width;
    let l = style.ribbon_length;
    let half = style.margin_width / 2.0;
    closed([
        Point::new(half, d + half),
        Point::new(half, d + half + w),
        Point::new(l + half, d + half + w),
        Point::new(l + half, d + half),
    ])
}

fn closed(corners: [Point; 4]) -> Polygon {
    let mut points = corners.to_vec();
    points.push(corners[0]);
    Polygon::new(points)
}

/// Length of the long label-bearing side, points 1 to 2.
pub fn large_distance(points: &[Point]) -> f64 {
    if points.len() > 2 {
        points[1].distance(points[2])
    } else {
        0.0
    }
}

/// Length of the closing side, point 0 to the second-to-last point.
pub fn short_distance(points: &[Point]) -> f64 {
    if points.len() > 2 {
        points[0].distance(points[points.len() - 2])
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::Orientation;

    fn outline(o: Orientation, style: &Style) -> Polygon {
        ribbon_outline(&o.spec(), style, Size::new(200.0, 100.0), 30.0, 0.0)
    }

    #[test]
    fn band_outline_left() {
        let p = outline(Orientation::Left, &Style::default());
        insta::assert_snapshot!(p.to_path_data(), @"M 0.5 30.5 L 0.5 50.5 L 100.5 50.5 L 100.5 30.5 L 0.5 30.5 Z");
    }

    #[test]
    fn band_outline_right_is_mirrored() {
        let p = outline(Orientation::Right, &Style::default());
        insta::assert_snapshot!(p.to_path_data(), @"M 199.5 30.5 L 199.5 50.5 L 99.5 50.5 L 99.5 30.5 L 199.5 30.5 Z");
    }

    #[test]
    fn band_outline_top_is_transposed() {
        let p = outline(Orientation::Top, &Style::default());
        insta::assert_snapshot!(p.to_path_data(), @"M 30.5 0.5 L 50.5 0.5 L 50.5 100.5 L 30.5 100.5 L 30.5 0.5 Z");
    }

    #[test]
    fn bottom_right_outline() {
        let p = outline(Orientation::BottomRightCorner, &Style::default());
        insta::assert_snapshot!(p.to_path_data(), @"M 169 99.5 L 151 99.5 L 199.5 51 L 199.5 69 L 169 99.5 Z");
    }

    #[test]
    fn stretched_outline_reaches_bottom() {
        let style = Style::default();
        let p = ribbon_outline(
            &Orientation::TopLeftCorner.spec(),
            &style,
            Size::new(200.0, 100.0),
            30.0,
            100.0,
        );
        insta::assert_snapshot!(p.to_path_data(), @"M 101 0.5 L 119 0.5 L 20.5 99 L 0.5 101 L 101 0.5 Z");
    }

    #[test]
    fn distances() {
        let p = outline(Orientation::Left, &Style::default());
        assert_eq!(large_distance(&p.points), 100.0);
        assert_eq!(short_distance(&p.points), 100.0);
        assert_eq!(large_distance(&p.points[..2]), 0.0);

        let d = outline(Orientation::TopLeftCorner, &Style::default());
        // (49, 0.5) -> (0.5, 49)
        assert!((large_distance(&d.points) - 48.5 * 2f64.sqrt()).abs() < 1e-9);
    }
}
