//! Geometry kernel
//!
//! This module is organized into submodules:
//! - `outline`: the ribbon body polygon and its mirroring
//! - `decoration`: outward folds and their shadows
//! - `placement`: where and how the label sits on the band
//!
//! [`compute_geometry`] is pure: the same inputs always produce the same
//! polygons, and nothing is cached between calls.

pub mod decoration;
pub mod outline;
pub mod placement;

use std::fmt::Write as _;

use crate::orientation::Orientation;
use crate::style::Style;
use crate::types::{Point, Size};

pub use decoration::{DecorationGenerator, DecorationSlot, Decorations, Fold};
pub use placement::LabelPlacement;

/// An ordered list of points, implicitly closed back to the first one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Polygon { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Apply `f` to every point.
    pub fn map(self, f: impl Fn(Point) -> Point) -> Self {
        Polygon {
            points: self.points.into_iter().map(f).collect(),
        }
    }

    /// Rectangle `origin..origin+size` as a closed five-point outline.
    pub fn rect(origin: Point, size: Size) -> Self {
        let (x0, y0) = (origin.x, origin.y);
        let (x1, y1) = (x0 + size.width, y0 + size.height);
        Polygon::new(vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
            Point::new(x0, y0),
        ])
    }

    /// SVG path data: move to the first point, line to the rest, close.
    pub fn to_path_data(&self) -> String {
        let mut d = String::new();
        for (i, p) in self.points.iter().enumerate() {
            let cmd = if i == 0 { "M" } else { " L" };
            let _ = write!(d, "{} {} {}", cmd, fmt_num(p.x), fmt_num(p.y));
        }
        if !d.is_empty() {
            d.push_str(" Z");
        }
        d
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(points: Vec<Point>) -> Self {
        Polygon::new(points)
    }
}

/// Format a coordinate with at most three decimals and no trailing zeros.
pub fn fmt_num(v: f64) -> String {
    let v = if v.abs() < 5e-4 { 0.0 } else { v };
    let s = format!("{:.3}", v);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Something worth reporting that did not produce geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryNotice {
    /// Folds cannot follow a horizontally moving ribbon yet.
    DecorationsUnavailable,
}

impl GeometryNotice {
    pub fn message(self) -> &'static str {
        match self {
            GeometryNotice::DecorationsUnavailable => {
                "decorations are not available while moves_horizontally is enabled"
            }
        }
    }
}

/// Everything one render pass draws
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RibbonGeometry {
    /// Closed outline: zero points, or four corners plus the repeated first.
    pub outline: Polygon,
    pub decorations: Decorations,
    pub label: Option<LabelPlacement>,
    pub notice: Option<GeometryNotice>,
}

impl RibbonGeometry {
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }
}

/// Compute the full ribbon geometry for one pass.
///
/// `distance` and `horizontal_offset` come from the bounds adjuster (or
/// straight from the style when bounds are not enforced).
pub fn compute_geometry(
    orientation: Orientation,
    style: &Style,
    container: Size,
    distance: f64,
    horizontal_offset: f64,
) -> RibbonGeometry {
    let spec = orientation.spec();
    let outline = outline::ribbon_outline(&spec, style, container, distance, horizontal_offset);
    if outline.is_empty() {
        return RibbonGeometry::default();
    }

    let mut notice = None;
    let decorations = if !style.display_decorators {
        Decorations::default()
    } else if style.moves_horizontally {
        notice = Some(GeometryNotice::DecorationsUnavailable);
        Decorations::default()
    } else {
        let ctx = decoration::FoldContext {
            decoration_size: style.decoration_size,
            margin_width: style.margin_width,
            container,
        };
        spec.fold.generate(&ctx, &outline.points)
    };

    let label = LabelPlacement::from_outline(
        &outline.points,
        style.decoration_size,
        style.ribbon_width,
        spec.rotation,
    );

    RibbonGeometry {
        outline,
        decorations,
        label,
        notice,
    }
}

/// Clip region: the container grown by `decoration_size` on every side so
/// folds stay visible while anything further out is cut.
pub fn mask_polygon(container: Size, decoration_size: f64) -> Polygon {
    Polygon::rect(
        Point::splat(-decoration_size),
        container.inflate(decoration_size),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_num_trims() {
        assert_eq!(fmt_num(51.0), "51");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(-17.5), "-17.5");
        assert_eq!(fmt_num(1.0 / 3.0), "0.333");
        assert_eq!(fmt_num(-0.0001), "0");
    }

    #[test]
    fn path_data_closes() {
        let p = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(4.0, 3.0)]);
        insta::assert_snapshot!(p.to_path_data(), @"M 0 0 L 4 0 L 4 3 Z");
        assert_eq!(Polygon::default().to_path_data(), "");
    }

    #[test]
    fn mask_expands_container() {
        let mask = mask_polygon(Size::new(100.0, 60.0), 18.0);
        insta::assert_snapshot!(mask.to_path_data(), @"M -18 -18 L 118 -18 L 118 78 L -18 78 L -18 -18 Z");
    }

    #[test]
    fn default_top_left_geometry() {
        let g = compute_geometry(
            Orientation::TopLeftCorner,
            &Style::default(),
            Size::new(300.0, 200.0),
            50.0,
            0.0,
        );
        insta::assert_snapshot!(g.outline.to_path_data(), @"M 51 0.5 L 69 0.5 L 0.5 69 L 0.5 51 L 51 0.5 Z");
        assert!(g.decorations.first.is_some());
        assert!(g.label.is_some());
        assert_eq!(g.notice, None);
    }

    #[test]
    fn moving_ribbon_reports_instead_of_decorating() {
        let style = Style::default().with_moves_horizontally(true);
        let g = compute_geometry(Orientation::TopLeftCorner, &style, Size::new(300.0, 200.0), 50.0, 0.0);
        assert_eq!(g.decorations, Decorations::default());
        assert_eq!(g.notice, Some(GeometryNotice::DecorationsUnavailable));
    }

    #[test]
    fn decorators_off_is_silent() {
        let style = Style::default().with_decorators(false).with_moves_horizontally(true);
        let g = compute_geometry(Orientation::Left, &style, Size::new(300.0, 200.0), 50.0, 0.0);
        assert_eq!(g.decorations, Decorations::default());
        assert_eq!(g.notice, None);
    }
}
