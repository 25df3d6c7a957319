//! Ribbon orientations and the per-orientation dispatch table.
//!
//! Every orientation shares one generative outline formula (built as if the
//! ribbon sat at the top-left corner or the left edge) and differs only in
//! how that outline is mirrored, which fold generator decorates it, the label
//! rotation, and which label extent drives autoresizing.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use std::fmt;

use crate::geometry::decoration::{CornerFold, Fold, SideFold, TopFold};
use crate::types::{Point, Size};

/// Where the ribbon is attached to its container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    TopLeftCorner,
    TopRightCorner,
    BottomLeftCorner,
    BottomRightCorner,
    Left,
    Right,
    Top,
}

impl Orientation {
    pub const ALL: [Orientation; 7] = [
        Orientation::TopLeftCorner,
        Orientation::TopRightCorner,
        Orientation::BottomLeftCorner,
        Orientation::BottomRightCorner,
        Orientation::Left,
        Orientation::Right,
        Orientation::Top,
    ];

    pub fn is_corner(self) -> bool {
        self.spec().shape == OutlineShape::Diagonal
    }

    /// Look up the table row for this orientation.
    pub fn spec(self) -> OrientationSpec {
        use Orientation::*;
        match self {
            TopLeftCorner => OrientationSpec {
                shape: OutlineShape::Diagonal,
                mirror: Mirror::Identity,
                fold: CornerFold::new(1.0, 1.0, false).into(),
                rotation: -FRAC_PI_4,
                extent: LabelExtent::Height,
            },
            TopRightCorner => OrientationSpec {
                shape: OutlineShape::Diagonal,
                mirror: Mirror::X,
                fold: CornerFold::new(-1.0, 1.0, false).into(),
                rotation: FRAC_PI_4,
                extent: LabelExtent::Height,
            },
            BottomLeftCorner => OrientationSpec {
                shape: OutlineShape::Diagonal,
                mirror: Mirror::Y,
                fold: CornerFold::new(1.0, -1.0, true).into(),
                rotation: FRAC_PI_4,
                extent: LabelExtent::Height,
            },
            BottomRightCorner => OrientationSpec {
                shape: OutlineShape::Diagonal,
                mirror: Mirror::XY,
                fold: CornerFold::new(-1.0, -1.0, true).into(),
                rotation: -FRAC_PI_4,
                extent: LabelExtent::Height,
            },
            Left => OrientationSpec {
                shape: OutlineShape::Band,
                mirror: Mirror::Identity,
                fold: SideFold::new(-1.0).into(),
                rotation: 0.0,
                extent: LabelExtent::Height,
            },
            Right => OrientationSpec {
                shape: OutlineShape::Band,
                mirror: Mirror::X,
                fold: SideFold::new(1.0).into(),
                rotation: 0.0,
                extent: LabelExtent::Height,
            },
            Top => OrientationSpec {
                shape: OutlineShape::Band,
                mirror: Mirror::Transpose,
                fold: TopFold.into(),
                rotation: FRAC_PI_2,
                extent: LabelExtent::Width,
            },
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Orientation::TopLeftCorner => "top-left-corner",
            Orientation::TopRightCorner => "top-right-corner",
            Orientation::BottomLeftCorner => "bottom-left-corner",
            Orientation::BottomRightCorner => "bottom-right-corner",
            Orientation::Left => "left",
            Orientation::Right => "right",
            Orientation::Top => "top",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Orientation::ALL
            .into_iter()
            .find(|o| o.to_string() == s)
            .ok_or_else(|| format!("unknown orientation: {}", s))
    }
}

/// One row of the orientation table
#[derive(Debug, Clone, Copy)]
pub struct OrientationSpec {
    pub shape: OutlineShape,
    pub mirror: Mirror,
    pub fold: Fold,
    /// Label rotation in radians (clockwise on screen, y-down).
    pub rotation: f64,
    pub extent: LabelExtent,
}

/// Base outline before mirroring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineShape {
    /// Diagonal strip across the top-left corner.
    Diagonal,
    /// Rectangle hanging off the left edge.
    Band,
}

/// Which measured label extent feeds `ribbon_width` when autoresizing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelExtent {
    Width,
    Height,
}

impl LabelExtent {
    pub fn of(self, size: Size) -> f64 {
        match self {
            LabelExtent::Width => size.width,
            LabelExtent::Height => size.height,
        }
    }
}

/// Coordinate flip taking the top-left/left outline to its final position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirror {
    Identity,
    /// `x -> width - x`
    X,
    /// `y -> height - y`
    Y,
    /// Both axes.
    XY,
    /// Swap x and y; a quarter turn realized without trigonometry.
    Transpose,
}

impl Mirror {
    pub fn apply(self, p: Point, container: Size) -> Point {
        match self {
            Mirror::Identity => p,
            Mirror::X => Point::new(container.width - p.x, p.y),
            Mirror::Y => Point::new(p.x, container.height - p.y),
            Mirror::XY => Point::new(container.width - p.x, container.height - p.y),
            Mirror::Transpose => Point::new(p.y, p.x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirror_x_reflects_about_vertical_center() {
        let size = Size::new(200.0, 100.0);
        assert_eq!(Mirror::X.apply(Point::new(10.0, 5.0), size), Point::new(190.0, 5.0));
        assert_eq!(Mirror::Y.apply(Point::new(10.0, 5.0), size), Point::new(10.0, 95.0));
        assert_eq!(Mirror::XY.apply(Point::new(10.0, 5.0), size), Point::new(190.0, 95.0));
        assert_eq!(Mirror::Transpose.apply(Point::new(10.0, 5.0), size), Point::new(5.0, 10.0));
    }

    #[test]
    fn mirrors_are_involutions() {
        let size = Size::new(320.0, 240.0);
        let p = Point::new(12.5, 77.0);
        for m in [Mirror::Identity, Mirror::X, Mirror::Y, Mirror::XY, Mirror::Transpose] {
            assert_eq!(m.apply(m.apply(p, size), size), p, "{:?}", m);
        }
    }

    #[test]
    fn orientation_round_trips_through_display() {
        for o in Orientation::ALL {
            assert_eq!(o.to_string().parse::<Orientation>(), Ok(o));
        }
        assert!("diagonal".parse::<Orientation>().is_err());
    }

    #[test]
    fn corners_and_edges() {
        let corners: Vec<_> = Orientation::ALL.into_iter().filter(|o| o.is_corner()).collect();
        assert_eq!(corners.len(), 4);
        assert!(!Orientation::Top.is_corner());
    }

    #[test]
    fn top_measures_label_width() {
        let size = Size::new(80.0, 14.0);
        assert_eq!(Orientation::Top.spec().extent.of(size), 80.0);
        assert_eq!(Orientation::Left.spec().extent.of(size), 14.0);
        assert_eq!(Orientation::BottomRightCorner.spec().extent.of(size), 14.0);
    }
}
