//! Outward folds ("decorations") and their shadows
//!
//! A fold simulates the paper band wrapping around the container edge. Each
//! orientation picks one generator from the table in `orientation`; the
//! generators only read the already-mirrored outline.

use enum_dispatch::enum_dispatch;

use crate::types::{Point, Size};

use super::Polygon;

/// Inputs shared by every fold generator
#[derive(Debug, Clone, Copy)]
pub struct FoldContext {
    pub decoration_size: f64,
    pub margin_width: f64,
    pub container: Size,
}

/// Common behavior for all fold generators
#[enum_dispatch]
pub trait DecorationGenerator {
    /// Build the folds for a mirrored ribbon outline.
    fn generate(&self, ctx: &FoldContext, outline: &[Point]) -> Decorations;
}

/// Fold generator selected per orientation
#[enum_dispatch(DecorationGenerator)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fold {
    CornerFold,
    SideFold,
    TopFold,
}

/// Identifies one reusable decoration layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DecorationSlot {
    SecondShadow,
    Second,
    FirstShadow,
    First,
}

impl DecorationSlot {
    pub const ALL: [DecorationSlot; 4] = [
        DecorationSlot::First,
        DecorationSlot::FirstShadow,
        DecorationSlot::Second,
        DecorationSlot::SecondShadow,
    ];

    pub fn is_shadow(self) -> bool {
        matches!(self, DecorationSlot::FirstShadow | DecorationSlot::SecondShadow)
    }
}

/// Up to two folds, each with its shadow
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Decorations {
    pub first: Option<Polygon>,
    pub first_shadow: Option<Polygon>,
    pub second: Option<Polygon>,
    pub second_shadow: Option<Polygon>,
}

impl Decorations {
    pub fn get(&self, slot: DecorationSlot) -> Option<&Polygon> {
        match slot {
            DecorationSlot::First => self.first.as_ref(),
            DecorationSlot::FirstShadow => self.first_shadow.as_ref(),
            DecorationSlot::Second => self.second.as_ref(),
            DecorationSlot::SecondShadow => self.second_shadow.as_ref(),
        }
    }

    /// Present polygons in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (DecorationSlot, &Polygon)> {
        DecorationSlot::ALL
            .into_iter()
            .filter_map(|slot| self.get(slot).map(|p| (slot, p)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Two folds for a diagonal corner ribbon: one past the horizontal edge
/// where the band starts, one past the vertical edge where it ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerFold {
    /// Sign of the horizontal fold offset (negative for right corners).
    pub horizontal_sign: f64,
    /// Sign of the vertical offset on the second fold.
    pub vertical_sign: f64,
    /// The first fold is built at the top and flipped for bottom corners.
    pub flip_vertically: bool,
}

impl CornerFold {
    pub const fn new(horizontal_sign: f64, vertical_sign: f64, flip_vertically: bool) -> Self {
        CornerFold {
            horizontal_sign,
            vertical_sign,
            flip_vertically,
        }
    }
}

impl DecorationGenerator for CornerFold {
    fn generate(&self, ctx: &FoldContext, r: &[Point]) -> Decorations {
        if r.len() < 3 {
            return Decorations::default();
        }
        let ds = ctx.decoration_size;
        let m = ctx.margin_width;
        let s = self.horizontal_sign * ds;
        let v = self.vertical_sign * ds;
        let height = ctx.container.height;
        let flip = |p: Point| {
            if self.flip_vertically {
                Point::new(p.x, height - p.y)
            } else {
                p
            }
        };

        let first = Polygon::new(vec![
            Point::new(r[0].x + s, -ds),
            Point::new(r[1].x + s, -ds),
            Point::new(r[1].x, m),
            Point::new(r[0].x, m),
        ])
        .map(flip);

        let first_shadow = Polygon::new(vec![
            Point::new(r[1].x + s, -ds),
            Point::new(r[1].x + s - s / 5.0, m),
            Point::new(r[1].x, m),
        ])
        .map(flip);

        let second = (r.len() > 3).then(|| {
            let q = r[r.len() - 3];
            let e = r[r.len() - 2];
            Polygon::new(vec![
                q,
                Point::new(q.x - s, q.y + v),
                Point::new(q.x - s, e.y + v),
                Point::new(q.x, e.y),
            ])
        });

        let second_shadow = Polygon::new(vec![
            Point::new(r[2].x - s, r[2].y + v),
            Point::new(r[2].x, r[2].y + v * 4.0 / 5.0),
            r[2],
        ]);

        Decorations {
            first: Some(first),
            first_shadow: Some(first_shadow),
            second,
            second_shadow: Some(second_shadow),
        }
    }
}

/// One fold past the left or right edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideFold {
    /// `+1` folds to the right, `-1` to the left.
    pub outward_sign: f64,
}

impl SideFold {
    pub const fn new(outward_sign: f64) -> Self {
        SideFold { outward_sign }
    }
}

impl DecorationGenerator for SideFold {
    fn generate(&self, ctx: &FoldContext, r: &[Point]) -> Decorations {
        if r.len() < 2 {
            return Decorations::default();
        }
        let o = self.outward_sign * ctx.decoration_size;
        let k = -self.outward_sign * ctx.margin_width / 2.0;
        let (p0, p1) = (r[0], r[1]);

        let first = Polygon::new(vec![
            Point::new(p0.x + k, p0.y),
            Point::new(p0.x + o, p0.y),
            Point::new(p0.x + o, p1.y),
            Point::new(p0.x + k, p1.y),
        ]);
        let shadow = Polygon::new(vec![
            Point::new(p0.x + o, p0.y),
            Point::new(p0.x + k, p0.y - (o * 3.0 / 5.0).abs()),
            Point::new(p0.x + k, p0.y),
        ]);

        Decorations {
            first: Some(first),
            first_shadow: Some(shadow),
            ..Decorations::default()
        }
    }
}

/// One fold past the top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopFold;

impl DecorationGenerator for TopFold {
    fn generate(&self, ctx: &FoldContext, r: &[Point]) -> Decorations {
        if r.len() < 2 {
            return Decorations::default();
        }
        let ds = ctx.decoration_size;
        let half = ctx.margin_width / 2.0;
        let (p0, p1) = (r[0], r[1]);

        let first = Polygon::new(vec![
            Point::new(p0.x, p0.y + half),
            Point::new(p0.x, p0.y - ds),
            Point::new(p1.x, p1.y - ds),
            Point::new(p1.x, p1.y + half),
        ]);
        let shadow = Polygon::new(vec![
            Point::new(p1.x, p0.y - ds),
            Point::new(p1.x + (ds * 4.0 / 5.0).abs(), p0.y),
            Point::new(p1.x, p0.y + half),
        ]);

        Decorations {
            first: Some(first),
            first_shadow: Some(shadow),
            ..Decorations::default()
        }
    }
}
