//! Keep-in-bounds adjustment.
//!
//! Resolves the origin distance actually fed to the geometry kernel. When the
//! band does not fit an axis, the style itself is shrunk: first the autoresize
//! padding, then the ribbon width.

use crate::style::Style;
use crate::types::Size;

/// Outcome of resolving one container axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisResolution {
    pub distance: f64,
    /// Set when a horizontally moving ribbon overflows this axis.
    pub horizontal_offset: Option<f64>,
    /// The style after any shrink-to-fit mutation.
    pub style: Style,
}

/// Outcome of resolving both axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsResolution {
    pub distance: f64,
    /// Zero unless the alternate stretched outline is in effect.
    pub horizontal_offset: f64,
    pub style: Style,
}

impl BoundsResolution {
    /// Whether the adjuster changed width or padding.
    pub fn adjusted(&self, original: &Style) -> bool {
        self.style.ribbon_width != original.ribbon_width
            || self.style.autoresize_padding != original.autoresize_padding
    }
}

/// Clamp the origin distance against one axis of the container.
pub fn resolve_distance(style: &Style, parent_size: f64) -> AxisResolution {
    let mut style = *style;
    let effective_width = style.ribbon_width + style.autoresize_padding;

    if style.moves_horizontally {
        let horizontal_offset =
            (style.origin_distance + effective_width > parent_size).then_some(parent_size);
        return AxisResolution {
            distance: style.origin_distance,
            horizontal_offset,
            style,
        };
    }

    let distance = if effective_width > parent_size {
        if style.ribbon_width < parent_size {
            style.autoresize_padding = parent_size - style.ribbon_width;
        } else {
            style.ribbon_width = (parent_size - 1.0).max(0.0);
            style.autoresize_padding = 0.0;
        }
        0.0
    } else if style.origin_distance + effective_width > parent_size {
        parent_size - effective_width
    } else {
        style.origin_distance
    };

    AxisResolution {
        distance,
        horizontal_offset: None,
        style,
    }
}

/// Resolve both axes of the container.
///
/// The width axis runs first and its style mutations are visible to the
/// height axis. The smaller distance wins and is applied to both axes.
pub fn resolve_bounds(style: &Style, container: Size) -> BoundsResolution {
    if !style.keep_in_bounds {
        return BoundsResolution {
            distance: style.origin_distance,
            horizontal_offset: 0.0,
            style: *style,
        };
    }

    let h = resolve_distance(style, container.width);
    let v = resolve_distance(&h.style, container.height);

    BoundsResolution {
        distance: h.distance.min(v.distance),
        horizontal_offset: v.horizontal_offset.or(h.horizontal_offset).unwrap_or(0.0),
        style: v.style,
    }
}
