//! Ribbon style record and its defaults.

use crate::errors::RibbonError;
use crate::types::{Color, non_negative};

/// Default sizes and settings
pub mod defaults {
    use crate::types::Color;

    pub const DECORATION_SIZE: f64 = 18.0;
    pub const RIBBON_WIDTH: f64 = 20.0;
    /// Margin a freshly initialized ribbon carries.
    pub const MARGIN_WIDTH: f64 = 1.0;
    pub const ORIGIN_DISTANCE: f64 = 50.0;
    pub const RIBBON_LENGTH: f64 = 100.0;
    pub const AUTORESIZE_PADDING: f64 = 10.0;

    pub const RIBBON_COLOR: Color = Color::rgba(0.6, 0.2, 0.2, 1.0);
    pub const MARGIN_COLOR: Color = Color::rgba(1.0, 0.8, 0.2, 1.0);
    pub const SHADOW_COLOR: Color = Color::BLACK;
    pub const FOLD_SHADOW_COLOR: Color = Color::DARK_GRAY;

    pub const SHADOW_OFFSET: (f64, f64) = (0.0, 10.0);
    pub const SHADOW_RADIUS: f64 = 10.0;
    pub const SHADOW_OPACITY: f64 = 0.5;

    pub const KEEP_IN_BOUNDS: bool = true;
    pub const MOVES_HORIZONTALLY: bool = false;
    pub const USES_SHADOW: bool = true;
    pub const DISPLAY_DECORATORS: bool = true;
    pub const AUTORESIZES: bool = false;
}

/// Every parameter that shapes or paints a ribbon.
///
/// All sizes are non-negative. Changing any field through the controller
/// invalidates the computed geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// How far folds reach outside the container.
    pub decoration_size: f64,
    /// Thickness of the band.
    pub ribbon_width: f64,
    pub margin_width: f64,
    /// Distance between the origin corner or edge and the nearest ribbon point.
    pub origin_distance: f64,
    /// Length of `Left`, `Right` and `Top` ribbons.
    pub ribbon_length: f64,
    /// Added to the measured label extent when autoresizing.
    pub autoresize_padding: f64,
    pub ribbon_color: Color,
    pub margin_color: Color,
    pub keep_in_bounds: bool,
    pub moves_horizontally: bool,
    pub uses_shadow: bool,
    pub display_decorators: bool,
    pub autoresizes: bool,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            decoration_size: defaults::DECORATION_SIZE,
            ribbon_width: defaults::RIBBON_WIDTH,
            margin_width: defaults::MARGIN_WIDTH,
            origin_distance: defaults::ORIGIN_DISTANCE,
            ribbon_length: defaults::RIBBON_LENGTH,
            autoresize_padding: defaults::AUTORESIZE_PADDING,
            ribbon_color: defaults::RIBBON_COLOR,
            margin_color: defaults::MARGIN_COLOR,
            keep_in_bounds: defaults::KEEP_IN_BOUNDS,
            moves_horizontally: defaults::MOVES_HORIZONTALLY,
            uses_shadow: defaults::USES_SHADOW,
            display_decorators: defaults::DISPLAY_DECORATORS,
            autoresizes: defaults::AUTORESIZES,
        }
    }
}

impl Style {
    pub fn with_decoration_size(mut self, v: f64) -> Self {
        self.decoration_size = v;
        self
    }

    pub fn with_ribbon_width(mut self, v: f64) -> Self {
        self.ribbon_width = v;
        self
    }

    pub fn with_margin_width(mut self, v: f64) -> Self {
        self.margin_width = v;
        self
    }

    pub fn with_origin_distance(mut self, v: f64) -> Self {
        self.origin_distance = v;
        self
    }

    pub fn with_ribbon_length(mut self, v: f64) -> Self {
        self.ribbon_length = v;
        self
    }

    pub fn with_autoresize_padding(mut self, v: f64) -> Self {
        self.autoresize_padding = v;
        self
    }

    pub fn with_colors(mut self, ribbon: Color, margin: Color) -> Self {
        self.ribbon_color = ribbon;
        self.margin_color = margin;
        self
    }

    pub fn with_keep_in_bounds(mut self, v: bool) -> Self {
        self.keep_in_bounds = v;
        self
    }

    pub fn with_moves_horizontally(mut self, v: bool) -> Self {
        self.moves_horizontally = v;
        self
    }

    pub fn with_shadow(mut self, v: bool) -> Self {
        self.uses_shadow = v;
        self
    }

    pub fn with_decorators(mut self, v: bool) -> Self {
        self.display_decorators = v;
        self
    }

    pub fn with_autoresizes(mut self, v: bool) -> Self {
        self.autoresizes = v;
        self
    }

    /// Validate every size field, clamping negatives to zero.
    pub fn validated(mut self) -> Result<Self, RibbonError> {
        let fields: [(&'static str, &mut f64); 6] = [
            ("decoration_size", &mut self.decoration_size),
            ("ribbon_width", &mut self.ribbon_width),
            ("margin_width", &mut self.margin_width),
            ("origin_distance", &mut self.origin_distance),
            ("ribbon_length", &mut self.ribbon_length),
            ("autoresize_padding", &mut self.autoresize_padding),
        ];
        for (name, value) in fields {
            *value = non_negative(*value).map_err(RibbonError::invalid(name))?;
        }
        Ok(self)
    }
}
