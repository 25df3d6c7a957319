//! Numeric primitives shared by the geometry kernel and the controller.
//!
//! Style sizes are plain `f64` values in the container's coordinate space
//! (points, y grows downward). Anything coming from the embedder goes through
//! [`non_negative`] or [`Size::try_new`] first.

use std::fmt;

use glam::DVec2;

/// A point in container space (y grows downward).
pub type Point = DVec2;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is negative when non-negative required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Reject NaN and infinities.
#[inline]
pub fn finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// Validate a style length: NaN and infinities are rejected, negative values
/// clamp to zero so polygons never self-intersect.
#[inline]
pub fn non_negative(val: f64) -> Result<f64, NumericError> {
    finite(val).map(|v| v.max(0.0))
}

/// Width and height of a rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size::new(0.0, 0.0);

    /// Create a size (unchecked).
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }

    /// Create a size with validation (rejects NaN, infinite and negative extents)
    pub fn try_new(width: f64, height: f64) -> Result<Self, NumericError> {
        for v in [width, height] {
            finite(v)?;
            if v < 0.0 {
                return Err(NumericError::Negative);
            }
        }
        Ok(Size { width, height })
    }

    /// Grow the size by `amount` on every side.
    pub fn inflate(self, amount: f64) -> Size {
        Size {
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// RGBA color with components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgba(1.0, 0.0, 0.0, 1.0);
    /// One-third gray, used for fold shadows.
    pub const DARK_GRAY: Color = Color::rgba(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Color { r, g, b, a }
    }

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color::rgba(r, g, b, 1.0)
    }

    /// Build from 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color::rgba(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            f64::from(a) / 255.0,
        )
    }

    /// Channels quantized to 8 bits.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// `rgb(r,g,b)` string, alpha is emitted separately as an opacity.
    pub fn to_rgb_string(self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("rgb({},{},{})", r, g, b)
    }

    pub fn is_opaque(self) -> bool {
        self.a >= 1.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba8();
        write!(f, "rgba({},{},{},{})", r, g, b, a)
    }
}

impl std::str::FromStr for Color {
    type Err = String;

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .filter(|h| h.is_ascii())
            .ok_or_else(|| format!("expected a hex color, got {:?}", s))?;
        let digit = |i: usize, len: usize| {
            u8::from_str_radix(&hex[i..i + len], 16).map_err(|e| format!("{}: {}", s, e))
        };
        match hex.len() {
            3 => {
                let (r, g, b) = (digit(0, 1)?, digit(1, 1)?, digit(2, 1)?);
                Ok(Color::from_rgba8(r * 17, g * 17, b * 17, 255))
            }
            6 => Ok(Color::from_rgba8(digit(0, 2)?, digit(2, 2)?, digit(4, 2)?, 255)),
            8 => Ok(Color::from_rgba8(
                digit(0, 2)?,
                digit(2, 2)?,
                digit(4, 2)?,
                digit(6, 2)?,
            )),
            _ => Err(format!("unsupported hex color length: {:?}", s)),
        }
    }
}

/// Stroke dash configuration. `(0, 0)` is a solid line.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct DashPattern {
    pub line_width: f64,
    pub space_width: f64,
}

impl DashPattern {
    pub const SOLID: DashPattern = DashPattern {
        line_width: 0.0,
        space_width: 0.0,
    };

    pub fn new(line_width: f64, space_width: f64) -> Self {
        DashPattern {
            line_width,
            space_width,
        }
    }

    pub fn is_solid(&self) -> bool {
        self.line_width <= 0.0 && self.space_width <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_rejects_nan_and_infinity() {
        assert_eq!(finite(f64::NAN), Err(NumericError::NaN));
        assert_eq!(finite(f64::INFINITY), Err(NumericError::Infinite));
        assert_eq!(finite(f64::NEG_INFINITY), Err(NumericError::Infinite));
        assert_eq!(finite(-3.0), Ok(-3.0));
    }

    #[test]
    fn non_negative_clamps() {
        assert_eq!(non_negative(-5.0), Ok(0.0));
        assert_eq!(non_negative(7.5), Ok(7.5));
        assert_eq!(non_negative(f64::NAN), Err(NumericError::NaN));
    }

    #[test]
    fn size_try_new_rejects_negative() {
        assert_eq!(Size::try_new(-1.0, 10.0), Err(NumericError::Negative));
        assert_eq!(Size::try_new(10.0, f64::NAN), Err(NumericError::NaN));
        assert_eq!(Size::try_new(10.0, 20.0), Ok(Size::new(10.0, 20.0)));
    }

    #[test]
    fn size_inflate() {
        assert_eq!(Size::new(100.0, 50.0).inflate(18.0), Size::new(136.0, 86.0));
    }

    #[test]
    fn color_parses_hex() {
        assert_eq!("#fff".parse::<Color>(), Ok(Color::WHITE));
        assert_eq!("#993333".parse::<Color>().map(Color::to_rgba8), Ok([153, 51, 51, 255]));
        assert_eq!("#00000080".parse::<Color>().map(Color::to_rgba8), Ok([0, 0, 0, 128]));
        assert!("red".parse::<Color>().is_err());
        assert!("#12345".parse::<Color>().is_err());
    }

    #[test]
    fn color_rgb_string_ignores_alpha() {
        assert_eq!(Color::rgba(0.6, 0.2, 0.2, 0.5).to_rgb_string(), "rgb(153,51,51)");
        assert_eq!(Color::DARK_GRAY.to_rgb_string(), "rgb(85,85,85)");
    }

    #[test]
    fn dash_pattern_solid_by_default() {
        assert!(DashPattern::default().is_solid());
        assert!(!DashPattern::new(4.0, 2.0).is_solid());
    }
}
