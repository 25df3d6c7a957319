//! Geometry engine for ribbon banners: diagonal corner sashes and edge tags
//! drawn over a rectangular view, with outward paper folds and shadows.
//!
//! The pieces, leaves first:
//! - [`geometry`]: pure functions from style + container size to polygons
//!   and a label placement
//! - [`bounds`]: keeps the ribbon inside its container
//! - [`controller`]: the [`Ribbon`] state machine that reruns both on change
//! - [`render`]: the [`Renderer`] boundary, with SVG and recording adapters
//!
//! ```
//! use ribbontag::{Orientation, Ribbon, Size, SvgRenderer};
//!
//! let mut ribbon = Ribbon::new(SvgRenderer::new("NEW"));
//! ribbon.attach(Size::new(240.0, 160.0))?;
//! ribbon.set_orientation(Orientation::TopRightCorner);
//! let svg = ribbon.renderer().finish();
//! assert!(svg.contains("NEW"));
//! # Ok::<(), ribbontag::RibbonError>(())
//! ```

pub mod bounds;
pub mod controller;
pub mod errors;
pub mod geometry;
pub mod log;
pub mod orientation;
pub mod render;
pub mod style;
pub mod types;

pub use controller::{Ribbon, RibbonState};
pub use errors::RibbonError;
pub use geometry::{LabelPlacement, Polygon, RibbonGeometry, compute_geometry};
pub use orientation::Orientation;
pub use render::{RecordingRenderer, Renderer, SvgRenderer};
pub use style::Style;
pub use types::{Color, DashPattern, Point, Size};

/// Render one ribbon carrying `label` over a container to SVG.
///
/// Returns the SVG string on success, or an error with diagnostics.
pub fn render_svg(
    label: &str,
    orientation: Orientation,
    style: Style,
    container: Size,
) -> Result<String, miette::Report> {
    let mut ribbon = Ribbon::with_style(SvgRenderer::new(label), orientation, style)?;
    ribbon.attach(container)?;
    Ok(ribbon.into_renderer().finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_svg_every_orientation() {
        for o in Orientation::ALL {
            let svg = render_svg("SALE", o, Style::default(), Size::new(240.0, 160.0))
                .unwrap_or_else(|e| panic!("{}: {:?}", o, e));
            assert!(svg.contains("<clipPath"), "{}", o);
            assert!(svg.contains(">SALE</text>"), "{}", o);
        }
    }

    #[test]
    fn render_svg_rejects_bad_style() {
        let style = Style::default().with_ribbon_width(f64::NAN);
        let err = render_svg("x", Orientation::Top, style, Size::new(10.0, 10.0)).unwrap_err();
        assert_eq!(err.to_string(), "invalid value for `ribbon_width`");
    }

    #[test]
    fn render_svg_viewbox_covers_folds() {
        let svg = render_svg("x", Orientation::Left, Style::default(), Size::new(200.0, 100.0)).unwrap();
        assert!(svg.contains(r#"viewBox="-18 -18 236 136""#));
    }
}
