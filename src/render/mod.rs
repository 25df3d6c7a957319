//! Rendering adapter boundary
//!
//! The controller never rasterizes anything itself. It hands polygons, paints,
//! the clip mask and the label placement to a [`Renderer`]:
//! - `svg`: renders a standalone SVG document
//! - `recording`: records every call, for tests and headless embedders

pub mod recording;
pub mod svg;

use std::collections::HashMap;

pub use recording::{DrawCommand, RecordingRenderer};
pub use svg::SvgRenderer;

use crate::geometry::{DecorationSlot, LabelPlacement, Polygon};
use crate::style::{Style, defaults};
use crate::types::{Color, DashPattern, Point, Size};

/// Identifies one drawable layer owned by a ribbon.
///
/// Ordered bottom to top: folds sit behind the band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerSlot {
    Decoration(DecorationSlot),
    Ribbon,
}

/// Drop shadow under a polygon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub offset: Point,
    pub radius: f64,
    pub color: Color,
    pub opacity: f64,
}

impl Default for Shadow {
    fn default() -> Self {
        let (dx, dy) = defaults::SHADOW_OFFSET;
        Shadow {
            offset: Point::new(dx, dy),
            radius: defaults::SHADOW_RADIUS,
            color: defaults::SHADOW_COLOR,
            opacity: defaults::SHADOW_OPACITY,
        }
    }
}

/// How a polygon is filled and stroked
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub fill: Color,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub dash: DashPattern,
    pub shadow: Option<Shadow>,
}

impl Paint {
    /// The band itself.
    pub fn ribbon(style: &Style, dash: DashPattern) -> Self {
        Paint {
            fill: style.ribbon_color,
            stroke: Some(style.margin_color),
            stroke_width: style.margin_width,
            dash,
            shadow: style.uses_shadow.then(Shadow::default),
        }
    }

    /// A fold or a fold shadow.
    pub fn decoration(style: &Style, slot: DecorationSlot) -> Self {
        if slot.is_shadow() {
            Paint {
                fill: defaults::FOLD_SHADOW_COLOR,
                stroke: None,
                stroke_width: 0.0,
                dash: DashPattern::SOLID,
                shadow: None,
            }
        } else {
            Paint {
                fill: style.ribbon_color,
                stroke: None,
                stroke_width: style.margin_width,
                dash: DashPattern::SOLID,
                shadow: None,
            }
        }
    }
}

/// Drawing capabilities a ribbon needs from its host
pub trait Renderer {
    /// Handle to a drawable layer, created once per slot and reused.
    type Layer;

    /// Create the layer backing `slot`. Called at most once per slot while
    /// attached.
    fn create_layer(&mut self, slot: LayerSlot) -> Self::Layer;

    /// Replace the contents of `layer` with `polygon`.
    fn draw_polygon(&mut self, layer: &Self::Layer, polygon: &Polygon, paint: &Paint);

    /// Empty `layer` without destroying it.
    fn clear_layer(&mut self, layer: &Self::Layer);

    /// Destroy `layer`. The handle is never used again.
    fn remove_layer(&mut self, layer: Self::Layer);

    /// Clip the wrapped container to `clip`.
    fn draw_mask(&mut self, clip: &Polygon);

    /// Drop the clip installed by [`Renderer::draw_mask`].
    fn clear_mask(&mut self);

    /// Position and rotate the label widget.
    fn place_label(&mut self, placement: &LabelPlacement);

    /// Hide the label until it is placed again.
    fn clear_label(&mut self);

    /// Natural size of the label after its own layout.
    fn measure_label(&mut self) -> Size;

    /// Surface a notice to the host.
    fn log_diagnostic(&mut self, message: &str);
}

/// Layers keyed by slot: created on first use, then updated in place.
#[derive(Debug)]
pub struct LayerCache<L> {
    layers: HashMap<LayerSlot, L>,
}

impl<L> Default for LayerCache<L> {
    fn default() -> Self {
        LayerCache {
            layers: HashMap::new(),
        }
    }
}

impl<L> LayerCache<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the layer for `slot`, creating it through `renderer` if absent.
    pub fn get_or_create<'a, R>(&'a mut self, renderer: &mut R, slot: LayerSlot) -> &'a L
    where
        R: Renderer<Layer = L>,
    {
        self.layers
            .entry(slot)
            .or_insert_with(|| renderer.create_layer(slot))
    }

    pub fn get(&self, slot: LayerSlot) -> Option<&L> {
        self.layers.get(&slot)
    }

    pub fn contains(&self, slot: LayerSlot) -> bool {
        self.layers.contains_key(&slot)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Slots currently backed by a layer, bottom to top.
    pub fn slots(&self) -> Vec<LayerSlot> {
        let mut slots: Vec<_> = self.layers.keys().copied().collect();
        slots.sort();
        slots
    }

    /// Remove every layer, handing each back for teardown.
    pub fn drain(&mut self) -> impl Iterator<Item = (LayerSlot, L)> + '_ {
        self.layers.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_stack_folds_below_ribbon() {
        let mut slots = vec![
            LayerSlot::Ribbon,
            LayerSlot::Decoration(DecorationSlot::First),
            LayerSlot::Decoration(DecorationSlot::SecondShadow),
            LayerSlot::Decoration(DecorationSlot::FirstShadow),
            LayerSlot::Decoration(DecorationSlot::Second),
        ];
        slots.sort();
        assert_eq!(
            slots,
            vec![
                LayerSlot::Decoration(DecorationSlot::SecondShadow),
                LayerSlot::Decoration(DecorationSlot::Second),
                LayerSlot::Decoration(DecorationSlot::FirstShadow),
                LayerSlot::Decoration(DecorationSlot::First),
                LayerSlot::Ribbon,
            ]
        );
    }

    #[test]
    fn cache_creates_once() {
        let mut renderer = RecordingRenderer::default();
        let mut cache = LayerCache::new();
        let a = *cache.get_or_create(&mut renderer, LayerSlot::Ribbon);
        let b = *cache.get_or_create(&mut renderer, LayerSlot::Ribbon);
        assert_eq!(a, b);
        assert_eq!(renderer.created(), &[LayerSlot::Ribbon]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn ribbon_paint_follows_style() {
        let style = Style::default().with_shadow(false);
        let paint = Paint::ribbon(&style, DashPattern::new(3.0, 2.0));
        assert_eq!(paint.fill, style.ribbon_color);
        assert_eq!(paint.stroke, Some(style.margin_color));
        assert_eq!(paint.shadow, None);
        assert_eq!(paint.dash, DashPattern::new(3.0, 2.0));

        let shadowed = Paint::ribbon(&Style::default(), DashPattern::SOLID);
        assert_eq!(shadowed.shadow, Some(Shadow::default()));
    }

    #[test]
    fn fold_shadows_are_gray() {
        let paint = Paint::decoration(&Style::default(), DecorationSlot::SecondShadow);
        assert_eq!(paint.fill, Color::DARK_GRAY);
        let fold = Paint::decoration(&Style::default(), DecorationSlot::Second);
        assert_eq!(fold.fill, defaults::RIBBON_COLOR);
        assert_eq!(fold.stroke, None);
    }
}
