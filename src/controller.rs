//! Ribbon controller - owns the style and drives render passes
//!
//! Every mutation goes through a setter that validates, stores and then runs
//! [`Ribbon::recompute`]. A pass is:
//! 1. resolve the origin distance against the container (keep-in-bounds),
//! 2. compute the geometry,
//! 3. hand polygons, mask and label placement to the renderer,
//! 4. when autoresizing, measure the label and run one more pass if the
//!    measured extent changed the ribbon width.

use std::fmt;

use crate::bounds::resolve_bounds;
use crate::errors::RibbonError;
use crate::geometry::{DecorationSlot, RibbonGeometry, compute_geometry, mask_polygon};
use crate::log::{debug, warn};
use crate::orientation::Orientation;
use crate::render::{LayerCache, LayerSlot, Paint, Renderer};
use crate::style::Style;
use crate::types::{Color, DashPattern, Size, non_negative};

/// Extra passes an autoresize measurement may trigger per layout event.
const MAX_AUTORESIZE_PASSES: usize = 1;

/// Attachment state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RibbonState {
    Unattached,
    Attached { container: Size },
}

/// A ribbon wrapped around one container
pub struct Ribbon<R: Renderer> {
    style: Style,
    orientation: Orientation,
    dash: DashPattern,
    state: RibbonState,
    renderer: R,
    layers: LayerCache<R::Layer>,
    geometry: RibbonGeometry,
}

macro_rules! size_setter {
    ($(#[$doc:meta])* $name:ident => $field:ident) => {
        $(#[$doc])*
        pub fn $name(&mut self, value: f64) -> Result<(), RibbonError> {
            let v = non_negative(value).map_err(RibbonError::invalid(stringify!($field)))?;
            if v != value {
                debug!(field = stringify!($field), value, "clamped negative size to zero");
            }
            self.style.$field = v;
            self.recompute();
            Ok(())
        }
    };
}

macro_rules! flag_setter {
    ($(#[$doc:meta])* $name:ident => $field:ident) => {
        $(#[$doc])*
        pub fn $name(&mut self, value: bool) {
            self.style.$field = value;
            self.recompute();
        }
    };
}

impl<R: Renderer> fmt::Debug for Ribbon<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ribbon")
            .field("style", &self.style)
            .field("orientation", &self.orientation)
            .field("dash", &self.dash)
            .field("state", &self.state)
            .field("layers", &self.layers.slots())
            .finish_non_exhaustive()
    }
}

impl<R: Renderer> Ribbon<R> {
    pub fn new(renderer: R) -> Self {
        Self::unattached(renderer, Orientation::default(), Style::default())
    }

    /// Create an unattached ribbon with a validated `style`.
    pub fn with_style(
        renderer: R,
        orientation: Orientation,
        style: Style,
    ) -> Result<Self, RibbonError> {
        Ok(Self::unattached(renderer, orientation, style.validated()?))
    }

    fn unattached(renderer: R, orientation: Orientation, style: Style) -> Self {
        Ribbon {
            style,
            orientation,
            dash: DashPattern::SOLID,
            state: RibbonState::Unattached,
            renderer,
            layers: LayerCache::new(),
            geometry: RibbonGeometry::default(),
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Wrap a container of the given size and draw the first pass.
    pub fn attach(&mut self, container: Size) -> Result<(), RibbonError> {
        if self.is_attached() {
            warn!("attach called on an attached ribbon");
            return Err(RibbonError::AlreadyAttached);
        }
        let container = validate_container(container)?;
        debug!(%container, orientation = %self.orientation, "attaching ribbon");
        self.state = RibbonState::Attached { container };
        self.recompute();
        Ok(())
    }

    /// Remove every layer, the mask and the label, and return to the
    /// unattached state.
    pub fn detach(&mut self) {
        if !self.is_attached() {
            return;
        }
        debug!("detaching ribbon");
        for (_, layer) in self.layers.drain() {
            self.renderer.remove_layer(layer);
        }
        self.renderer.clear_mask();
        self.renderer.clear_label();
        self.state = RibbonState::Unattached;
        self.geometry = RibbonGeometry::default();
    }

    /// The container was laid out again, possibly with a new size.
    pub fn container_resized(&mut self, container: Size) -> Result<(), RibbonError> {
        let container = validate_container(container)?;
        if let RibbonState::Attached { container: c } = &mut self.state {
            *c = container;
            self.recompute();
        }
        Ok(())
    }

    /// The label finished its own layout with `measured` as natural size.
    ///
    /// With autoresizing on, the relevant extent plus padding becomes the
    /// ribbon width and one pass is drawn with it. `measured` is taken as is;
    /// the renderer is not asked again. An unchanged width is a fixed point
    /// and triggers nothing.
    pub fn label_layout_changed(&mut self, measured: Size) {
        if !self.style.autoresizes || !self.apply_label_extent(measured) {
            return;
        }
        if let Some(container) = self.container() {
            self.render_pass(container);
        }
    }

    pub fn state(&self) -> RibbonState {
        self.state
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.state, RibbonState::Attached { .. })
    }

    pub fn container(&self) -> Option<Size> {
        match self.state {
            RibbonState::Attached { container } => Some(container),
            RibbonState::Unattached => None,
        }
    }

    // ------------------------------------------------------------------
    // Render passes
    // ------------------------------------------------------------------

    /// Recompute and redraw. A no-op while unattached.
    pub fn recompute(&mut self) {
        let Some(container) = self.container() else {
            return;
        };
        self.render_pass(container);

        if !self.style.autoresizes {
            return;
        }
        for _ in 0..MAX_AUTORESIZE_PASSES {
            let measured = self.renderer.measure_label();
            if !self.apply_label_extent(measured) {
                break;
            }
            self.render_pass(container);
        }
    }

    fn render_pass(&mut self, container: Size) {
        let resolved = resolve_bounds(&self.style, container);
        if resolved.adjusted(&self.style) {
            debug!(
                ribbon_width = resolved.style.ribbon_width,
                autoresize_padding = resolved.style.autoresize_padding,
                "shrunk ribbon to fit container"
            );
        }
        self.style = resolved.style;

        debug!(
            orientation = %self.orientation,
            distance = resolved.distance,
            horizontal_offset = resolved.horizontal_offset,
            "render pass"
        );
        let geometry = compute_geometry(
            self.orientation,
            &self.style,
            container,
            resolved.distance,
            resolved.horizontal_offset,
        );

        self.renderer
            .draw_mask(&mask_polygon(container, self.style.decoration_size));

        if geometry.is_empty() {
            self.clear_slot(LayerSlot::Ribbon);
            for slot in DecorationSlot::ALL {
                self.clear_slot(LayerSlot::Decoration(slot));
            }
            self.geometry = geometry;
            return;
        }

        let paint = Paint::ribbon(&self.style, self.dash);
        let layer = self.layers.get_or_create(&mut self.renderer, LayerSlot::Ribbon);
        self.renderer.draw_polygon(layer, &geometry.outline, &paint);

        for slot in DecorationSlot::ALL {
            match geometry.decorations.get(slot) {
                Some(polygon) => {
                    let paint = Paint::decoration(&self.style, slot);
                    let layer = self
                        .layers
                        .get_or_create(&mut self.renderer, LayerSlot::Decoration(slot));
                    self.renderer.draw_polygon(layer, polygon, &paint);
                }
                None => self.clear_slot(LayerSlot::Decoration(slot)),
            }
        }

        if let Some(notice) = geometry.notice {
            warn!("{}", notice.message());
            self.renderer.log_diagnostic(notice.message());
        }

        if let Some(label) = &geometry.label {
            self.renderer.place_label(label);
        }

        self.geometry = geometry;
    }

    fn clear_slot(&mut self, slot: LayerSlot) {
        if let Some(layer) = self.layers.get(slot) {
            self.renderer.clear_layer(layer);
        }
    }

    /// Feed a measured label size into the ribbon width. Returns whether the
    /// width changed.
    fn apply_label_extent(&mut self, measured: Size) -> bool {
        let extent = self.orientation.spec().extent.of(measured);
        let Ok(width) = non_negative(extent + self.style.autoresize_padding) else {
            return false;
        };
        if width == self.style.ribbon_width {
            return false;
        }
        debug!(from = self.style.ribbon_width, to = width, "autoresizing ribbon width");
        self.style.ribbon_width = width;
        true
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn dash_pattern(&self) -> DashPattern {
        self.dash
    }

    /// Geometry of the last pass; empty while unattached.
    pub fn geometry(&self) -> &RibbonGeometry {
        &self.geometry
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable access to the renderer, e.g. to change label text. Call
    /// [`Ribbon::label_layout_changed`] or [`Ribbon::recompute`] afterwards.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn layers(&self) -> &LayerCache<R::Layer> {
        &self.layers
    }

    // ------------------------------------------------------------------
    // Setters
    // ------------------------------------------------------------------

    /// Replace the whole style at once.
    pub fn set_style(&mut self, style: Style) -> Result<(), RibbonError> {
        self.style = style.validated()?;
        self.recompute();
        Ok(())
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        self.recompute();
    }

    /// Dash pattern for the margin stroke. Only stroke rendering depends on
    /// it, so it is picked up by the next pass rather than forcing one.
    pub fn set_dash_pattern(&mut self, line_width: f64, space_width: f64) -> Result<(), RibbonError> {
        let line_width = non_negative(line_width).map_err(RibbonError::invalid("dash_line_width"))?;
        let space_width =
            non_negative(space_width).map_err(RibbonError::invalid("dash_space_width"))?;
        self.dash = DashPattern::new(line_width, space_width);
        Ok(())
    }

    size_setter!(set_decoration_size => decoration_size);
    size_setter!(set_ribbon_width => ribbon_width);
    size_setter!(set_margin_width => margin_width);
    size_setter!(
        /// Distance from the origin corner or edge to the nearest ribbon point.
        set_origin_distance => origin_distance
    );
    size_setter!(
        /// Only used by `Left`, `Right` and `Top` ribbons.
        set_ribbon_length => ribbon_length
    );
    size_setter!(set_autoresize_padding => autoresize_padding);

    flag_setter!(set_keep_in_bounds => keep_in_bounds);
    flag_setter!(set_moves_horizontally => moves_horizontally);
    flag_setter!(set_uses_shadow => uses_shadow);
    flag_setter!(set_display_decorators => display_decorators);
    flag_setter!(
        /// Track the label size. Turning it on measures the label right away.
        set_autoresizes => autoresizes
    );

    pub fn set_ribbon_color(&mut self, color: Color) {
        self.style.ribbon_color = color;
        self.recompute();
    }

    pub fn set_margin_color(&mut self, color: Color) {
        self.style.margin_color = color;
        self.recompute();
    }
}

fn validate_container(container: Size) -> Result<Size, RibbonError> {
    Size::try_new(container.width, container.height).map_err(|_| RibbonError::InvalidContainer {
        width: container.width,
        height: container.height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, RecordingRenderer};

    fn attached(orientation: Orientation, style: Style, container: Size) -> Ribbon<RecordingRenderer> {
        let mut ribbon = Ribbon::with_style(RecordingRenderer::default(), orientation, style).unwrap();
        ribbon.attach(container).unwrap();
        ribbon
    }

    #[test]
    fn unattached_recompute_is_a_no_op() {
        let mut ribbon = Ribbon::new(RecordingRenderer::default());
        ribbon.set_ribbon_width(30.0).unwrap();
        ribbon.recompute();
        assert!(ribbon.geometry().is_empty());
        assert!(ribbon.renderer().commands().is_empty());
        assert_eq!(ribbon.style().ribbon_width, 30.0);
    }

    #[test]
    fn attach_draws_mask_ribbon_and_folds() {
        let ribbon = attached(Orientation::TopLeftCorner, Style::default(), Size::new(300.0, 200.0));
        let r = ribbon.renderer();
        assert_eq!(
            r.created(),
            &[
                LayerSlot::Ribbon,
                LayerSlot::Decoration(DecorationSlot::First),
                LayerSlot::Decoration(DecorationSlot::FirstShadow),
                LayerSlot::Decoration(DecorationSlot::Second),
                LayerSlot::Decoration(DecorationSlot::SecondShadow),
            ]
        );
        assert_eq!(r.last_mask(), Some(&mask_polygon(Size::new(300.0, 200.0), 18.0)));
        assert_eq!(r.last_polygon(LayerSlot::Ribbon), Some(&ribbon.geometry().outline));
        assert!(r.last_label().is_some());
    }

    #[test]
    fn second_attach_is_rejected() {
        let mut ribbon = attached(Orientation::Left, Style::default(), Size::new(300.0, 200.0));
        assert_eq!(ribbon.attach(Size::new(10.0, 10.0)), Err(RibbonError::AlreadyAttached));
        assert_eq!(ribbon.container(), Some(Size::new(300.0, 200.0)));
    }

    #[test]
    fn detach_allows_reparenting() {
        let mut ribbon = attached(Orientation::Left, Style::default(), Size::new(300.0, 200.0));
        ribbon.detach();
        assert_eq!(ribbon.state(), RibbonState::Unattached);
        assert!(ribbon.layers().is_empty());
        assert!(ribbon.geometry().is_empty());
        assert_eq!(ribbon.renderer().last_polygon(LayerSlot::Ribbon), None);

        ribbon.attach(Size::new(120.0, 80.0)).unwrap();
        assert_eq!(ribbon.container(), Some(Size::new(120.0, 80.0)));
        assert!(!ribbon.geometry().is_empty());
    }

    #[test]
    fn invalid_container_is_rejected() {
        let mut ribbon = Ribbon::new(RecordingRenderer::default());
        let err = ribbon.attach(Size::new(f64::NAN, 10.0)).unwrap_err();
        assert!(matches!(err, RibbonError::InvalidContainer { .. }));
        assert!(!ribbon.is_attached());
    }

    #[test]
    fn layers_are_reused_across_passes() {
        let mut ribbon = attached(Orientation::TopRightCorner, Style::default(), Size::new(300.0, 200.0));
        let created = ribbon.renderer().created().len();
        ribbon.set_origin_distance(10.0).unwrap();
        ribbon.container_resized(Size::new(400.0, 300.0)).unwrap();
        assert_eq!(ribbon.renderer().created().len(), created);
    }

    #[test]
    fn disabling_decorators_clears_folds() {
        let mut ribbon = attached(Orientation::TopLeftCorner, Style::default(), Size::new(300.0, 200.0));
        ribbon.set_display_decorators(false);
        for slot in DecorationSlot::ALL {
            assert_eq!(ribbon.renderer().last_polygon(LayerSlot::Decoration(slot)), None);
        }
        assert!(ribbon.renderer().last_polygon(LayerSlot::Ribbon).is_some());
    }

    #[test]
    fn switching_to_an_edge_clears_second_fold() {
        let mut ribbon = attached(Orientation::TopLeftCorner, Style::default(), Size::new(300.0, 200.0));
        ribbon.set_orientation(Orientation::Right);
        let r = ribbon.renderer();
        assert!(r.last_polygon(LayerSlot::Decoration(DecorationSlot::First)).is_some());
        assert_eq!(r.last_polygon(LayerSlot::Decoration(DecorationSlot::Second)), None);
        assert_eq!(r.last_polygon(LayerSlot::Decoration(DecorationSlot::SecondShadow)), None);
    }

    #[test]
    fn moving_ribbon_logs_diagnostic() {
        let style = Style::default().with_moves_horizontally(true);
        let ribbon = attached(Orientation::TopLeftCorner, style, Size::new(300.0, 200.0));
        assert_eq!(
            ribbon.renderer().diagnostics(),
            vec!["decorations are not available while moves_horizontally is enabled"]
        );
    }

    #[test]
    fn setters_clamp_and_reject() {
        let mut ribbon = Ribbon::new(RecordingRenderer::default());
        ribbon.set_margin_width(-2.0).unwrap();
        assert_eq!(ribbon.style().margin_width, 0.0);
        let err = ribbon.set_decoration_size(f64::INFINITY).unwrap_err();
        assert!(matches!(err, RibbonError::InvalidValue { field: "decoration_size", .. }));
        assert_eq!(ribbon.style().decoration_size, 18.0);
    }

    #[test]
    fn dash_pattern_does_not_redraw() {
        let mut ribbon = attached(Orientation::Top, Style::default(), Size::new(300.0, 200.0));
        ribbon.renderer_mut().clear_commands();
        ribbon.set_dash_pattern(4.0, 2.0).unwrap();
        assert!(ribbon.renderer().commands().is_empty());

        ribbon.recompute();
        let dash = ribbon.renderer().commands().iter().find_map(|c| match c {
            DrawCommand::Polygon { slot: LayerSlot::Ribbon, paint, .. } => Some(paint.dash),
            _ => None,
        });
        assert_eq!(dash, Some(DashPattern::new(4.0, 2.0)));
    }

    #[test]
    fn bounds_mutation_persists_in_style() {
        let style = Style::default().with_ribbon_width(20.0).with_autoresize_padding(10.0);
        let ribbon = attached(Orientation::TopLeftCorner, style, Size::new(25.0, 200.0));
        assert_eq!(ribbon.style().autoresize_padding, 5.0);
    }

    #[test]
    fn autoresize_measures_and_converges() {
        let renderer = RecordingRenderer::new(Size::new(60.0, 14.0));
        let mut ribbon = Ribbon::new(renderer);
        ribbon.attach(Size::new(300.0, 200.0)).unwrap();
        assert_eq!(ribbon.style().ribbon_width, 20.0);
        assert_eq!(ribbon.renderer().measure_calls(), 0);

        ribbon.set_autoresizes(true);
        assert_eq!(ribbon.style().ribbon_width, 24.0);
        assert_eq!(ribbon.renderer().measure_calls(), 1);

        ribbon.renderer_mut().clear_commands();
        ribbon.label_layout_changed(Size::new(60.0, 14.0));
        assert_eq!(ribbon.style().ribbon_width, 24.0);
        assert!(ribbon.renderer().commands().is_empty());
    }

    #[test]
    fn autoresize_follows_new_label_size() {
        let style = Style::default().with_autoresizes(true);
        let renderer = RecordingRenderer::new(Size::new(90.0, 30.0));
        let mut ribbon = Ribbon::with_style(renderer, Orientation::Top, style).unwrap();
        ribbon.attach(Size::new(300.0, 200.0)).unwrap();
        // Top ribbons track the label width.
        assert_eq!(ribbon.style().ribbon_width, 100.0);

        ribbon.label_layout_changed(Size::new(40.0, 30.0));
        assert_eq!(ribbon.style().ribbon_width, 50.0);
    }

    #[test]
    fn layout_event_size_wins_over_renderer() {
        let style = Style::default().with_autoresizes(true);
        let renderer = RecordingRenderer::new(Size::new(40.0, 14.0));
        let mut ribbon = Ribbon::with_style(renderer, Orientation::TopLeftCorner, style).unwrap();
        ribbon.attach(Size::new(300.0, 200.0)).unwrap();
        assert_eq!(ribbon.style().ribbon_width, 24.0);
        let calls = ribbon.renderer().measure_calls();

        // The recorder still reports 14 high; the event says 30.
        ribbon.label_layout_changed(Size::new(40.0, 30.0));
        assert_eq!(ribbon.style().ribbon_width, 40.0);
        assert_eq!(ribbon.renderer().measure_calls(), calls);
        let outline = ribbon.renderer().last_polygon(LayerSlot::Ribbon);
        assert_eq!(outline, Some(&ribbon.geometry().outline));
    }

    #[test]
    fn detach_removes_everything_it_installed() {
        let mut ribbon = attached(Orientation::TopLeftCorner, Style::default(), Size::new(300.0, 200.0));
        assert_eq!(ribbon.renderer().live_layers(), 5);
        ribbon.detach();

        let r = ribbon.renderer();
        assert_eq!(r.live_layers(), 0);
        assert_eq!(r.last_mask(), None);
        assert_eq!(r.last_label(), None);
        for slot in DecorationSlot::ALL {
            assert_eq!(r.last_polygon(LayerSlot::Decoration(slot)), None);
        }
    }

    #[test]
    fn attach_detach_cycles_do_not_leak_layers() {
        let mut ribbon = Ribbon::new(RecordingRenderer::default());
        for _ in 0..3 {
            ribbon.attach(Size::new(240.0, 160.0)).unwrap();
            assert_eq!(ribbon.renderer().live_layers(), 5);
            ribbon.detach();
            assert_eq!(ribbon.renderer().live_layers(), 0);
        }
    }

    #[test]
    fn autoresize_ignored_when_off() {
        let mut ribbon = attached(Orientation::Left, Style::default(), Size::new(300.0, 200.0));
        ribbon.label_layout_changed(Size::new(40.0, 30.0));
        assert_eq!(ribbon.style().ribbon_width, 20.0);
    }
}
