//! SVG generation

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::geometry::{LabelPlacement, Polygon, fmt_num};
use crate::types::{Color, Point, Size};

use super::{LayerSlot, Paint, Renderer};

const CLIP_ID: &str = "ribbon-mask";
const SHADOW_ID: &str = "ribbon-shadow";

/// Default label font size in points.
pub const FONT_SIZE: f64 = 12.0;
/// Line box height as a multiple of the font size.
pub const LINE_HEIGHT: f64 = 1.2;
/// Average glyph advance relative to the font size.
const CHAR_ASPECT: f64 = 0.08 / 0.14;

/// Proportional character widths in hundredths of an average glyph, for
/// printable ASCII starting at `' '`.
#[rustfmt::skip]
pub const AW_CHAR: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Width of one line in hundredths of an average glyph.
pub fn text_length(line: &str) -> u32 {
    line.chars()
        .map(|c| match c {
            ' '..='~' => u32::from(AW_CHAR[(c as usize) - 0x20]),
            _ => 100,
        })
        .sum()
}

/// Natural size of a (possibly multi-line) label.
pub fn measure_text(text: &str, font_size: f64) -> Size {
    if text.is_empty() {
        return Size::ZERO;
    }
    let widest = text.lines().map(text_length).max().unwrap_or(0);
    let lines = text.lines().count().max(1);
    Size::new(
        f64::from(widest) * 0.01 * font_size * CHAR_ASPECT,
        lines as f64 * font_size * LINE_HEIGHT,
    )
}

/// Escape text content and attribute values.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn paint_color(out: &mut String, attr: &str, color: Color) {
    let _ = write!(out, r#" {}="{}""#, attr, color.to_rgb_string());
    if !color.is_opaque() {
        let _ = write!(out, r#" {}-opacity="{}""#, attr, fmt_num(color.a));
    }
}

/// One `<path>` element for a painted polygon.
pub(crate) fn polygon_element(polygon: &Polygon, paint: &Paint) -> String {
    let mut el = format!(r#"<path d="{}""#, polygon.to_path_data());
    paint_color(&mut el, "fill", paint.fill);
    match paint.stroke {
        Some(stroke) if paint.stroke_width > 0.0 => {
            paint_color(&mut el, "stroke", stroke);
            let _ = write!(el, r#" stroke-width="{}""#, fmt_num(paint.stroke_width));
            if !paint.dash.is_solid() {
                let _ = write!(
                    el,
                    r#" stroke-dasharray="{} {}""#,
                    fmt_num(paint.dash.line_width),
                    fmt_num(paint.dash.space_width)
                );
            }
        }
        _ => el.push_str(r#" stroke="none""#),
    }
    if paint.shadow.is_some() {
        let _ = write!(el, r#" filter="url(#{})""#, SHADOW_ID);
    }
    el.push_str("/>");
    el
}

#[derive(Debug, Clone)]
struct SvgLayer {
    slot: LayerSlot,
    content: Option<(Polygon, Paint)>,
}

/// Renders one ribbon into a standalone SVG document.
///
/// The document's viewport is the clip mask, i.e. the container grown by the
/// decoration size, so folds outside the container stay visible.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    text: String,
    font_size: f64,
    text_color: Color,
    background: Option<Color>,
    layers: BTreeMap<usize, SvgLayer>,
    next_layer: usize,
    mask: Option<Polygon>,
    label: Option<LabelPlacement>,
    diagnostics: Vec<String>,
}

impl SvgRenderer {
    pub fn new(text: impl Into<String>) -> Self {
        SvgRenderer {
            text: text.into(),
            font_size: FONT_SIZE,
            text_color: Color::WHITE,
            background: None,
            layers: BTreeMap::new(),
            next_layer: 0,
            mask: None,
            label: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// Fill the container area, to show what the ribbon wraps.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    /// Layers created and not yet removed.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Top-left of the overlay and its size, taken from the mask.
    fn viewport(&self) -> (Point, Size) {
        let Some(mask) = self.mask.as_ref().filter(|m| !m.is_empty()) else {
            return (Point::ZERO, Size::ZERO);
        };
        let min = mask.points.iter().copied().fold(Point::splat(f64::MAX), Point::min);
        let max = mask.points.iter().copied().fold(Point::splat(f64::MIN), Point::max);
        (min, Size::new(max.x - min.x, max.y - min.y))
    }

    /// Serialize everything drawn so far.
    pub fn finish(&self) -> String {
        let (origin, size) = self.viewport();
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}">"#,
            fmt_num(origin.x),
            fmt_num(origin.y),
            fmt_num(size.width),
            fmt_num(size.height),
            fmt_num(size.width),
            fmt_num(size.height),
        );

        let mut layers: Vec<_> = self
            .layers
            .values()
            .filter_map(|l| Some((l.slot, l.content.as_ref()?)))
            .collect();
        layers.sort_by_key(|(slot, _)| *slot);

        out.push_str("<defs>\n");
        if let Some(mask) = &self.mask {
            let _ = writeln!(
                out,
                r#"<clipPath id="{}"><path d="{}"/></clipPath>"#,
                CLIP_ID,
                mask.to_path_data()
            );
        }
        if let Some(shadow) = layers.iter().find_map(|(_, (_, paint))| paint.shadow) {
            let _ = writeln!(
                out,
                r#"<filter id="{}" x="-50%" y="-50%" width="200%" height="200%"><feDropShadow dx="{}" dy="{}" stdDeviation="{}" flood-color="{}" flood-opacity="{}"/></filter>"#,
                SHADOW_ID,
                fmt_num(shadow.offset.x),
                fmt_num(shadow.offset.y),
                fmt_num(shadow.radius / 2.0),
                shadow.color.to_rgb_string(),
                fmt_num(shadow.opacity),
            );
        }
        out.push_str("</defs>\n");

        if self.mask.is_some() {
            let _ = writeln!(out, r#"<g clip-path="url(#{})">"#, CLIP_ID);
        } else {
            out.push_str("<g>\n");
        }

        if let Some(bg) = self.background {
            let inner = size.inflate(origin.x);
            let container = Polygon::rect(Point::ZERO, inner);
            let paint = Paint {
                fill: bg,
                stroke: None,
                stroke_width: 0.0,
                dash: Default::default(),
                shadow: None,
            };
            out.push_str(&polygon_element(&container, &paint));
            out.push('\n');
        }

        for (_, (polygon, paint)) in &layers {
            out.push_str(&polygon_element(polygon, paint));
            out.push('\n');
        }

        if let Some(label) = &self.label {
            self.write_label(&mut out, label, origin);
        }

        out.push_str("</g>\n</svg>\n");
        out
    }

    fn write_label(&self, out: &mut String, label: &LabelPlacement, origin: Point) {
        if self.text.is_empty() {
            return;
        }
        // The viewport starts at the overlay origin, so its offset is the
        // decoration size.
        let center = label.center_in_container(-origin.x);
        let (cx, cy) = (fmt_num(center.x), fmt_num(center.y));
        let line_step = self.font_size * LINE_HEIGHT;
        let lines: Vec<_> = self.text.lines().collect();
        let first_dy = -(lines.len().saturating_sub(1) as f64) * line_step / 2.0;

        let _ = write!(
            out,
            r#"<text x="{cx}" y="{cy}" font-family="sans-serif" font-size="{}" text-anchor="middle" dominant-baseline="central""#,
            fmt_num(self.font_size),
        );
        paint_color(out, "fill", self.text_color);
        if label.rotation != 0.0 {
            let _ = write!(
                out,
                r#" transform="rotate({} {cx} {cy})""#,
                fmt_num(label.rotation_degrees())
            );
        }
        if lines.len() == 1 {
            self.write_fit(out, lines[0], label.inner_width);
            out.push('>');
            out.push_str(&escape(lines[0]));
        } else {
            out.push('>');
            for (i, line) in lines.iter().enumerate() {
                let dy = if i == 0 { first_dy } else { line_step };
                let _ = write!(out, r#"<tspan x="{cx}" dy="{}""#, fmt_num(dy));
                self.write_fit(out, line, label.inner_width);
                let _ = write!(out, ">{}</tspan>", escape(line));
            }
        }
        out.push_str("</text>\n");
    }

    /// Squeeze a line that is wider than the band's inner edge.
    fn write_fit(&self, out: &mut String, line: &str, inner_width: f64) {
        let width = measure_text(line, self.font_size).width;
        if inner_width > 0.0 && width > inner_width {
            let _ = write!(
                out,
                r#" textLength="{}" lengthAdjust="spacingAndGlyphs""#,
                fmt_num(inner_width)
            );
        }
    }
}

impl Renderer for SvgRenderer {
    type Layer = usize;

    fn create_layer(&mut self, slot: LayerSlot) -> usize {
        let id = self.next_layer;
        self.next_layer += 1;
        self.layers.insert(
            id,
            SvgLayer {
                slot,
                content: None,
            },
        );
        id
    }

    fn draw_polygon(&mut self, layer: &usize, polygon: &Polygon, paint: &Paint) {
        if let Some(l) = self.layers.get_mut(layer) {
            l.content = Some((polygon.clone(), *paint));
        }
    }

    fn clear_layer(&mut self, layer: &usize) {
        if let Some(l) = self.layers.get_mut(layer) {
            l.content = None;
        }
    }

    fn remove_layer(&mut self, layer: usize) {
        self.layers.remove(&layer);
    }

    fn draw_mask(&mut self, clip: &Polygon) {
        self.mask = Some(clip.clone());
    }

    fn clear_mask(&mut self) {
        self.mask = None;
    }

    fn place_label(&mut self, placement: &LabelPlacement) {
        self.label = Some(*placement);
    }

    fn clear_label(&mut self) {
        self.label = None;
    }

    fn measure_label(&mut self) -> Size {
        measure_text(&self.text, self.font_size)
    }

    fn log_diagnostic(&mut self, message: &str) {
        self.diagnostics.push(message.to_string());
    }
}
