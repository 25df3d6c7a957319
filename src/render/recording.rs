//! A renderer that records every call instead of drawing

use std::collections::HashSet;

use crate::geometry::{LabelPlacement, Polygon};
use crate::types::Size;

use super::{LayerSlot, Paint, Renderer};

/// One recorded renderer call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Polygon {
        slot: LayerSlot,
        polygon: Polygon,
        paint: Paint,
    },
    Clear {
        slot: LayerSlot,
    },
    Remove {
        slot: LayerSlot,
    },
    Mask(Polygon),
    ClearMask,
    Label(LabelPlacement),
    ClearLabel,
    Diagnostic(String),
}

/// Records draw calls; layers are indices into the creation log.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    created: Vec<LayerSlot>,
    live: HashSet<usize>,
    commands: Vec<DrawCommand>,
    label_size: Size,
    measure_calls: usize,
}

impl RecordingRenderer {
    /// A recorder whose label always measures `label_size`.
    pub fn new(label_size: Size) -> Self {
        RecordingRenderer {
            label_size,
            ..Self::default()
        }
    }

    pub fn set_label_size(&mut self, size: Size) {
        self.label_size = size;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forget recorded commands, keeping the created layers.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Slots in the order their layers were created.
    pub fn created(&self) -> &[LayerSlot] {
        &self.created
    }

    /// Layers created and not yet removed.
    pub fn live_layers(&self) -> usize {
        self.live.len()
    }

    pub fn measure_calls(&self) -> usize {
        self.measure_calls
    }

    pub fn diagnostics(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Diagnostic(msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Most recent polygon drawn into `slot`, unless it was cleared or
    /// removed since.
    pub fn last_polygon(&self, slot: LayerSlot) -> Option<&Polygon> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::Polygon { slot: s, polygon, .. } if *s == slot => Some(Some(polygon)),
            DrawCommand::Clear { slot: s } | DrawCommand::Remove { slot: s } if *s == slot => {
                Some(None)
            }
            _ => None,
        })?
    }

    pub fn last_label(&self) -> Option<&LabelPlacement> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::Label(p) => Some(Some(p)),
            DrawCommand::ClearLabel => Some(None),
            _ => None,
        })?
    }

    pub fn last_mask(&self) -> Option<&Polygon> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::Mask(p) => Some(Some(p)),
            DrawCommand::ClearMask => Some(None),
            _ => None,
        })?
    }
}

impl Renderer for RecordingRenderer {
    type Layer = usize;

    fn create_layer(&mut self, slot: LayerSlot) -> usize {
        self.created.push(slot);
        let id = self.created.len() - 1;
        self.live.insert(id);
        id
    }

    fn draw_polygon(&mut self, layer: &usize, polygon: &Polygon, paint: &Paint) {
        if !self.live.contains(layer) {
            return;
        }
        if let Some(&slot) = self.created.get(*layer) {
            self.commands.push(DrawCommand::Polygon {
                slot,
                polygon: polygon.clone(),
                paint: *paint,
            });
        }
    }

    fn clear_layer(&mut self, layer: &usize) {
        if let Some(&slot) = self.created.get(*layer) {
            self.commands.push(DrawCommand::Clear { slot });
        }
    }

    fn remove_layer(&mut self, layer: usize) {
        if !self.live.remove(&layer) {
            return;
        }
        if let Some(&slot) = self.created.get(layer) {
            self.commands.push(DrawCommand::Remove { slot });
        }
    }

    fn draw_mask(&mut self, clip: &Polygon) {
        self.commands.push(DrawCommand::Mask(clip.clone()));
    }

    fn clear_mask(&mut self) {
        self.commands.push(DrawCommand::ClearMask);
    }

    fn place_label(&mut self, placement: &LabelPlacement) {
        self.commands.push(DrawCommand::Label(*placement));
    }

    fn clear_label(&mut self) {
        self.commands.push(DrawCommand::ClearLabel);
    }

    fn measure_label(&mut self) -> Size {
        self.measure_calls += 1;
        self.label_size
    }

    fn log_diagnostic(&mut self, message: &str) {
        self.commands.push(DrawCommand::Diagnostic(message.to_string()));
    }
}
