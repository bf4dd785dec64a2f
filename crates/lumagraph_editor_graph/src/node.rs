// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the graph.
//!
//! Every node owns its pins and republishes them once per frame. The node
//! variants themselves live in [`crate::nodes`].

use crate::geometry::clamp_to_range;
use crate::nodes::{BrightnessNode, InputImageNode, NodeContext, OutputImageNode};
use crate::pin::{Pin, PinDirection};
use crate::resolve::resolve_upstream;
use crate::resource::{ImageLoadError, ImageRef};
use crate::settings::{EditorSettings, NodeSettings};
use crate::state::GraphState;
use egui::{Color32, Pos2, Rect, RichText, Sense, Stroke, Vec2};
use std::path::Path;

/// Vertical offset of the first pin from the top of the node
pub const PIN_TOP: f32 = 120.0;

/// Vertical distance between consecutive pins
pub const PIN_SPACING: f32 = 24.0;

const NODE_ROUNDING: f32 = 7.0;
const SELECTED_OUTLINE: Color32 = Color32::from_rgb(100, 150, 255);

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// The kinds of node a user can create
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTemplate {
    /// Brightness/contrast adjustment
    Brightness,
    /// Image file source
    InputImage,
    /// Image display
    OutputImage,
}

impl NodeTemplate {
    /// All templates in palette order
    pub const ALL: [NodeTemplate; 3] = [Self::Brightness, Self::InputImage, Self::OutputImage];

    /// Display name
    pub fn label(self) -> &'static str {
        match self {
            Self::Brightness => "Brightness",
            Self::InputImage => "Input Image",
            Self::OutputImage => "Output Image",
        }
    }

    /// Text of the palette button that creates this node
    pub fn create_label(self) -> &'static str {
        match self {
            Self::Brightness => "Create Brightness Node",
            Self::InputImage => "Create Input Node",
            Self::OutputImage => "Create Output Node",
        }
    }
}

/// Variant-specific node data
#[derive(Debug)]
pub enum NodeKind {
    /// Brightness/contrast adjustment
    Brightness(BrightnessNode),
    /// Image file source
    InputImage(InputImageNode),
    /// Image display
    OutputImage(OutputImageNode),
}

impl NodeKind {
    /// Template this kind was created from
    pub fn template(&self) -> NodeTemplate {
        match self {
            Self::Brightness(_) => NodeTemplate::Brightness,
            Self::InputImage(_) => NodeTemplate::InputImage,
            Self::OutputImage(_) => NodeTemplate::OutputImage,
        }
    }
}

/// Pointer interaction with a node's body during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeInteraction {
    /// Pointer is over the node
    pub hovered: bool,
    /// Node was clicked this frame
    pub clicked: bool,
    /// Node body is being dragged
    pub dragged: bool,
    /// Pointer movement of the drag this frame
    pub delta: Vec2,
}

/// Local offset of the `index`-th pin of a node `width` wide
pub fn pin_offset(direction: PinDirection, index: usize, width: f32) -> Vec2 {
    let x = match direction {
        PinDirection::Input => 0.0,
        PinDirection::Output => width,
    };
    Vec2::new(x, PIN_TOP + index as f32 * PIN_SPACING)
}

/// A node instance on the canvas
#[derive(Debug)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Display name
    pub name: String,
    /// Screen-space rectangle
    pub rect: Rect,
    /// Whether the node is selected
    pub selected: bool,
    /// Input pins
    pub inputs: Vec<Pin>,
    /// Output pins
    pub outputs: Vec<Pin>,
    /// Variant data
    pub kind: NodeKind,
    placed: bool,
}

impl Node {
    /// Create a node, allocating its IDs from `state`
    pub fn new(template: NodeTemplate, state: &mut GraphState, settings: &EditorSettings) -> Self {
        let id = state.next_node_id();
        let radius = settings.pins.hit_radius;

        let (inputs, outputs, kind) = match template {
            NodeTemplate::Brightness => (
                vec![Pin::input(state.next_pin_id(), "Image", id).with_radius(radius)],
                vec![Pin::output(state.next_pin_id(), "Image", id).with_radius(radius)],
                NodeKind::Brightness(BrightnessNode::new()),
            ),
            NodeTemplate::InputImage => (
                Vec::new(),
                vec![Pin::output(state.next_pin_id(), "Image", id)
                    .with_input_role()
                    .with_radius(radius)],
                NodeKind::InputImage(InputImageNode::new()),
            ),
            NodeTemplate::OutputImage => (
                vec![Pin::input(state.next_pin_id(), "Image", id).with_radius(radius)],
                Vec::new(),
                NodeKind::OutputImage(OutputImageNode::new()),
            ),
        };

        Self {
            id,
            name: format!("{} {}", template.label(), id.0),
            rect: Rect::from_min_size(Pos2::ZERO, Vec2::from(settings.nodes.size)),
            selected: false,
            inputs,
            outputs,
            kind,
            placed: false,
        }
    }

    /// Template this node was created from
    pub fn template(&self) -> NodeTemplate {
        self.kind.template()
    }

    /// Whether the node has been given its initial position
    pub fn is_placed(&self) -> bool {
        self.placed
    }

    /// All pins, inputs first
    pub fn pins(&self) -> impl Iterator<Item = &Pin> {
        self.inputs.iter().chain(self.outputs.iter())
    }

    /// Place the node on its first appearance. Later calls keep the
    /// position the user dragged it to.
    pub fn layout(&mut self, canvas: Rect, settings: &NodeSettings) {
        if self.placed {
            return;
        }
        let min = canvas.min + Vec2::from(settings.spawn_offset);
        self.rect = Rect::from_min_size(min, Vec2::from(settings.size));
        self.placed = true;
    }

    /// Apply this frame's pointer interaction, keeping the node inside `canvas`
    pub fn apply_interaction(&mut self, interaction: NodeInteraction, canvas: Rect) {
        if interaction.hovered && interaction.clicked {
            self.selected = true;
        }

        if interaction.dragged && interaction.delta != Vec2::ZERO {
            let size = self.rect.size();
            let moved = self.rect.min + interaction.delta;
            let min = Pos2::new(
                clamp_to_range(moved.x, canvas.min.x, canvas.max.x - size.x),
                clamp_to_range(moved.y, canvas.min.y, canvas.max.y - size.y),
            );
            self.rect = Rect::from_min_size(min, size);
        }
    }

    /// Recompute pin positions and republish them.
    ///
    /// Graph resolution writes the bridged flag and carried image straight
    /// into the registry; those are taken over first so republishing does
    /// not erase them. Source pins keep the image their node attached.
    pub fn update_pins(&mut self, state: &mut GraphState) {
        let origin = self.rect.min;
        let width = self.rect.width();

        for (index, pin) in self.inputs.iter_mut().enumerate() {
            pin.position = origin + pin_offset(PinDirection::Input, index, width);
        }
        for (index, pin) in self.outputs.iter_mut().enumerate() {
            pin.position = origin + pin_offset(PinDirection::Output, index, width);
        }

        for pin in self.inputs.iter_mut().chain(self.outputs.iter_mut()) {
            if pin.input_role {
                continue;
            }
            if let Some(published) = state.pins.find_by_id(pin.id) {
                pin.bridged = published.bridged;
                pin.image = published.image.clone();
            }
        }

        state.pins.upsert_for_owner(self.id, self.inputs.iter().chain(self.outputs.iter()));
    }

    /// React to the graph after the pins were published
    pub fn update_logic(&mut self, state: &mut GraphState) {
        let id = self.id;
        match &mut self.kind {
            NodeKind::Brightness(node) => node.adopt_bridged(state.pins.owned_by(id)),
            NodeKind::InputImage(_) => {}
            NodeKind::OutputImage(node) => node.set_resolved(resolve_upstream(id, state)),
        }
    }

    /// Load an image file into a source node and attach it to its output pin
    pub fn load_image(&mut self, ctx: &egui::Context, path: &Path) -> Result<(), ImageLoadError> {
        let id = self.id;
        let NodeKind::InputImage(source) = &mut self.kind else {
            tracing::warn!("{} does not accept images", id);
            return Ok(());
        };

        let image = source.load(ctx, path)?;
        if let Some(pin) = self.outputs.first_mut() {
            pin.image = Some(image);
        }
        Ok(())
    }

    /// Image shown by a display node
    pub fn resolved_image(&self) -> Option<&ImageRef> {
        match &self.kind {
            NodeKind::OutputImage(node) => node.resolved(),
            _ => None,
        }
    }

    /// Render the node window and its content
    pub fn ui(&mut self, ctx: &egui::Context, canvas: Rect, image_requests: &mut Vec<NodeId>) -> NodeInteraction {
        let id = self.id;
        let rect = self.rect;
        let selected = self.selected;
        let name = &self.name;
        let kind = &mut self.kind;

        let area = egui::Area::new(egui::Id::new(("lumagraph_node", id.0)))
            .fixed_pos(rect.min)
            .show(ctx, |ui| {
                // Registered before the content so widgets stay on top of it
                let body = ui.interact(rect, egui::Id::new(("lumagraph_node_body", id.0)), Sense::click_and_drag());

                let frame = egui::Frame::window(ui.style()).rounding(NODE_ROUNDING);
                let inner = rect.size() - frame.inner_margin.sum() - frame.outer_margin.sum();
                frame.show(ui, |ui| {
                    ui.set_min_size(inner);
                    ui.set_max_width(inner.x);
                    ui.label(RichText::new(name.as_str()).strong());
                    ui.separator();

                    let mut node_ctx = NodeContext { id, canvas, image_requests };
                    match kind {
                        NodeKind::Brightness(node) => node.ui(ui),
                        NodeKind::InputImage(node) => node.ui(ui, &mut node_ctx),
                        NodeKind::OutputImage(node) => node.ui(ui, &node_ctx),
                    }
                });

                if selected {
                    ui.painter().rect_stroke(rect, NODE_ROUNDING, Stroke::new(1.5, SELECTED_OUTLINE));
                }
                body
            });

        let body = area.inner;
        NodeInteraction {
            hovered: body.hovered(),
            clicked: body.clicked(),
            dragged: body.dragged(),
            delta: body.drag_delta(),
        }
    }
}
