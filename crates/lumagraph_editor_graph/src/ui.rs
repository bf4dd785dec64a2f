// SPDX-License-Identifier: MIT OR Apache-2.0
//! Canvas rendering and per-frame orchestration of the graph.
//!
//! One frame runs in this order:
//! - Grid and zoom
//! - Node windows (layout, content, pointer interaction)
//! - Node updates: movement, selection, pin publishing, variant logic
//! - One pass of the drag-to-connect protocol over all published pins
//! - Links, pins and the provisional link on the foreground layer
//! - Status line

use crate::drag::{DragOutcome, PointerSample};
use crate::geometry::{link_control_point, quadratic_bezier_points};
use crate::node::{Node, NodeId, NodeInteraction, NodeTemplate};
use crate::resource::ImageLoadError;
use crate::settings::EditorSettings;
use crate::state::GraphState;
use egui::{Color32, Pos2, Rect, Shape, Stroke, Vec2};
use indexmap::IndexMap;
use std::path::Path;

const LINK_COLOR: Color32 = Color32::WHITE;
const INPUT_PIN_COLOR: Color32 = Color32::from_rgb(120, 200, 120);
const OUTPUT_PIN_COLOR: Color32 = Color32::from_rgb(220, 160, 80);
const SOURCE_PIN_COLOR: Color32 = Color32::from_rgb(90, 170, 240);
const GRID_COLOR: Color32 = Color32::from_rgba_premultiplied(60, 60, 60, 100);

/// The node graph editor: owns the nodes and the graph they share
pub struct GraphEditor {
    nodes: IndexMap<NodeId, Node>,
    state: GraphState,
    settings: EditorSettings,
    zoom: f32,
    image_requests: Vec<NodeId>,
    last_pointer: Pos2,
}

impl GraphEditor {
    /// Create an empty editor
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            nodes: IndexMap::new(),
            state: GraphState::new(),
            settings,
            zoom: 1.0,
            image_requests: Vec::new(),
            last_pointer: Pos2::ZERO,
        }
    }

    /// Editor settings
    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Shared graph data
    pub fn state(&self) -> &GraphState {
        &self.state
    }

    /// Create a node; it is placed on the next frame
    pub fn add_node(&mut self, template: NodeTemplate) -> NodeId {
        let node = Node::new(template, &mut self.state, &self.settings);
        let id = node.id;
        tracing::info!("Created {} ({})", node.name, id);
        self.nodes.insert(id, node);
        id
    }

    /// Get a node by ID
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// All nodes in creation order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of links
    pub fn link_count(&self) -> usize {
        self.state.links.len()
    }

    /// The selected node, if any
    pub fn selected(&self) -> Option<NodeId> {
        self.nodes.values().find(|n| n.selected).map(|n| n.id)
    }

    /// Current zoom level
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Zoom by `notches` wheel steps
    pub fn zoom_by(&mut self, notches: f32) {
        self.zoom = self.settings.clamp_zoom(self.zoom + notches * self.settings.canvas.zoom_step);
    }

    /// Nodes whose "Load Image" button was pressed since the last call
    pub fn take_image_requests(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.image_requests)
    }

    /// Load an image file into a source node
    pub fn load_image(&mut self, node: NodeId, path: &Path, ctx: &egui::Context) -> Result<(), ImageLoadError> {
        match self.nodes.get_mut(&node) {
            Some(node) => node.load_image(ctx, path),
            None => {
                tracing::debug!("Image for unknown {} dropped", node);
                Ok(())
            }
        }
    }

    /// Points of the curve drawn for a link from `start` to `end`
    pub fn link_curve(&self, start: Pos2, end: Pos2) -> Vec<Pos2> {
        let links = &self.settings.links;
        let control = link_control_point(start, end, links.arch);
        quadratic_bezier_points(start, control, end, links.segments)
    }

    /// Render the canvas and run one frame of the graph
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        let canvas = ui.available_rect_before_wrap();
        let response = ui.allocate_rect(canvas, egui::Sense::hover());
        let last_pointer = self.last_pointer;
        let pointer = ui.input(|input| PointerSample::from_input(input, last_pointer));
        self.last_pointer = pointer.position;
        let ctx = ui.ctx().clone();

        if response.hovered() && pointer.wheel != 0.0 {
            self.zoom_by(pointer.wheel);
        }

        self.draw_grid(&ui.painter_at(canvas), canvas);

        let mut interactions = Vec::with_capacity(self.nodes.len());
        for node in self.nodes.values_mut() {
            node.layout(canvas, &self.settings.nodes);
            let interaction = node.ui(&ctx, canvas, &mut self.image_requests);
            interactions.push((node.id, interaction));
        }

        self.advance(canvas, pointer, &interactions);

        let painter = ctx
            .layer_painter(egui::LayerId::new(egui::Order::Foreground, egui::Id::new("lumagraph_links")))
            .with_clip_rect(canvas);
        self.draw_links(&painter);
        self.draw_pins(&painter);
        self.draw_drag_preview(&painter);
        self.draw_status_bar(ui, canvas);
    }

    /// Update every node and run the drag-to-connect protocol once.
    pub fn advance(
        &mut self,
        canvas: Rect,
        pointer: PointerSample,
        interactions: &[(NodeId, NodeInteraction)],
    ) -> DragOutcome {
        // A link drag owns the pointer; nodes stay put underneath it
        let link_dragging = self.state.drag.is_dragging();
        let mut clicked = None;

        for node in self.nodes.values_mut() {
            node.layout(canvas, &self.settings.nodes);

            let mut interaction = interactions
                .iter()
                .find(|(id, _)| *id == node.id)
                .map(|(_, interaction)| *interaction)
                .unwrap_or_default();
            if link_dragging {
                interaction.dragged = false;
            }

            node.apply_interaction(interaction, canvas);
            if node.selected && interaction.clicked {
                clicked = Some(node.id);
            }

            node.update_pins(&mut self.state);
            node.update_logic(&mut self.state);
        }

        if let Some(id) = clicked {
            for node in self.nodes.values_mut() {
                node.selected = node.id == id;
            }
        }

        self.state.process_link_drag(pointer)
    }

    fn draw_grid(&self, painter: &egui::Painter, rect: Rect) {
        let spacing = self.settings.canvas.grid_spacing * self.zoom;
        if spacing <= 0.0 {
            return;
        }
        let stroke = Stroke::new(1.0, GRID_COLOR);

        let mut x = rect.left();
        while x < rect.right() {
            painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
            x += spacing;
        }

        let mut y = rect.top();
        while y < rect.bottom() {
            painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
            y += spacing;
        }
    }

    fn draw_links(&self, painter: &egui::Painter) {
        let stroke = Stroke::new(self.settings.links.thickness, LINK_COLOR);
        for link in self.state.links.iter() {
            let (Some(from), Some(to)) = (self.state.pins.find_by_id(link.from), self.state.pins.find_by_id(link.to)) else {
                continue;
            };
            painter.add(Shape::line(self.link_curve(from.position, to.position), stroke));
        }
    }

    fn draw_pins(&self, painter: &egui::Painter) {
        let radius = self.settings.pins.draw_radius;
        for pin in self.state.pins.iter() {
            let color = if pin.input_role {
                SOURCE_PIN_COLOR
            } else if pin.is_input() {
                INPUT_PIN_COLOR
            } else {
                OUTPUT_PIN_COLOR
            };
            painter.circle_filled(pin.position, radius, color);
            painter.circle_stroke(pin.position, radius, Stroke::new(1.0, Color32::from_gray(30)));
        }
    }

    fn draw_drag_preview(&self, painter: &egui::Painter) {
        if let Some((start, end)) = self.state.drag.preview() {
            let stroke = Stroke::new(self.settings.links.thickness, LINK_COLOR);
            painter.add(Shape::line(self.link_curve(start, end), stroke));
        }
    }

    fn draw_status_bar(&self, ui: &mut egui::Ui, rect: Rect) {
        let status_rect = Rect::from_min_size(
            Pos2::new(rect.left() + 5.0, rect.bottom() - 20.0),
            Vec2::new(rect.width() - 10.0, 18.0),
        );

        let selected = self
            .selected()
            .and_then(|id| self.nodes.get(&id))
            .map_or("None", |node| node.name.as_str());

        ui.painter().text(
            status_rect.left_center(),
            egui::Align2::LEFT_CENTER,
            format!(
                "Nodes: {} | Links: {} | Zoom: {:.0}% | Selected: {}",
                self.node_count(),
                self.link_count(),
                self.zoom * 100.0,
                selected,
            ),
            egui::FontId::proportional(11.0),
            Color32::from_gray(150),
        );
    }
}

impl Default for GraphEditor {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}
