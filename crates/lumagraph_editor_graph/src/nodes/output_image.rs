// SPDX-License-Identifier: MIT OR Apache-2.0
//! Display node.

use super::NodeContext;
use crate::geometry::preview_size;
use crate::resource::ImageRef;
use egui::load::SizedTexture;
use egui::{Rect, Vec2};

/// Shows the image that reaches its input through the graph
#[derive(Debug, Default)]
pub struct OutputImageNode {
    resolved: Option<ImageRef>,
}

impl OutputImageNode {
    /// Create a node showing nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Image resolved on the last update
    pub fn resolved(&self) -> Option<&ImageRef> {
        self.resolved.as_ref()
    }

    /// Store the result of graph resolution
    pub fn set_resolved(&mut self, image: Option<ImageRef>) {
        self.resolved = image;
    }

    /// Box a preview must fit in: a quarter of the canvas, no wider than
    /// the available width
    pub fn preview_box(available_width: f32, canvas: Rect) -> Vec2 {
        Vec2::new(available_width.min(canvas.width() / 4.0), canvas.height() / 4.0)
    }

    /// Size the resolved image is drawn at, if one is available
    pub fn preview_size(&self, available_width: f32, canvas: Rect) -> Option<Vec2> {
        let image = self.resolved.as_ref()?.get()?;
        Some(preview_size(image.size_vec2(), Self::preview_box(available_width, canvas)))
    }

    /// Render the preview or the placeholder
    pub fn ui(&mut self, ui: &mut egui::Ui, ctx: &NodeContext<'_>) {
        let image = self.resolved.as_ref().and_then(ImageRef::get);
        let size = self.preview_size(ui.available_width(), ctx.canvas);
        match image.zip(size) {
            Some((image, size)) => {
                ui.add(egui::Image::new(SizedTexture::new(image.texture_id(), size)));
            }
            None => {
                ui.label("Display Output");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::test_support::solid_image;
    use egui::Pos2;

    fn canvas() -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::new(1200.0, 800.0))
    }

    #[test]
    fn test_preview_box() {
        assert_eq!(OutputImageNode::preview_box(500.0, canvas()), Vec2::new(300.0, 200.0));
        assert_eq!(OutputImageNode::preview_box(120.0, canvas()), Vec2::new(120.0, 200.0));
    }

    #[test]
    fn test_preview_size_keeps_aspect() {
        let ctx = egui::Context::default();
        let image = solid_image(&ctx, "wide.png", 400, 100);

        let mut node = OutputImageNode::new();
        assert!(node.preview_size(100.0, canvas()).is_none());

        node.set_resolved(Some(ImageRef::new(&image)));
        assert_eq!(node.preview_size(100.0, canvas()), Some(Vec2::new(100.0, 25.0)));

        drop(image);
        assert!(node.preview_size(100.0, canvas()).is_none());
    }
}
