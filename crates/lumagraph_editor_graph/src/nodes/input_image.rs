// SPDX-License-Identifier: MIT OR Apache-2.0
//! Image source node.

use super::NodeContext;
use crate::geometry::preview_size;
use crate::resource::{decode_image, ImageLoadError, ImageRef, ImageResource};
use egui::load::SizedTexture;
use egui::Vec2;
use std::path::Path;
use std::rc::Rc;

/// Loads an image file and publishes it on its output pin.
///
/// This node owns the loaded texture. Replacing or dropping the node
/// releases it.
#[derive(Debug, Default)]
pub struct InputImageNode {
    image: Option<Rc<ImageResource>>,
    error: Option<String>,
}

impl InputImageNode {
    /// Create a node with no image
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an image is loaded
    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    /// Message of the last failed load
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Decode and upload `path`, replacing the current image.
    ///
    /// On failure the current image stays in place.
    pub fn load(&mut self, ctx: &egui::Context, path: &Path) -> Result<ImageRef, ImageLoadError> {
        let decoded = match decode_image(path) {
            Ok(decoded) => decoded,
            Err(err) => {
                tracing::warn!("{err}");
                self.error = Some(err.to_string());
                return Err(err);
            }
        };

        // Release the old texture before uploading the new one
        self.image = None;

        let resource = Rc::new(ImageResource::upload(ctx, path, &decoded));
        tracing::info!("Loaded {} ({}x{})", path.display(), decoded.width, decoded.height);

        let image = ImageRef::new(&resource);
        self.image = Some(resource);
        self.error = None;
        Ok(image)
    }

    /// Render the load button and preview
    pub fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut NodeContext<'_>) {
        if ui.button("Load Image").clicked() && !ctx.image_requests.contains(&ctx.id) {
            ctx.image_requests.push(ctx.id);
        }

        if let Some(error) = &self.error {
            ui.colored_label(ui.visuals().error_fg_color, error.as_str());
        }

        match &self.image {
            Some(image) => {
                let size = preview_size(image.size_vec2(), Vec2::new(ui.available_width(), f32::INFINITY));
                ui.add(egui::Image::new(SizedTexture::new(image.texture_id(), size)));
                let [w, h] = image.size();
                ui.weak(format!("{w} x {h}"));
            }
            None => {
                ui.weak("No image loaded");
            }
        }
    }
}
