// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in node variants.
//!
//! - [`BrightnessNode`]: brightness/contrast controls on an upstream image
//! - [`InputImageNode`]: loads an image file and feeds it into the graph
//! - [`OutputImageNode`]: displays whatever image reaches its input

mod brightness;
mod input_image;
mod output_image;

pub use brightness::{BrightnessNode, BRIGHTNESS_RANGE, CONTRAST_RANGE};
pub use input_image::InputImageNode;
pub use output_image::OutputImageNode;

use crate::node::NodeId;
use egui::Rect;

/// What a node's content may see and request while it renders
pub struct NodeContext<'a> {
    /// Node being rendered
    pub id: NodeId,
    /// Canvas the node lives on
    pub canvas: Rect,
    /// Nodes waiting for the user to pick an image file
    pub image_requests: &'a mut Vec<NodeId>,
}
