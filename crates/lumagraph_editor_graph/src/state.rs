// SPDX-License-Identifier: MIT OR Apache-2.0
//! Mutable graph data shared by all nodes during a frame.

use crate::drag::{DragOutcome, LinkDrag, PointerSample};
use crate::link::LinkSet;
use crate::node::NodeId;
use crate::pin::{PinId, PinIdGenerator};
use crate::registry::PinRegistry;

/// Pins, links and the in-flight link drag of one graph
#[derive(Debug, Clone, Default)]
pub struct GraphState {
    /// Pins published this frame
    pub pins: PinRegistry,
    /// Established links
    pub links: LinkSet,
    /// Provisional link being dragged
    pub drag: LinkDrag,
    pin_ids: PinIdGenerator,
    next_node_id: u32,
}

impl GraphState {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a pin ID
    pub fn next_pin_id(&mut self) -> PinId {
        self.pin_ids.next_id()
    }

    /// Allocate a node ID
    pub fn next_node_id(&mut self) -> NodeId {
        self.next_node_id += 1;
        NodeId(self.next_node_id)
    }

    /// Run one frame of the drag-to-connect protocol
    pub fn process_link_drag(&mut self, pointer: PointerSample) -> DragOutcome {
        self.drag.update(pointer, &self.pins, &mut self.links)
    }
}
