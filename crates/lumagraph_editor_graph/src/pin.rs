// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pin definitions for node inputs/outputs.

use crate::node::NodeId;
use crate::resource::ImageRef;
use egui::Pos2;

/// Default hit-test radius of a pin
pub const PIN_HIT_RADIUS: f32 = 6.2;

/// First identifier handed out by [`PinIdGenerator`]
pub const FIRST_PIN_ID: u32 = 1000;

/// Unique identifier for a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PinId(pub u32);

impl std::fmt::Display for PinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pin#{}", self.0)
    }
}

/// Monotonic pin id source. Ids are never reused for the lifetime of a graph.
#[derive(Debug, Clone)]
pub struct PinIdGenerator {
    next: u32,
}

impl PinIdGenerator {
    /// Create a generator starting at [`FIRST_PIN_ID`]
    pub fn new() -> Self {
        Self { next: FIRST_PIN_ID }
    }

    /// Take the next id
    pub fn next_id(&mut self) -> PinId {
        let id = PinId(self.next);
        self.next += 1;
        id
    }
}

impl Default for PinIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinDirection {
    /// Receives data
    Input,
    /// Emits data
    Output,
}

/// A connection point on a node
#[derive(Debug, Clone)]
pub struct Pin {
    /// Unique pin ID
    pub id: PinId,
    /// Display label
    pub label: String,
    /// Screen-space center, recomputed every frame from the owning node
    pub position: Pos2,
    /// Pin direction
    pub direction: PinDirection,
    /// Owning node (back-reference)
    pub owner: NodeId,
    /// Hit-test radius
    pub radius: f32,
    /// Pin belongs to a node that produces data (an image source)
    pub input_role: bool,
    /// An upstream resource has been routed to this pin through the graph
    pub bridged: bool,
    /// Image currently carried by this pin
    pub image: Option<ImageRef>,
}

impl Pin {
    /// Create a new pin
    pub fn new(id: PinId, label: impl Into<String>, direction: PinDirection, owner: NodeId) -> Self {
        Self {
            id,
            label: label.into(),
            position: Pos2::ZERO,
            direction,
            owner,
            radius: PIN_HIT_RADIUS,
            input_role: false,
            bridged: false,
            image: None,
        }
    }

    /// Create a new input pin
    pub fn input(id: PinId, label: impl Into<String>, owner: NodeId) -> Self {
        Self::new(id, label, PinDirection::Input, owner)
    }

    /// Create a new output pin
    pub fn output(id: PinId, label: impl Into<String>, owner: NodeId) -> Self {
        Self::new(id, label, PinDirection::Output, owner)
    }

    /// Mark the pin as belonging to a data source node
    pub fn with_input_role(mut self) -> Self {
        self.input_role = true;
        self
    }

    /// Set the hit-test radius
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Whether this is an input pin
    pub fn is_input(&self) -> bool {
        self.direction == PinDirection::Input
    }

    /// Whether this is an output pin
    pub fn is_output(&self) -> bool {
        self.direction == PinDirection::Output
    }

    /// Whether `point` lies within the hit radius (boundary inclusive)
    pub fn contains(&self, point: Pos2) -> bool {
        self.position.distance(point) <= self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_ids_are_monotonic() {
        let mut ids = PinIdGenerator::new();
        assert_eq!(ids.next_id(), PinId(FIRST_PIN_ID));
        assert_eq!(ids.next_id(), PinId(FIRST_PIN_ID + 1));
        assert_eq!(ids.next_id(), PinId(FIRST_PIN_ID + 2));
    }

    #[test]
    fn test_hit_radius_is_inclusive() {
        let mut pin = Pin::output(PinId(1), "Out", NodeId(1)).with_radius(5.0);
        pin.position = Pos2::new(100.0, 100.0);

        assert!(pin.contains(Pos2::new(100.0, 100.0)));
        assert!(pin.contains(Pos2::new(103.0, 104.0)));
        assert!(!pin.contains(Pos2::new(104.0, 104.0)));
    }
}
