// SPDX-License-Identifier: MIT OR Apache-2.0
//! Registry of the pins currently published by all nodes.
//!
//! Nodes republish their pins every frame: everything the node owned is
//! erased and the fresh copies are appended. A pin whose node moved can
//! therefore never survive at its old position.

use crate::node::NodeId;
use crate::pin::{Pin, PinId};
use egui::Pos2;

/// Ordered collection of published pins
#[derive(Debug, Clone, Default)]
pub struct PinRegistry {
    pins: Vec<Pin>,
}

impl PinRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { pins: Vec::new() }
    }

    /// Replace every pin owned by `owner` with `pins`.
    ///
    /// Pins of other owners keep their relative order; the new pins are
    /// appended at the end.
    pub fn upsert_for_owner<'a>(&mut self, owner: NodeId, pins: impl IntoIterator<Item = &'a Pin>) {
        self.pins.retain(|p| p.owner != owner);
        self.pins.extend(pins.into_iter().cloned());
    }

    /// Look up a pin by ID
    pub fn find_by_id(&self, id: PinId) -> Option<&Pin> {
        self.pins.iter().find(|p| p.id == id)
    }

    /// Look up a mutable pin by ID
    pub fn find_by_id_mut(&mut self, id: PinId) -> Option<&mut Pin> {
        self.pins.iter_mut().find(|p| p.id == id)
    }

    /// First pin (in registry order) whose hit circle contains `position`.
    ///
    /// This is first-match, not closest-match: with overlapping pins the one
    /// published earliest wins.
    pub fn find_under_pointer(&self, position: Pos2) -> Option<&Pin> {
        self.pins.iter().find(|p| p.contains(position))
    }

    /// Pins published by a node
    pub fn owned_by(&self, owner: NodeId) -> impl Iterator<Item = &Pin> {
        self.pins.iter().filter(move |p| p.owner == owner)
    }

    /// All pins in registry order
    pub fn iter(&self) -> impl Iterator<Item = &Pin> {
        self.pins.iter()
    }

    /// Number of published pins
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    /// Whether no pins are published
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pin_at(id: u32, owner: u32, x: f32, y: f32) -> Pin {
        let mut pin = Pin::output(PinId(id), "Out", NodeId(owner));
        pin.position = Pos2::new(x, y);
        pin
    }

    #[test]
    fn test_upsert_replaces_owner_pins() {
        let mut registry = PinRegistry::new();
        registry.upsert_for_owner(NodeId(1), &[pin_at(1, 1, 0.0, 0.0)]);
        registry.upsert_for_owner(NodeId(2), &[pin_at(2, 2, 10.0, 0.0), pin_at(3, 2, 20.0, 0.0)]);
        registry.upsert_for_owner(NodeId(1), &[pin_at(1, 1, 50.0, 50.0)]);

        assert_eq!(registry.len(), 3);
        let ids: Vec<_> = registry.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(registry.find_by_id(PinId(1)).map(|p| p.position), Some(Pos2::new(50.0, 50.0)));
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let mut registry = PinRegistry::new();
        let pins = [pin_at(1, 1, 5.0, 5.0), pin_at(2, 1, 9.0, 5.0)];
        registry.upsert_for_owner(NodeId(7), &[pin_at(9, 7, 0.0, 0.0)]);
        registry.upsert_for_owner(NodeId(1), &pins);
        let before: Vec<_> = registry.iter().map(|p| (p.id, p.position)).collect();

        registry.upsert_for_owner(NodeId(1), &pins);
        let after: Vec<_> = registry.iter().map(|p| (p.id, p.position)).collect();

        assert_eq!(before, after);
        assert_eq!(registry.owned_by(NodeId(1)).count(), 2);
    }

    #[test]
    fn test_find_by_id_miss() {
        let registry = PinRegistry::new();
        assert!(registry.find_by_id(PinId(42)).is_none());
    }

    #[test]
    fn test_find_under_pointer_first_match_wins() {
        let mut registry = PinRegistry::new();
        registry.upsert_for_owner(NodeId(1), &[pin_at(1, 1, 0.0, 0.0)]);
        registry.upsert_for_owner(NodeId(2), &[pin_at(2, 2, 4.0, 0.0)]);

        // (3, 0) is closer to pin 2 but pin 1 was published first
        let hit = registry.find_under_pointer(Pos2::new(3.0, 0.0));
        assert_eq!(hit.map(|p| p.id), Some(PinId(1)));

        let hit = registry.find_under_pointer(Pos2::new(9.0, 0.0));
        assert_eq!(hit.map(|p| p.id), Some(PinId(2)));

        assert!(registry.find_under_pointer(Pos2::new(100.0, 100.0)).is_none());
    }
}
