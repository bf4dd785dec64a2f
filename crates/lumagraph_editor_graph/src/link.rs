// SPDX-License-Identifier: MIT OR Apache-2.0
//! Link (edge) definitions for the graph.

use crate::pin::{Pin, PinId};

/// Unique identifier for a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(pub u32);

/// An established connection from an output pin to an input pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    /// Link ID
    pub id: LinkId,
    /// Source (output) pin
    pub from: PinId,
    /// Destination (input) pin
    pub to: PinId,
}

/// Error when creating a link
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    /// Origin and target are the same pin
    #[error("Cannot connect {0} to itself")]
    SelfLoop(PinId),

    /// Origin is not an output or target is not an input
    #[error("Links must run from an output to an input ({from} -> {to})")]
    IncompatibleDirections {
        /// Origin pin
        from: PinId,
        /// Target pin
        to: PinId,
    },
}

/// Ordered set of established links.
///
/// Direction is validated once, when the link is created; links are never
/// re-validated or removed afterwards.
#[derive(Debug, Clone, Default)]
pub struct LinkSet {
    links: Vec<Link>,
    next_id: u32,
}

impl LinkSet {
    /// Create an empty link set
    pub fn new() -> Self {
        Self { links: Vec::new(), next_id: 0 }
    }

    /// Connect `from` to `to` if it runs output to input
    pub fn connect(&mut self, from: &Pin, to: &Pin) -> Result<LinkId, ConnectionError> {
        if from.id == to.id {
            return Err(ConnectionError::SelfLoop(from.id));
        }

        if !from.is_output() || !to.is_input() {
            return Err(ConnectionError::IncompatibleDirections { from: from.id, to: to.id });
        }

        let id = LinkId(self.next_id);
        self.next_id += 1;
        self.links.push(Link { id, from: from.id, to: to.id });
        Ok(id)
    }

    /// All links in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Link> {
        self.links.iter()
    }

    /// Get a link by ID
    pub fn get(&self, id: LinkId) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }

    /// Links leaving a pin
    pub fn links_from(&self, pin: PinId) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(move |l| l.from == pin)
    }

    /// Links arriving at a pin
    pub fn links_to(&self, pin: PinId) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(move |l| l.to == pin)
    }

    /// Number of links
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether there are no links
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeId;

    #[test]
    fn test_connect_output_to_input() {
        let mut links = LinkSet::new();
        let out = Pin::output(PinId(1), "Out", NodeId(1));
        let inp = Pin::input(PinId(2), "In", NodeId(2));

        let id = links.connect(&out, &inp).unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links.get(id), Some(&Link { id, from: PinId(1), to: PinId(2) }));
        assert_eq!(links.links_to(PinId(2)).count(), 1);
        assert_eq!(links.links_from(PinId(1)).count(), 1);
    }

    #[test]
    fn test_direction_combinations() {
        let out_a = Pin::output(PinId(1), "Out", NodeId(1));
        let out_b = Pin::output(PinId(2), "Out", NodeId(2));
        let in_a = Pin::input(PinId(3), "In", NodeId(1));
        let in_b = Pin::input(PinId(4), "In", NodeId(2));

        let cases = [
            (&out_a, &in_b, true),
            (&out_a, &in_a, true),
            (&in_a, &out_b, false),
            (&in_a, &in_b, false),
            (&out_a, &out_b, false),
        ];

        for (from, to, accepted) in cases {
            let mut links = LinkSet::new();
            let result = links.connect(from, to);
            assert_eq!(result.is_ok(), accepted, "{} -> {}", from.id, to.id);
            assert_eq!(links.len(), usize::from(accepted));
        }
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut links = LinkSet::new();
        let out = Pin::output(PinId(1), "Out", NodeId(1));
        assert_eq!(links.connect(&out, &out), Err(ConnectionError::SelfLoop(PinId(1))));
        assert!(links.is_empty());
    }

    #[test]
    fn test_link_ids_follow_creation_order() {
        let mut links = LinkSet::new();
        let out = Pin::output(PinId(1), "Out", NodeId(1));
        let inp = Pin::input(PinId(2), "In", NodeId(2));

        let first = links.connect(&out, &inp).unwrap();
        let second = links.connect(&out, &inp).unwrap();
        assert!(first < second);
        let order: Vec<_> = links.iter().map(|l| l.id).collect();
        assert_eq!(order, vec![first, second]);
    }
}
