// SPDX-License-Identifier: MIT OR Apache-2.0
//! Resolution of image resources along established links.
//!
//! A display node looks for an image source directly linked to one of its
//! pins (one hop), then for a source linked to some intermediate node that is
//! itself linked to the display node (two hops). Candidates are tried in the
//! order below and the first live one wins:
//!
//! 1. one-hop paths before two-hop paths
//! 2. within a hop count, the oldest link first
//!
//! Sources that have no image, or whose image was released, are skipped.

use crate::node::NodeId;
use crate::pin::PinId;
use crate::registry::PinRegistry;
use crate::resource::ImageRef;
use crate::state::GraphState;

/// Find the image reaching `node` through the link graph.
///
/// On a two-hop match the intermediate node's receiving pin is marked
/// bridged and given the image, so that node can react on its next update.
pub fn resolve_upstream(node: NodeId, state: &mut GraphState) -> Option<ImageRef> {
    if let Some(image) = one_hop(node, state) {
        return Some(image);
    }

    let (bridge, image) = two_hop(node, state)?;
    if let Some(pin) = state.pins.find_by_id_mut(bridge) {
        if !pin.bridged {
            tracing::debug!("Bridged {} of {} towards {}", pin.id, pin.owner, node);
        }
        pin.bridged = true;
        pin.image = Some(image.clone());
    }
    Some(image)
}

/// Image of a source pin, if it still carries one
fn live_source(pins: &PinRegistry, id: PinId) -> Option<ImageRef> {
    let pin = pins.find_by_id(id)?;
    if !pin.input_role {
        return None;
    }
    pin.image.clone().filter(|image| !image.is_released())
}

fn one_hop(node: NodeId, state: &GraphState) -> Option<ImageRef> {
    state.links.iter().find_map(|link| {
        let to = state.pins.find_by_id(link.to)?;
        if to.owner != node {
            return None;
        }
        live_source(&state.pins, link.from)
    })
}

/// Receiving pin of the intermediate node and the image, for the oldest
/// usable two-hop path
fn two_hop(node: NodeId, state: &GraphState) -> Option<(PinId, ImageRef)> {
    state.links.iter().find_map(|first| {
        let image = live_source(&state.pins, first.from)?;
        let middle = state.pins.find_by_id(first.to)?;
        if middle.owner == node {
            return None;
        }

        let reaches_node = state.links.iter().any(|second| {
            let from = state.pins.find_by_id(second.from);
            let to = state.pins.find_by_id(second.to);
            matches!((from, to), (Some(from), Some(to)) if from.owner == middle.owner && to.owner == node)
        });

        reaches_node.then(|| (middle.id, image))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::Pin;
    use crate::resource::test_support::solid_image;
    use crate::resource::ImageResource;
    use std::rc::Rc;

    const SOURCE: NodeId = NodeId(1);
    const MIDDLE: NodeId = NodeId(2);
    const DISPLAY: NodeId = NodeId(3);
    const OTHER_SOURCE: NodeId = NodeId(4);

    fn source_pin(id: u32, owner: NodeId, image: Option<&Rc<ImageResource>>) -> Pin {
        let mut pin = Pin::output(PinId(id), "Image", owner).with_input_role();
        pin.image = image.map(ImageRef::new);
        pin
    }

    fn connect(state: &mut GraphState, from: u32, to: u32) {
        let from = state.pins.find_by_id(PinId(from)).cloned().unwrap();
        let to = state.pins.find_by_id(PinId(to)).cloned().unwrap();
        state.links.connect(&from, &to).unwrap();
    }

    /// SOURCE(10) -> MIDDLE(20 in, 21 out) -> DISPLAY(30)
    fn chain(image: Option<&Rc<ImageResource>>) -> GraphState {
        let mut state = GraphState::new();
        state.pins.upsert_for_owner(SOURCE, &[source_pin(10, SOURCE, image)]);
        state.pins.upsert_for_owner(MIDDLE, &[
            Pin::input(PinId(20), "Image", MIDDLE),
            Pin::output(PinId(21), "Image", MIDDLE),
        ]);
        state.pins.upsert_for_owner(DISPLAY, &[Pin::input(PinId(30), "Image", DISPLAY)]);
        state
    }

    #[test]
    fn test_one_hop() {
        let ctx = egui::Context::default();
        let image = solid_image(&ctx, "a.png", 8, 8);
        let mut state = chain(Some(&image));
        connect(&mut state, 10, 30);

        assert_eq!(resolve_upstream(DISPLAY, &mut state), Some(ImageRef::new(&image)));
        assert!(state.pins.iter().all(|p| !p.bridged));
    }

    #[test]
    fn test_two_hop_marks_bridge() {
        let ctx = egui::Context::default();
        let image = solid_image(&ctx, "a.png", 8, 8);
        let mut state = chain(Some(&image));
        connect(&mut state, 10, 20);
        connect(&mut state, 21, 30);

        assert_eq!(resolve_upstream(DISPLAY, &mut state), Some(ImageRef::new(&image)));

        let bridge = state.pins.find_by_id(PinId(20)).unwrap();
        assert!(bridge.bridged);
        assert_eq!(bridge.image, Some(ImageRef::new(&image)));
        assert!(!state.pins.find_by_id(PinId(21)).unwrap().bridged);
    }

    #[test]
    fn test_nothing_linked() {
        let ctx = egui::Context::default();
        let image = solid_image(&ctx, "a.png", 8, 8);
        let mut state = chain(Some(&image));
        connect(&mut state, 10, 20);

        assert_eq!(resolve_upstream(DISPLAY, &mut state), None);
        assert!(!state.pins.find_by_id(PinId(20)).unwrap().bridged);
    }

    #[test]
    fn test_unloaded_source_is_skipped() {
        let ctx = egui::Context::default();
        let image = solid_image(&ctx, "b.png", 8, 8);
        let mut state = chain(None);
        state.pins.upsert_for_owner(OTHER_SOURCE, &[source_pin(40, OTHER_SOURCE, Some(&image))]);
        connect(&mut state, 10, 30);
        connect(&mut state, 40, 30);

        assert_eq!(resolve_upstream(DISPLAY, &mut state), Some(ImageRef::new(&image)));
    }

    #[test]
    fn test_released_source_is_skipped() {
        let ctx = egui::Context::default();
        let image = solid_image(&ctx, "a.png", 8, 8);
        let mut state = chain(Some(&image));
        connect(&mut state, 10, 30);
        drop(image);

        assert_eq!(resolve_upstream(DISPLAY, &mut state), None);
    }

    #[test]
    fn test_one_hop_beats_older_two_hop() {
        let ctx = egui::Context::default();
        let far = solid_image(&ctx, "far.png", 8, 8);
        let near = solid_image(&ctx, "near.png", 8, 8);
        let mut state = chain(Some(&far));
        state.pins.upsert_for_owner(OTHER_SOURCE, &[source_pin(40, OTHER_SOURCE, Some(&near))]);
        connect(&mut state, 10, 20);
        connect(&mut state, 21, 30);
        connect(&mut state, 40, 30);

        assert_eq!(resolve_upstream(DISPLAY, &mut state), Some(ImageRef::new(&near)));
        assert!(!state.pins.find_by_id(PinId(20)).unwrap().bridged);
    }

    #[test]
    fn test_oldest_link_wins() {
        let ctx = egui::Context::default();
        let first = solid_image(&ctx, "first.png", 8, 8);
        let second = solid_image(&ctx, "second.png", 8, 8);
        let mut state = chain(Some(&first));
        state.pins.upsert_for_owner(OTHER_SOURCE, &[source_pin(40, OTHER_SOURCE, Some(&second))]);
        connect(&mut state, 40, 30);
        connect(&mut state, 10, 30);

        assert_eq!(resolve_upstream(DISPLAY, &mut state), Some(ImageRef::new(&second)));
    }

    #[test]
    fn test_missing_endpoints_are_skipped() {
        let ctx = egui::Context::default();
        let image = solid_image(&ctx, "a.png", 8, 8);
        let mut state = chain(Some(&image));
        connect(&mut state, 10, 20);
        connect(&mut state, 21, 30);

        // The intermediate node stops publishing its pins
        state.pins.upsert_for_owner(MIDDLE, std::iter::empty());
        assert_eq!(resolve_upstream(DISPLAY, &mut state), None);
    }
}
