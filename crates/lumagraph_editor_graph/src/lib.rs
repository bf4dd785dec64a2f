// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node graph engine for the Lumagraph image editor.
//!
//! The crate implements the interactive part of the editor:
//! - Pins and the per-frame pin registry
//! - Links and the drag-to-connect protocol
//! - Image nodes (source, brightness/contrast, display)
//! - Resolution of image resources along established links
//! - The canvas orchestrator that drives one frame of the graph
//!
//! ## Architecture
//!
//! All mutable graph data lives in an explicit [`GraphState`] that the
//! [`GraphEditor`] owns and lends to each node while it updates. Everything
//! runs on the UI thread, once per frame.

pub mod geometry;
pub mod pin;
pub mod registry;
pub mod link;
pub mod drag;
pub mod resource;
pub mod state;
pub mod node;
pub mod nodes;
pub mod resolve;
pub mod settings;
pub mod ui;

pub use drag::{DragOutcome, LinkDrag, PointerSample};
pub use link::{ConnectionError, Link, LinkId, LinkSet};
pub use node::{Node, NodeId, NodeInteraction, NodeKind, NodeTemplate};
pub use pin::{Pin, PinDirection, PinId};
pub use registry::PinRegistry;
pub use resource::{ImageLoadError, ImageRef, ImageResource};
pub use settings::EditorSettings;
pub use state::GraphState;
pub use ui::GraphEditor;
