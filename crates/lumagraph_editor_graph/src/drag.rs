// SPDX-License-Identifier: MIT OR Apache-2.0
//! Drag-to-connect protocol.
//!
//! Pressing the primary button over any pin starts a provisional link from
//! that pin. While the button is held the provisional link follows the
//! pointer. Releasing over a different pin tries to commit the link; the
//! direction check happens only then. Releasing anywhere else drops it.

use crate::link::{ConnectionError, LinkId, LinkSet};
use crate::pin::PinId;
use crate::registry::PinRegistry;
use egui::{Pos2, Vec2};

/// Scroll distance egui-winit reports for one wheel line
pub const POINTS_PER_WHEEL_NOTCH: f32 = 50.0;

/// Pointer state sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    /// Current pointer position (screen space)
    pub position: Pos2,
    /// Primary button went down this frame
    pub pressed: bool,
    /// Primary button is held
    pub down: bool,
    /// Primary button went up this frame
    pub released: bool,
    /// Pointer movement since last frame
    pub delta: Vec2,
    /// Vertical wheel movement in notches (positive scrolls up), fractional
    /// for smooth scrolling
    pub wheel: f32,
}

impl PointerSample {
    /// Sample the pointer from egui input state.
    ///
    /// `last_position` is used while the pointer is outside the window.
    pub fn from_input(input: &egui::InputState, last_position: Pos2) -> Self {
        Self {
            position: input.pointer.hover_pos().unwrap_or(last_position),
            pressed: input.pointer.primary_pressed(),
            down: input.pointer.primary_down(),
            released: input.pointer.primary_released(),
            delta: input.pointer.delta(),
            wheel: input.raw_scroll_delta.y / POINTS_PER_WHEEL_NOTCH,
        }
    }

    /// Pointer at rest at `position`
    pub fn at(position: Pos2) -> Self {
        Self { position, ..Default::default() }
    }

    /// Button pressed at `position`
    pub fn press(position: Pos2) -> Self {
        Self { position, pressed: true, down: true, ..Default::default() }
    }

    /// Button held at `position`
    pub fn hold(position: Pos2) -> Self {
        Self { position, down: true, ..Default::default() }
    }

    /// Button released at `position`
    pub fn release(position: Pos2) -> Self {
        Self { position, released: true, ..Default::default() }
    }

    /// Button pressed and released within one frame at `position`
    pub fn click(position: Pos2) -> Self {
        Self { position, pressed: true, released: true, ..Default::default() }
    }

    /// Whether the button is up by the end of this frame
    fn ends_drag(&self) -> bool {
        self.released || !self.down
    }
}

/// State of the provisional link
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum LinkDrag {
    /// No link is being dragged
    #[default]
    Idle,
    /// A link is being dragged from `origin`
    Dragging {
        /// Pin the drag started on
        origin: PinId,
        /// Position of the origin pin when the drag began
        origin_pos: Pos2,
        /// Latest pointer position
        pointer: Pos2,
    },
}

/// What one frame of the protocol did
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Nothing changed
    None,
    /// A drag started on this pin
    Started(PinId),
    /// The drag was committed as a new link
    Connected(LinkId),
    /// The drag ended on a pin but the link was refused
    Rejected(ConnectionError),
    /// The drag ended away from any other pin
    Cancelled,
}

impl LinkDrag {
    /// Whether a link is being dragged
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Endpoints of the provisional curve, if dragging
    pub fn preview(&self) -> Option<(Pos2, Pos2)> {
        match *self {
            Self::Dragging { origin_pos, pointer, .. } => Some((origin_pos, pointer)),
            Self::Idle => None,
        }
    }

    /// Run one frame of the protocol against the published pins.
    pub fn update(&mut self, pointer: PointerSample, pins: &PinRegistry, links: &mut LinkSet) -> DragOutcome {
        match *self {
            Self::Idle => {
                if !pointer.pressed {
                    return DragOutcome::None;
                }
                let Some(pin) = pins.find_under_pointer(pointer.position) else {
                    return DragOutcome::None;
                };

                tracing::debug!("Begin link drag from {}", pin.id);
                if pointer.ends_drag() {
                    // Clicked in one frame; the button is already up
                    return Self::complete(pin.id, pointer.position, pins, links);
                }
                *self = Self::Dragging {
                    origin: pin.id,
                    origin_pos: pin.position,
                    pointer: pointer.position,
                };
                DragOutcome::Started(pin.id)
            }

            Self::Dragging { origin, origin_pos, .. } => {
                if !pointer.ends_drag() {
                    *self = Self::Dragging { origin, origin_pos, pointer: pointer.position };
                    return DragOutcome::None;
                }

                *self = Self::Idle;
                Self::complete(origin, pointer.position, pins, links)
            }
        }
    }

    fn complete(origin: PinId, position: Pos2, pins: &PinRegistry, links: &mut LinkSet) -> DragOutcome {
        let target = match pins.find_under_pointer(position) {
            Some(target) if target.id != origin => target,
            _ => {
                tracing::debug!("Link drag from {} cancelled", origin);
                return DragOutcome::Cancelled;
            }
        };

        // The origin pin may have vanished while dragging
        let Some(source) = pins.find_by_id(origin) else {
            tracing::debug!("Link drag origin {} no longer exists", origin);
            return DragOutcome::Cancelled;
        };

        match links.connect(source, target) {
            Ok(id) => {
                tracing::debug!("Linked {} -> {}", source.id, target.id);
                DragOutcome::Connected(id)
            }
            Err(err) => {
                tracing::debug!("Link rejected: {err}");
                DragOutcome::Rejected(err)
            }
        }
    }
}
