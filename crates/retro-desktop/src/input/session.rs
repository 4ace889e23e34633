//! Drag/resize session state machine
//!
//! `idle -> moving | resizing -> idle`. At most one interaction is live;
//! beginning a new one ends the previous one first.

use crate::config::WmConfig;
use crate::math::{Point, Rect, Size};
use crate::window::{ResizeEdge, WindowId};
use super::{drag_rect, resize_rect};

/// A live pointer interaction
#[derive(Clone, Debug, PartialEq)]
pub enum Interaction {
    /// Dragging a window by its title bar
    Move {
        /// Window being moved
        window_id: WindowId,
        /// Window geometry at pointer-down
        start: Rect,
        /// Pointer position at pointer-down
        origin: Point,
    },
    /// Dragging a resize handle
    Resize {
        /// Window being resized
        window_id: WindowId,
        /// Which handle
        edge: ResizeEdge,
        /// Window geometry at pointer-down
        start: Rect,
        /// Pointer position at pointer-down
        origin: Point,
    },
}

impl Interaction {
    /// Window this interaction targets
    pub fn window_id(&self) -> &WindowId {
        match self {
            Interaction::Move { window_id, .. } | Interaction::Resize { window_id, .. } => window_id,
        }
    }

    /// Check if this is a window move
    #[inline]
    pub fn is_move(&self) -> bool {
        matches!(self, Interaction::Move { .. })
    }

    /// Check if this is a window resize
    #[inline]
    pub fn is_resize(&self) -> bool {
        matches!(self, Interaction::Resize { .. })
    }

    /// Geometry for the current pointer position
    pub fn geometry_at(&self, pointer: Point, desktop: Size, config: &WmConfig) -> Rect {
        match self {
            Interaction::Move { start, origin, .. } => drag_rect(*start, pointer - *origin, desktop, config),
            Interaction::Resize { edge, start, origin, .. } => {
                resize_rect(*edge, *start, pointer - *origin, desktop, config)
            }
        }
    }
}

/// Holder for the (at most one) live interaction
#[derive(Debug, Default)]
pub struct InteractionSession {
    active: Option<Interaction>,
}

impl InteractionSession {
    /// Create an idle session
    pub fn new() -> Self {
        Self { active: None }
    }

    /// Current interaction, if any
    #[inline]
    pub fn active(&self) -> Option<&Interaction> {
        self.active.as_ref()
    }

    /// Check if an interaction is live
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Start an interaction, handing back the one it replaced
    pub fn begin(&mut self, interaction: Interaction) -> Option<Interaction> {
        self.active.replace(interaction)
    }

    /// End the live interaction (release or cancel)
    pub fn end(&mut self) -> Option<Interaction> {
        self.active.take()
    }
}
