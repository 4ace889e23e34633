//! Pointer handling for title-bar drags and edge resizes

use tracing::{debug, trace};
use crate::input::{InputResult, Interaction};
use crate::math::Point;
use crate::window::ResizeEdge;
use super::WindowManager;

impl WindowManager {
    /// Pointer pressed on a window's title bar
    ///
    /// `on_control` is true when the press landed on one of the title-bar
    /// buttons; those handle their own clicks. Maximized windows are only
    /// focused, never dragged.
    pub fn pointer_down_title(&mut self, id: &str, pointer: Point, on_control: bool) -> InputResult {
        if on_control || self.entry(id).is_none() {
            return InputResult::Unhandled;
        }
        self.commit_interaction();
        self.focus_window(id);

        let start = match self.window(id) {
            Some(window) if !window.maximized && !window.minimized => window.rect(),
            Some(_) => return InputResult::Handled,
            None => return InputResult::Unhandled,
        };
        debug!(window_id = %id, "drag started");
        self.session.begin(Interaction::Move {
            window_id: id.to_string(),
            start,
            origin: pointer,
        });
        InputResult::Handled
    }

    /// Pointer pressed on one of a window's resize handles
    pub fn pointer_down_edge(&mut self, id: &str, edge: ResizeEdge, pointer: Point) -> InputResult {
        if self.entry(id).is_none() {
            return InputResult::Unhandled;
        }
        self.commit_interaction();
        self.focus_window(id);

        let start = match self.window(id) {
            Some(window) if !window.maximized && !window.minimized => window.rect(),
            Some(_) => return InputResult::Handled,
            None => return InputResult::Unhandled,
        };
        debug!(window_id = %id, edge = edge.as_str(), "resize started");
        self.session.begin(Interaction::Resize {
            window_id: id.to_string(),
            edge,
            start,
            origin: pointer,
        });
        InputResult::Handled
    }

    /// Pointer pressed anywhere else on a window
    pub fn pointer_down_body(&mut self, id: &str) -> InputResult {
        if self.entry(id).is_none() {
            return InputResult::Unhandled;
        }
        self.focus_window(id);
        InputResult::Handled
    }

    /// Pointer moved; updates the window under a live interaction
    ///
    /// Geometry changes here are not notified; the release commits them.
    pub fn pointer_move(&mut self, pointer: Point) -> InputResult {
        let interaction = match self.session.active() {
            Some(interaction) => interaction.clone(),
            None => return InputResult::Unhandled,
        };
        let bounds = self.desktop_bounds();
        let rect = interaction.geometry_at(pointer, bounds, &self.config);

        match self.entry_mut(interaction.window_id()) {
            Some(entry) if !entry.window.maximized && !entry.window.minimized => {
                entry.window.set_rect(rect);
                entry.surface.apply_bounds(rect, entry.window.z_index);
                trace!(window_id = %entry.window.id, x = rect.x, y = rect.y, w = rect.w, h = rect.h, "pointer move");
                InputResult::Handled
            }
            _ => {
                self.session.end();
                InputResult::Unhandled
            }
        }
    }

    /// Pointer released; commits the interaction
    pub fn pointer_up(&mut self) -> InputResult {
        if self.commit_interaction() {
            self.drain_commands();
            InputResult::Handled
        } else {
            InputResult::Unhandled
        }
    }

    /// Pointer capture lost; ends the interaction like a release
    pub fn pointer_cancel(&mut self) -> InputResult {
        self.pointer_up()
    }

    /// Check if a drag or resize is live
    pub fn is_interacting(&self) -> bool {
        self.session.is_active()
    }

    /// Tear down the live interaction and notify once
    fn commit_interaction(&mut self) -> bool {
        match self.session.end() {
            Some(interaction) => {
                debug!(window_id = %interaction.window_id(), "interaction committed");
                self.notify();
                true
            }
            None => false,
        }
    }
}
