//! Pointer interaction module
//!
//! Provides the drag/resize session state machine and the geometry
//! functions it applies on every pointer move.

mod session;
mod result;

pub use session::{Interaction, InteractionSession};
pub use result::InputResult;

use crate::config::WmConfig;
use crate::math::{clamp, Point, Rect, Size};
use crate::window::ResizeEdge;

/// Geometry after dragging the title bar by `delta`
///
/// Horizontally the whole window stays on the desktop; vertically only
/// the title bar has to, so the body may hang off the bottom edge.
pub fn drag_rect(start: Rect, delta: Point, desktop: Size, config: &WmConfig) -> Rect {
    let x = clamp(start.x + delta.x, 0, (desktop.w - start.w).max(0));
    let y = clamp(start.y + delta.y, 0, (desktop.h - config.title_bar_height).max(0));
    Rect::new(x, y, start.w, start.h)
}

/// Geometry after dragging a resize handle by `delta`
///
/// When a west/north edge hits the minimum size, the position is pulled
/// back so the opposite edge stays where it was.
pub fn resize_rect(
    edge: ResizeEdge,
    start: Rect,
    delta: Point,
    desktop: Size,
    config: &WmConfig,
) -> Rect {
    let mut x = start.x;
    let mut y = start.y;
    let mut w = start.w;
    let mut h = start.h;

    if edge.east() {
        w = start.w + delta.x;
    }
    if edge.south() {
        h = start.h + delta.y;
    }
    if edge.west() {
        w = start.w - delta.x;
        x = start.x + delta.x;
    }
    if edge.north() {
        h = start.h - delta.y;
        y = start.y + delta.y;
    }

    if w < config.min_width {
        if edge.west() {
            x -= config.min_width - w;
        }
        w = config.min_width;
    }
    if h < config.min_height {
        if edge.north() {
            y -= config.min_height - h;
        }
        h = config.min_height;
    }

    let x = clamp(x, 0, (desktop.w - config.min_width).max(0));
    let y = clamp(y, 0, (desktop.h - config.title_bar_height).max(0));
    let w = clamp(w, config.min_width, desktop.w - x);
    let h = clamp(h, config.min_height, desktop.h - y);

    Rect::new(x, y, w, h)
}
