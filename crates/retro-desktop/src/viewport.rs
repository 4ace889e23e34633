//! Viewport and responsive layout policy

use serde::{Deserialize, Serialize};
use crate::math::Size;

/// Browser viewport the desktop is laid out in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Viewport {
    /// Viewport width in pixels
    pub width: i32,
    /// Viewport height in pixels
    pub height: i32,
    /// Strip at the bottom reserved for the taskbar
    pub reserved_bottom: i32,
    /// Whether the primary pointer is coarse (touch)
    pub coarse_pointer: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
            reserved_bottom: 0,
            coarse_pointer: false,
        }
    }
}

impl Viewport {
    /// Create a viewport with no reserved chrome and a fine pointer
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            reserved_bottom: 0,
            coarse_pointer: false,
        }
    }

    /// Reserve a strip at the bottom (the taskbar)
    pub fn with_reserved_bottom(mut self, reserved: i32) -> Self {
        self.reserved_bottom = reserved;
        self
    }

    /// Mark the primary pointer as coarse
    pub fn with_coarse_pointer(mut self, coarse: bool) -> Self {
        self.coarse_pointer = coarse;
        self
    }

    /// Area windows may occupy
    pub fn desktop_bounds(&self) -> Size {
        Size::new(self.width, self.height - self.reserved_bottom).non_negative()
    }
}

/// Decides whether a viewport uses the narrow/touch layout
pub trait LayoutPolicy {
    /// True when new windows should open fullscreen
    fn is_mobile(&self, viewport: &Viewport) -> bool;
}

impl<F> LayoutPolicy for F
where
    F: Fn(&Viewport) -> bool,
{
    fn is_mobile(&self, viewport: &Viewport) -> bool {
        self(viewport)
    }
}

/// Width breakpoint or coarse pointer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BreakpointPolicy {
    /// Widths at or below this are mobile
    pub max_width: i32,
}

impl Default for BreakpointPolicy {
    fn default() -> Self {
        Self { max_width: 900 }
    }
}

impl LayoutPolicy for BreakpointPolicy {
    fn is_mobile(&self, viewport: &Viewport) -> bool {
        viewport.width <= self.max_width || viewport.coarse_pointer
    }
}
