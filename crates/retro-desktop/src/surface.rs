//! Visual surface abstraction
//!
//! The window manager drives one surface per window (a DOM element in the
//! browser). Keeping it behind a trait lets the core run headless.

use crate::app::WindowContent;
use crate::math::Rect;
use crate::window::Window;

/// Visual layer for one window
pub trait Surface {
    /// Attach the application's content
    fn mount(&mut self, content: Box<dyn WindowContent>);

    /// Position, size and stack the surface
    fn apply_bounds(&mut self, bounds: Rect, z_index: u64);

    /// Show or hide (minimize)
    fn set_visible(&mut self, visible: bool);

    /// Toggle focused styling
    fn set_focused(&mut self, focused: bool);

    /// Replace the status bar text
    fn set_status(&mut self, text: &str);

    /// Remove from the visual layer
    fn detach(&mut self);
}

/// Creates surfaces for new windows
pub trait SurfaceFactory {
    /// Surface for a window that is about to open
    fn create_surface(&mut self, window: &Window) -> Box<dyn Surface>;
}

/// Surface that renders nothing
#[derive(Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn mount(&mut self, _content: Box<dyn WindowContent>) {}
    fn apply_bounds(&mut self, _bounds: Rect, _z_index: u64) {}
    fn set_visible(&mut self, _visible: bool) {}
    fn set_focused(&mut self, _focused: bool) {}
    fn set_status(&mut self, _text: &str) {}
    fn detach(&mut self) {}
}

/// Factory producing [`NullSurface`]s
#[derive(Debug, Default)]
pub struct HeadlessSurfaces;

impl SurfaceFactory for HeadlessSurfaces {
    fn create_surface(&mut self, _window: &Window) -> Box<dyn Surface> {
        Box::new(NullSurface)
    }
}
