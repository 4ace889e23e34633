//! Hosted application contract

use std::any::Any;
use crate::window::{AppState, WindowId};
use super::{AppDescriptor, OsApi, WindowCommand};

/// Content produced by an application for one window
///
/// The surface layer downcasts it to whatever concrete type it renders.
pub trait WindowContent {
    /// Access the concrete content type
    fn as_any(&self) -> &dyn Any;
}

/// Passed to lifecycle hooks
#[derive(Clone, Copy, Debug)]
pub struct LifecycleEvent<'a> {
    pub window_id: &'a str,
    pub state: &'a AppState,
}

/// An application the desktop can open windows for
///
/// Hooks default to no-ops. Applications are shared and called through
/// `&self`; keep mutable state behind `Cell`/`RefCell`.
pub trait Application {
    /// Static description
    fn descriptor(&self) -> &AppDescriptor;

    /// Build the content of a new window
    fn create_content(&self, ctx: WindowContext) -> Option<Box<dyn WindowContent>>;

    /// The window finished opening
    fn on_open(&self, _event: &LifecycleEvent<'_>) {}

    /// The window is about to be removed
    fn on_close(&self, _event: &LifecycleEvent<'_>) {}

    /// The window was raised to the top
    fn on_focus(&self, _event: &LifecycleEvent<'_>) {}

    /// The window was hidden
    fn on_minimize(&self, _event: &LifecycleEvent<'_>) {}
}

/// Everything a content factory receives
pub struct WindowContext {
    /// Window being created
    pub window_id: WindowId,
    /// Application payload at creation time
    pub state: AppState,
    /// Capability surface
    pub os: OsApi,
}

impl WindowContext {
    pub(crate) fn new(window_id: WindowId, state: AppState, os: OsApi) -> Self {
        Self { window_id, state, os }
    }

    /// Merge `patch` into this window's persisted payload
    ///
    /// Applied once the operation currently running in the window manager
    /// returns.
    pub fn set_state(&self, patch: AppState) {
        self.os.commands().push(WindowCommand::SetAppState {
            window_id: self.window_id.clone(),
            patch,
        });
    }
}
