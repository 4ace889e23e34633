//! Window manager coordinating windows, surfaces and applications
//!
//! This module is split into focused submodules:
//! - `lifecycle`: open, close, minimize, restore, focus, maximize
//! - `interaction`: title-bar drags and edge resizes
//! - `restore`: rebuilding windows from a persisted snapshot
//! - `commands`: requests queued by application code

mod lifecycle;
mod interaction;
mod restore;
mod commands;

use std::rc::Rc;
use tracing::trace;
use crate::app::{AppRegistry, CommandQueue, LifecycleEvent, NoopServices, OsApi, StatusLine, SystemServices};
use crate::config::WmConfig;
use crate::input::InteractionSession;
use crate::math::Size;
use crate::persistence::DesktopSnapshot;
use crate::surface::{HeadlessSurfaces, Surface, SurfaceFactory};
use crate::viewport::{BreakpointPolicy, LayoutPolicy, Viewport};
use crate::window::{Window, WindowId};

/// Receives a snapshot after every mutating operation
pub type ChangeListener = Box<dyn FnMut(&DesktopSnapshot)>;

/// A window and the things attached to it
pub(crate) struct WindowEntry {
    pub(crate) window: Window,
    pub(crate) surface: Box<dyn Surface>,
    pub(crate) status: StatusLine,
}

/// Owner of every open window
///
/// Single-threaded: all operations run to completion on the UI thread.
/// Unknown window or application ids are silent no-ops and out-of-range
/// geometry is clamped, never rejected. Focus is derived from z-order
/// (highest `z_index` among non-minimized windows), never stored.
pub struct WindowManager {
    /// Chrome constants
    pub(crate) config: WmConfig,
    /// Current viewport
    pub(crate) viewport: Viewport,
    /// Mobile layout predicate
    pub(crate) layout: Box<dyn LayoutPolicy>,
    /// Registered applications
    pub(crate) registry: Rc<AppRegistry>,
    /// Host services exposed to applications
    pub(crate) services: Rc<dyn SystemServices>,
    /// Visual layer
    pub(crate) surfaces: Box<dyn SurfaceFactory>,
    /// Open windows in opening order
    pub(crate) windows: Vec<WindowEntry>,
    /// Counter for the next window id
    pub(crate) next_id: u64,
    /// Last z-order value handed out
    pub(crate) z_counter: u64,
    /// Live drag/resize
    pub(crate) session: InteractionSession,
    /// Requests from application code
    pub(crate) commands: CommandQueue,
    /// Set while queued requests are being applied
    pub(crate) draining: bool,
    /// Change notification sink
    listener: Option<ChangeListener>,
    /// Default status text shared with every capability surface
    default_status: Rc<str>,
}

impl WindowManager {
    /// Create a window manager over a registry
    pub fn new(registry: Rc<AppRegistry>, viewport: Viewport) -> Self {
        Self::with_config(registry, viewport, WmConfig::default())
    }

    /// Create a window manager with explicit configuration
    pub fn with_config(registry: Rc<AppRegistry>, viewport: Viewport, config: WmConfig) -> Self {
        let default_status: Rc<str> = Rc::from(config.default_status.as_str());
        Self {
            z_counter: config.z_base,
            config,
            viewport,
            layout: Box::new(BreakpointPolicy::default()),
            registry,
            services: Rc::new(NoopServices),
            surfaces: Box::new(HeadlessSurfaces),
            windows: Vec::new(),
            next_id: 1,
            session: InteractionSession::new(),
            commands: CommandQueue::new(),
            draining: false,
            listener: None,
            default_status,
        }
    }

    // =========================================================================
    // Collaborators
    // =========================================================================

    /// Replace the mobile layout predicate
    pub fn set_layout_policy<P>(&mut self, policy: P)
    where
        P: LayoutPolicy + 'static,
    {
        self.layout = Box::new(policy);
    }

    /// Replace the host services
    pub fn set_services(&mut self, services: Rc<dyn SystemServices>) {
        self.services = services;
    }

    /// Replace the surface factory (affects windows opened afterwards)
    pub fn set_surface_factory<F>(&mut self, factory: F)
    where
        F: SurfaceFactory + 'static,
    {
        self.surfaces = Box::new(factory);
    }

    /// Subscribe to change notifications (replaces any previous listener)
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut(&DesktopSnapshot) + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    /// Shared application registry
    pub fn registry(&self) -> &Rc<AppRegistry> {
        &self.registry
    }

    /// Active configuration
    pub fn config(&self) -> &WmConfig {
        &self.config
    }

    /// Current viewport
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Area windows may occupy
    pub fn desktop_bounds(&self) -> Size {
        self.viewport.desktop_bounds()
    }

    /// Whether the current viewport uses the narrow/touch layout
    pub fn is_mobile_layout(&self) -> bool {
        self.layout.is_mobile(&self.viewport)
    }

    /// Get a window by id
    pub fn window(&self, id: &str) -> Option<&Window> {
        self.entry(id).map(|e| &e.window)
    }

    /// Copies of every window, in opening order
    pub fn windows(&self) -> Vec<Window> {
        self.windows.iter().map(|e| e.window.clone()).collect()
    }

    /// Number of open windows
    pub fn count(&self) -> usize {
        self.windows.len()
    }

    /// Topmost non-minimized window
    pub fn focused_window_id(&self) -> Option<WindowId> {
        self.windows
            .iter()
            .filter(|e| !e.window.minimized)
            .max_by_key(|e| e.window.z_index)
            .map(|e| e.window.id.clone())
    }

    /// Status line of a window
    pub fn status(&self, id: &str) -> Option<String> {
        self.entry(id).map(|e| e.status.borrow().clone())
    }

    /// Counter value the next fresh id will use
    pub fn next_window_id(&self) -> u64 {
        self.next_id
    }

    /// Full snapshot (what change listeners receive)
    pub fn snapshot(&self) -> DesktopSnapshot {
        DesktopSnapshot {
            windows: self.windows(),
            focused_window_id: self.focused_window_id(),
            next_window_id: self.next_id,
        }
    }

    // =========================================================================
    // Internals shared by the submodules
    // =========================================================================

    pub(crate) fn entry(&self, id: &str) -> Option<&WindowEntry> {
        self.windows.iter().find(|e| e.window.id == id)
    }

    pub(crate) fn entry_mut(&mut self, id: &str) -> Option<&mut WindowEntry> {
        self.windows.iter_mut().find(|e| e.window.id == id)
    }

    pub(crate) fn position_of(&self, id: &str) -> Option<usize> {
        self.windows.iter().position(|e| e.window.id == id)
    }

    /// Capability surface for a window
    pub(crate) fn os_api(&self, window_id: &str, status: StatusLine) -> OsApi {
        OsApi::new(
            window_id.to_string(),
            self.services.clone(),
            self.registry.clone(),
            self.commands.clone(),
            status,
            self.default_status.clone(),
        )
    }

    /// Fresh status line holding the default text
    pub(crate) fn new_status_line(&self) -> StatusLine {
        Rc::new(std::cell::RefCell::new(self.default_status.to_string()))
    }

    /// Run one of the application's lifecycle hooks for a window
    pub(crate) fn fire_hook<F>(&self, id: &str, hook: F)
    where
        F: Fn(&dyn crate::app::Application, &LifecycleEvent<'_>),
    {
        let entry = match self.entry(id) {
            Some(entry) => entry,
            None => return,
        };
        if let Some(app) = self.registry.get(&entry.window.app_id) {
            let event = LifecycleEvent {
                window_id: &entry.window.id,
                state: &entry.window.app_state,
            };
            hook(app.as_ref(), &event);
        }
    }

    /// Push derived focus to every surface
    pub(crate) fn sync_focus_styles(&mut self) {
        let focused = self.focused_window_id();
        for entry in &mut self.windows {
            let is_focused = focused.as_deref() == Some(entry.window.id.as_str()) && !entry.window.minimized;
            entry.surface.set_focused(is_focused);
        }
    }

    /// Emit one change notification
    pub(crate) fn notify(&mut self) {
        if self.listener.is_none() {
            return;
        }
        let snapshot = self.snapshot();
        trace!(windows = snapshot.windows.len(), "change notification");
        if let Some(listener) = self.listener.as_mut() {
            listener(&snapshot);
        }
    }
}
