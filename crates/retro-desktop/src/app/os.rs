//! Capability surface handed to hosted applications

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use serde_json::Value;
use crate::window::{AppState, OpenOptions, WindowId};
use super::AppRegistry;

/// Host services outside the window layer (settings store, paid tier,
/// toasts, achievements)
///
/// Every method defaults to a no-op so hosts implement only what they have.
pub trait SystemServices {
    /// Read a named setting
    fn setting(&self, _key: &str) -> Option<Value> {
        None
    }

    /// Write a named setting
    fn set_setting(&self, _key: &str, _value: Value) {}

    /// Whether the paid tier is unlocked
    fn is_pro(&self) -> bool {
        false
    }

    /// Ask the user to upgrade
    fn show_upgrade_prompt(&self, _message: &str) {}

    /// Show a transient notification
    fn show_toast(&self, _message: &str) {}

    /// Unlock an achievement by id
    fn unlock_achievement(&self, _id: &str) {}
}

/// Services that do nothing
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopServices;

impl SystemServices for NoopServices {}

/// Window manager request issued by application code
#[derive(Clone, Debug, PartialEq)]
pub enum WindowCommand {
    Focus(WindowId),
    Close(WindowId),
    Minimize(WindowId),
    Restore(WindowId),
    ToggleMaximize(WindowId),
    /// Shallow-merge into a window's payload
    SetAppState { window_id: WindowId, patch: AppState },
    /// Push the window's status line to its surface
    RefreshStatus(WindowId),
    /// Open an application through the launcher
    Launch { app_id: String, options: OpenOptions },
}

/// FIFO of requests waiting for the window manager
///
/// Applications run inside window manager operations, so they cannot
/// borrow it; their requests are applied as soon as the running operation
/// returns.
#[derive(Clone, Debug, Default)]
pub struct CommandQueue {
    inner: Rc<RefCell<VecDeque<WindowCommand>>>,
}

impl CommandQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a request
    pub fn push(&self, command: WindowCommand) {
        self.inner.borrow_mut().push_back(command);
    }

    /// Take the oldest request
    pub fn pop(&self) -> Option<WindowCommand> {
        self.inner.borrow_mut().pop_front()
    }

    /// Number of pending requests
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Check if nothing is pending
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Drop every pending request
    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }
}

/// Status line text shared between a window and its application
pub(crate) type StatusLine = Rc<RefCell<String>>;

/// Operating-system capabilities for one window
///
/// Window-lifecycle calls accept any id: applications are trusted and
/// target their own window by convention only.
#[derive(Clone)]
pub struct OsApi {
    window_id: WindowId,
    services: Rc<dyn SystemServices>,
    registry: Rc<AppRegistry>,
    commands: CommandQueue,
    status: StatusLine,
    default_status: Rc<str>,
}

impl OsApi {
    pub(crate) fn new(
        window_id: WindowId,
        services: Rc<dyn SystemServices>,
        registry: Rc<AppRegistry>,
        commands: CommandQueue,
        status: StatusLine,
        default_status: Rc<str>,
    ) -> Self {
        Self {
            window_id,
            services,
            registry,
            commands,
            status,
            default_status,
        }
    }

    /// Window this surface was created for
    pub fn window_id(&self) -> &str {
        &self.window_id
    }

    pub(crate) fn commands(&self) -> &CommandQueue {
        &self.commands
    }

    // =========================================================================
    // Settings and paid tier
    // =========================================================================

    /// Read a named setting
    pub fn setting(&self, key: &str) -> Option<Value> {
        self.services.setting(key)
    }

    /// Write a named setting
    pub fn set_setting(&self, key: &str, value: Value) {
        self.services.set_setting(key, value);
    }

    /// Whether the paid tier is unlocked
    pub fn is_pro(&self) -> bool {
        self.services.is_pro()
    }

    /// Gate a paid feature; prompts for an upgrade when locked
    pub fn require_pro(&self, feature: &str) -> bool {
        if self.services.is_pro() {
            return true;
        }
        self.services.show_upgrade_prompt(&format!("{} is a Pro feature.", feature));
        false
    }

    /// Ask the user to upgrade
    pub fn show_upgrade_prompt(&self, message: &str) {
        self.services.show_upgrade_prompt(message);
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Show a transient notification
    pub fn show_toast(&self, message: &str) {
        self.services.show_toast(message);
    }

    /// Unlock an achievement
    pub fn unlock_achievement(&self, id: &str) {
        self.services.unlock_achievement(id);
    }

    // =========================================================================
    // Applications
    // =========================================================================

    /// Check if an application is registered
    pub fn has_app(&self, app_id: &str) -> bool {
        self.registry.has(app_id)
    }

    /// Ids of all registered applications
    pub fn list_apps(&self) -> Vec<String> {
        self.registry.list_ids()
    }

    /// Open an application through the launcher (deferred)
    pub fn launch_app(&self, app_id: &str, options: OpenOptions) {
        self.commands.push(WindowCommand::Launch {
            app_id: app_id.to_string(),
            options,
        });
    }

    // =========================================================================
    // Status line
    // =========================================================================

    /// Current status line of this window
    pub fn status(&self) -> String {
        self.status.borrow().clone()
    }

    /// Replace the status line; empty text restores the default
    pub fn set_status(&self, message: &str) {
        let text = if message.is_empty() {
            self.default_status.to_string()
        } else {
            message.to_string()
        };
        *self.status.borrow_mut() = text;
        self.commands.push(WindowCommand::RefreshStatus(self.window_id.clone()));
    }

    // =========================================================================
    // Window lifecycle (deferred)
    // =========================================================================

    /// Raise a window
    pub fn focus_window(&self, id: &str) {
        self.commands.push(WindowCommand::Focus(id.to_string()));
    }

    /// Close a window
    pub fn close_window(&self, id: &str) {
        self.commands.push(WindowCommand::Close(id.to_string()));
    }

    /// Minimize a window
    pub fn minimize_window(&self, id: &str) {
        self.commands.push(WindowCommand::Minimize(id.to_string()));
    }

    /// Un-minimize and raise a window
    pub fn restore_window(&self, id: &str) {
        self.commands.push(WindowCommand::Restore(id.to_string()));
    }

    /// Toggle maximize on a window
    pub fn toggle_maximize_window(&self, id: &str) {
        self.commands.push(WindowCommand::ToggleMaximize(id.to_string()));
    }
}
