//! Window lifecycle and operations

use tracing::{debug, warn};
use crate::app::WindowContext;
use crate::math::{clamp, Rect};
use crate::viewport::Viewport;
use crate::window::{format_window_id, parse_window_counter, AppState, OpenOptions, Window, WindowId, MAX_COUNTER};
use super::{WindowEntry, WindowManager};

impl WindowManager {
    /// Open a window for an application
    ///
    /// Returns `None` for unknown applications. A single-instance
    /// application that is already open gets its window restored and
    /// focused instead, and that window's id is returned.
    pub fn open_app(&mut self, app_id: &str, options: OpenOptions) -> Option<WindowId> {
        let id = self.open_inner(app_id, options);
        if id.is_some() {
            self.notify();
        }
        self.drain_commands();
        id
    }

    /// Open an application the way the launcher does
    ///
    /// Paid-tier applications prompt for an upgrade instead of opening
    /// while the tier is locked.
    pub fn launch(&mut self, app_id: &str, options: OpenOptions) -> Option<WindowId> {
        let app = self.registry.get(app_id)?;
        let descriptor = app.descriptor();
        if descriptor.pro_only && !self.services.is_pro() {
            debug!(app_id, "launch blocked by paid tier");
            self.services
                .show_upgrade_prompt(&format!("{} is a Pro feature.", descriptor.name));
            return None;
        }
        self.open_app(app_id, options)
    }

    /// Close a window
    pub fn close_window(&mut self, id: &str) {
        if self.close_inner(id) {
            self.notify();
        }
        self.drain_commands();
    }

    /// Minimize a window
    pub fn minimize_window(&mut self, id: &str) {
        if self.minimize_inner(id) {
            self.notify();
        }
        self.drain_commands();
    }

    /// Un-minimize and focus a window
    pub fn restore_window(&mut self, id: &str) {
        if self.restore_inner(id) {
            self.notify();
        }
        self.drain_commands();
    }

    /// Raise a window to the top
    pub fn focus_window(&mut self, id: &str) {
        if self.focus_inner(id) {
            self.notify();
        }
        self.drain_commands();
    }

    /// Maximize a window, or put it back where it was
    pub fn toggle_maximize_window(&mut self, id: &str) {
        if self.toggle_maximize_inner(id) {
            self.notify();
        }
        self.drain_commands();
    }

    /// Shallow-merge `patch` into a window's application payload
    pub fn set_window_app_state(&mut self, id: &str, patch: AppState) {
        match self.entry_mut(id) {
            Some(entry) => entry.window.merge_app_state(patch),
            None => return,
        }
        self.notify();
        self.drain_commands();
    }

    /// Refit maximized windows to the current desktop bounds
    pub fn resize_maximized_windows(&mut self) {
        let full = Rect::filling(self.desktop_bounds());
        for entry in self.windows.iter_mut().filter(|e| e.window.maximized) {
            entry.window.set_rect(full);
            entry.surface.apply_bounds(full, entry.window.z_index);
        }
        self.notify();
        self.drain_commands();
    }

    /// Replace the viewport (browser resize) and refit maximized windows
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.resize_maximized_windows();
    }

    // =========================================================================
    // Non-notifying steps
    // =========================================================================

    pub(crate) fn open_inner(&mut self, app_id: &str, options: OpenOptions) -> Option<WindowId> {
        let app = match self.registry.get(app_id) {
            Some(app) => app,
            None => {
                debug!(app_id, "open ignored: unknown application");
                return None;
            }
        };
        let descriptor = app.descriptor().clone();

        if descriptor.single_instance {
            let existing = self
                .windows
                .iter()
                .find(|e| e.window.app_id == app_id)
                .map(|e| e.window.id.clone());
            if let Some(existing) = existing {
                debug!(app_id, window_id = %existing, "single-instance app already open");
                self.restore_inner(&existing);
                return Some(existing);
            }
        }

        let bounds = self.desktop_bounds();
        let default_size = descriptor.default_size.unwrap_or(self.config.default_size);
        let id = self.claim_id(options.id.clone());

        self.z_counter = self.z_counter.saturating_add(1);
        let z_index = match options.z_index {
            Some(z) if z <= MAX_COUNTER && !self.z_in_use(z) => {
                self.z_counter = self.z_counter.max(z);
                z
            }
            Some(z) => {
                warn!(window_id = %id, z_index = z, "z-order taken or out of range, assigning a fresh one");
                self.z_counter
            }
            None => self.z_counter,
        };

        let cascade = self.windows.len() as i32;
        let w = clamp(options.w.unwrap_or(default_size.w), self.config.min_width, bounds.w);
        let h = clamp(options.h.unwrap_or(default_size.h), self.config.min_height, bounds.h);
        let x = match options.x {
            Some(x) => clamp(x, 0, (bounds.w - w).max(0)),
            None => clamp(
                self.config.cascade_origin.x + cascade * self.config.cascade_step.x,
                0,
                (bounds.w - default_size.w).max(0),
            ),
        };
        let y = match options.y {
            Some(y) => clamp(y, 0, (bounds.h - self.config.title_bar_height).max(0)),
            None => clamp(
                self.config.cascade_origin.y + cascade * self.config.cascade_step.y,
                0,
                (bounds.h - default_size.h).max(0),
            ),
        };

        let mut window = Window {
            id: id.clone(),
            app_id: app_id.to_string(),
            title: descriptor.name.clone(),
            x,
            y,
            w,
            h,
            z_index,
            minimized: options.minimized,
            maximized: options.maximized,
            restore_bounds: options.restore_bounds,
            app_state: options.app_state.unwrap_or_default(),
        };

        if self.is_mobile_layout() && !options.preserve_layout {
            window.set_rect(Rect::filling(bounds));
            window.maximized = true;
            window.restore_bounds = None;
        }

        if window.maximized {
            window.restore_bounds = Some(window.restore_bounds.unwrap_or_else(|| window.rect()));
            window.set_rect(Rect::filling(bounds));
        } else {
            window.restore_bounds = None;
        }

        let status = self.new_status_line();
        let mut surface = self.surfaces.create_surface(&window);
        let ctx = WindowContext::new(id.clone(), window.app_state.clone(), self.os_api(&id, status.clone()));
        if let Some(content) = app.create_content(ctx) {
            surface.mount(content);
        }
        surface.apply_bounds(window.rect(), window.z_index);
        surface.set_status(&status.borrow());
        surface.set_visible(!window.minimized);

        debug!(window_id = %id, app_id, z_index, minimized = window.minimized, maximized = window.maximized, "window opened");
        let focus = !window.minimized && !options.skip_auto_focus;
        self.windows.push(WindowEntry { window, surface, status });

        if focus {
            self.focus_inner(&id);
        }
        self.fire_hook(&id, |app, event| app.on_open(event));
        self.sync_focus_styles();
        Some(id)
    }

    pub(crate) fn close_inner(&mut self, id: &str) -> bool {
        let index = match self.position_of(id) {
            Some(index) => index,
            None => return false,
        };
        self.fire_hook(id, |app, event| app.on_close(event));

        let mut entry = self.windows.remove(index);
        entry.surface.detach();
        self.end_interaction_on(id);
        debug!(window_id = %id, "window closed");
        self.sync_focus_styles();
        true
    }

    pub(crate) fn minimize_inner(&mut self, id: &str) -> bool {
        match self.entry_mut(id) {
            Some(entry) if !entry.window.minimized => {
                entry.window.minimized = true;
                entry.surface.set_visible(false);
            }
            _ => return false,
        }
        self.end_interaction_on(id);
        self.fire_hook(id, |app, event| app.on_minimize(event));
        debug!(window_id = %id, "window minimized");
        self.sync_focus_styles();
        true
    }

    pub(crate) fn restore_inner(&mut self, id: &str) -> bool {
        match self.entry_mut(id) {
            Some(entry) => {
                entry.window.minimized = false;
                entry.surface.set_visible(true);
            }
            None => return false,
        }
        self.focus_inner(id);
        true
    }

    pub(crate) fn focus_inner(&mut self, id: &str) -> bool {
        let next_z = self.z_counter.saturating_add(1);
        match self.entry_mut(id) {
            Some(entry) if !entry.window.minimized => {
                entry.window.z_index = next_z;
                entry.surface.apply_bounds(entry.window.rect(), next_z);
            }
            _ => return false,
        }
        self.z_counter = next_z;
        self.sync_focus_styles();
        self.fire_hook(id, |app, event| app.on_focus(event));
        debug!(window_id = %id, z_index = next_z, "window focused");
        true
    }

    pub(crate) fn toggle_maximize_inner(&mut self, id: &str) -> bool {
        let full = Rect::filling(self.desktop_bounds());
        match self.entry_mut(id) {
            Some(entry) => {
                let window = &mut entry.window;
                if window.maximized {
                    if let Some(bounds) = window.restore_bounds.take() {
                        window.set_rect(bounds);
                    }
                    window.maximized = false;
                } else {
                    window.restore_bounds = Some(window.rect());
                    window.set_rect(full);
                    window.maximized = true;
                }
                debug!(window_id = %id, maximized = window.maximized, "maximize toggled");
                entry.surface.apply_bounds(entry.window.rect(), entry.window.z_index);
            }
            None => return false,
        }
        self.end_interaction_on(id);
        self.focus_inner(id);
        true
    }

    /// Drop a live drag/resize targeting `id` without committing it
    fn end_interaction_on(&mut self, id: &str) {
        if self.session.active().is_some_and(|i| i.window_id() == id) {
            self.session.end();
        }
    }

    /// Id for a new window: the requested one unless it is live
    fn claim_id(&mut self, requested: Option<WindowId>) -> WindowId {
        let id = match requested {
            Some(id) if !id.is_empty() && self.entry(&id).is_none() && counter_in_range(&id) => id,
            Some(id) => {
                if !id.is_empty() {
                    warn!(window_id = %id, "requested window id is in use or out of range, assigning a fresh one");
                }
                self.allocate_id()
            }
            None => self.allocate_id(),
        };
        if let Some(counter) = parse_window_counter(&id) {
            self.next_id = self.next_id.max(counter.saturating_add(1));
        }
        id
    }

    fn allocate_id(&mut self) -> WindowId {
        let id = format_window_id(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    fn z_in_use(&self, z: u64) -> bool {
        self.windows.iter().any(|e| e.window.z_index == z)
    }
}

/// Ids of the `w<N>` form must carry a counter below [`MAX_COUNTER`]
fn counter_in_range(id: &str) -> bool {
    parse_window_counter(id).map_or(true, |counter| counter < MAX_COUNTER)
}
