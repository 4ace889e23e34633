//! Rebuilding windows from a persisted snapshot

use tracing::{debug, warn};
use crate::persistence::{DesktopSnapshot, WindowRecord};
use crate::window::{OpenOptions, MAX_COUNTER};
use super::WindowManager;

impl WindowManager {
    /// Seed the id and z-order counters from persisted state
    ///
    /// Call before [`WindowManager::restore_windows`]. A zero id counter
    /// means "never saved" and starts at 1. Counters beyond [`MAX_COUNTER`]
    /// are ignored; restoring still advances past every accepted id.
    pub fn set_counters_from_state(&mut self, next_window_id: u64, windows: &[WindowRecord]) {
        if next_window_id > MAX_COUNTER {
            warn!(next_window_id, "persisted id counter out of range, starting over");
        }
        self.next_id = if next_window_id > MAX_COUNTER { 1 } else { next_window_id.max(1) };
        let highest = windows
            .iter()
            .map(|w| w.z_index)
            .filter(|&z| z <= MAX_COUNTER)
            .max()
            .unwrap_or(0);
        self.z_counter = self.config.z_base.max(highest);
        debug!(next_id = self.next_id, z_counter = self.z_counter, "counters seeded");
    }

    /// Rebuild windows from persisted records
    ///
    /// Records for unknown applications are skipped. Geometry is kept
    /// unless the mobile layout is active, in which case every restored
    /// window opens fullscreen. Nothing is auto-focused; afterwards
    /// `focused_window_id` is raised if it names a restored, non-minimized
    /// window. Emits a single change notification.
    pub fn restore_windows(&mut self, saved: &[WindowRecord], focused_window_id: Option<&str>) {
        let mobile = self.is_mobile_layout();
        let mut restored = 0;

        for record in saved {
            if !self.registry.has(&record.app_id) {
                warn!(window_id = %record.id, app_id = %record.app_id, "skipping window of unknown application");
                continue;
            }
            let duplicate = self
                .registry
                .get(&record.app_id)
                .is_some_and(|app| app.descriptor().single_instance)
                && self.windows.iter().any(|e| e.window.app_id == record.app_id);
            if duplicate {
                warn!(window_id = %record.id, app_id = %record.app_id, "skipping second window of single-instance application");
                continue;
            }
            let options = OpenOptions {
                skip_auto_focus: true,
                preserve_layout: !mobile,
                ..OpenOptions::from(record)
            };
            if self.open_inner(&record.app_id, options).is_some() {
                restored += 1;
            }
        }

        let highest = self.windows.iter().map(|e| e.window.z_index).max().unwrap_or(0);
        self.z_counter = self.z_counter.max(highest);

        if let Some(id) = focused_window_id {
            if self.window(id).is_some_and(|w| !w.minimized) {
                self.focus_inner(id);
            }
        }
        self.sync_focus_styles();

        debug!(restored, mobile, "windows restored");
        self.notify();
        self.drain_commands();
    }

    /// Seed counters and rebuild windows from a whole snapshot
    pub fn restore_snapshot(&mut self, snapshot: &DesktopSnapshot) {
        self.set_counters_from_state(snapshot.next_window_id, &snapshot.windows);
        self.restore_windows(&snapshot.windows, snapshot.focused_window_id.as_deref());
    }
}
