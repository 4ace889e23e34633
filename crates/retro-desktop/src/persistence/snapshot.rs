//! Snapshot of the window layer
//!
//! Emitted on every change notification and consumed by
//! `WindowManager::restore_windows`. Schema versioning belongs to the
//! storage layer wrapping this value.

use serde::{Deserialize, Serialize};
use crate::error::SnapshotError;
use crate::window::{Window, WindowId};

/// A persisted window (same shape as the live record)
pub type WindowRecord = Window;

/// Point-in-time copy of every window plus the counters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DesktopSnapshot {
    /// Windows in opening order
    pub windows: Vec<WindowRecord>,
    /// Topmost non-minimized window
    pub focused_window_id: Option<WindowId>,
    /// Counter for the next assigned window id
    pub next_window_id: u64,
}

impl Default for DesktopSnapshot {
    fn default() -> Self {
        Self {
            windows: Vec::new(),
            focused_window_id: None,
            next_window_id: 1,
        }
    }
}

impl DesktopSnapshot {
    /// Decode a snapshot
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode a snapshot
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Look up a window record by id
    pub fn window(&self, id: &str) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == id)
    }
}
