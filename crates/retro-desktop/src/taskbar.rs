//! Taskbar buttons derived from the open windows

use std::cmp::Ordering;
use serde::{Deserialize, Serialize};
use crate::manager::WindowManager;
use crate::window::{parse_window_counter, Window, WindowId};

/// One taskbar button
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskbarItem {
    pub window_id: WindowId,
    pub label: String,
    /// Window currently has focus
    pub active: bool,
    pub minimized: bool,
}

/// Label shown on a window's button
///
/// Falls back to the capitalised application id for untitled windows.
fn label_for(window: &Window) -> String {
    if !window.title.is_empty() {
        return window.title.clone();
    }
    let mut chars = window.app_id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Order window ids numerically where possible ("w2" before "w10")
fn compare_ids(a: &str, b: &str) -> Ordering {
    match (parse_window_counter(a), parse_window_counter(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

impl WindowManager {
    /// Buttons for every open window, in id order
    pub fn taskbar_items(&self) -> Vec<TaskbarItem> {
        let focused = self.focused_window_id();
        let mut items: Vec<TaskbarItem> = self
            .windows
            .iter()
            .map(|entry| TaskbarItem {
                window_id: entry.window.id.clone(),
                label: label_for(&entry.window),
                active: focused.as_deref() == Some(entry.window.id.as_str()),
                minimized: entry.window.minimized,
            })
            .collect();
        items.sort_by(|a, b| compare_ids(&a.window_id, &b.window_id));
        items
    }

    /// Click on a taskbar button
    ///
    /// Minimized windows are restored, the focused window is minimized,
    /// anything else is focused.
    pub fn activate_taskbar_item(&mut self, id: &str) {
        let minimized = match self.window(id) {
            Some(window) => window.minimized,
            None => return,
        };
        if minimized {
            self.restore_window(id);
        } else if self.focused_window_id().as_deref() == Some(id) {
            self.minimize_window(id);
        } else {
            self.focus_window(id);
        }
    }
}
