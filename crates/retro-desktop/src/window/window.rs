//! Window record

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::math::{Rect, Size};
use super::WindowId;

/// Per-window payload owned by the hosted application
///
/// The window manager stores and forwards it, never inspects it.
pub type AppState = Map<String, Value>;

/// A window on the desktop
///
/// This is also the persisted record: the serde shape is the snapshot
/// format exchanged with the persistence layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    /// Unique identifier
    pub id: WindowId,
    /// Application hosted by this window
    pub app_id: String,
    /// Title bar text
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub w: i32,
    #[serde(default)]
    pub h: i32,
    /// Stacking order (higher = on top)
    #[serde(default)]
    pub z_index: u64,
    #[serde(default)]
    pub minimized: bool,
    #[serde(default)]
    pub maximized: bool,
    /// Geometry to return to when un-maximizing
    #[serde(default)]
    pub restore_bounds: Option<Rect>,
    /// Application payload
    #[serde(default)]
    pub app_state: AppState,
}

impl Window {
    /// Current geometry
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    /// Current size
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    /// Overwrite the geometry
    #[inline]
    pub fn set_rect(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
        self.w = rect.w;
        self.h = rect.h;
    }

    /// Shallow-merge a patch into the application payload
    pub fn merge_app_state(&mut self, patch: AppState) {
        self.app_state.extend(patch);
    }
}
