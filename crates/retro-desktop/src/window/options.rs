//! Options for opening a window

use crate::math::Rect;
use super::{AppState, Window, WindowId, MAX_COUNTER};

/// Optional overrides for `open_app`
///
/// Everything left `None` is computed by the manager (cascade position,
/// declared default size, next z-order value, fresh id).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OpenOptions {
    /// Reuse this id (restoring a persisted window)
    pub id: Option<WindowId>,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub w: Option<i32>,
    pub h: Option<i32>,
    /// Explicit z-order value
    pub z_index: Option<u64>,
    /// Open hidden
    pub minimized: bool,
    /// Open filling the desktop
    pub maximized: bool,
    /// Geometry to return to when un-maximizing
    pub restore_bounds: Option<Rect>,
    /// Initial application payload
    pub app_state: Option<AppState>,
    /// Do not focus the new window
    pub skip_auto_focus: bool,
    /// Keep the supplied geometry even in the mobile layout
    pub preserve_layout: bool,
}

impl OpenOptions {
    /// Options placing the window at an explicit geometry
    pub fn with_rect(rect: Rect) -> Self {
        Self {
            x: Some(rect.x),
            y: Some(rect.y),
            w: Some(rect.w),
            h: Some(rect.h),
            ..Default::default()
        }
    }
}

impl From<&Window> for OpenOptions {
    /// Options reproducing a persisted window record
    fn from(record: &Window) -> Self {
        Self {
            id: Some(record.id.clone()),
            x: Some(record.x),
            y: Some(record.y),
            // Zero means the field was missing from the record
            w: (record.w > 0).then_some(record.w),
            h: (record.h > 0).then_some(record.h),
            z_index: (record.z_index > 0 && record.z_index <= MAX_COUNTER).then_some(record.z_index),
            minimized: record.minimized,
            maximized: record.maximized,
            restore_bounds: record.restore_bounds,
            app_state: Some(record.app_state.clone()),
            skip_auto_focus: false,
            preserve_layout: false,
        }
    }
}
