//! Window manager configuration
//!
//! Chrome constants shared by placement, drag and resize. Hosts can
//! override any subset from JSON; missing keys keep their defaults.

use serde::{Deserialize, Serialize};
use crate::error::SnapshotError;
use crate::math::{Point, Size};

/// Tunable constants for the window layer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WmConfig {
    /// Smallest width a window can be resized to
    pub min_width: i32,
    /// Smallest height a window can be resized to
    pub min_height: i32,
    /// Height of the title bar; drags keep this strip on the desktop
    pub title_bar_height: i32,
    /// Size used when an application declares none
    pub default_size: Size,
    /// Position of the first cascaded window
    pub cascade_origin: Point,
    /// Offset added per already-open window
    pub cascade_step: Point,
    /// Floor of the z-order counter
    pub z_base: u64,
    /// Status line shown when an application sets none
    pub default_status: String,
}

impl Default for WmConfig {
    fn default() -> Self {
        Self {
            min_width: 260,
            min_height: 180,
            title_bar_height: 20,
            default_size: Size::new(480, 360),
            cascade_origin: Point::new(80, 60),
            cascade_step: Point::new(22, 18),
            z_base: 100,
            default_status: "Ready".to_string(),
        }
    }
}

impl WmConfig {
    /// Parse a (possibly partial) configuration override
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Minimum window size as a `Size`
    #[inline]
    pub fn min_size(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }
}
