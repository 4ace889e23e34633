//! Application descriptor

use serde::{Deserialize, Serialize};
use crate::math::Size;

/// Static description of an application
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppDescriptor {
    /// Unique application identifier
    pub id: String,
    /// Display name (also the window title)
    pub name: String,
    /// Icon glyph or URL for the desktop and start menu
    pub icon: String,
    /// Preferred window size (None = manager default)
    pub default_size: Option<Size>,
    /// At most one window at a time
    pub single_instance: bool,
    /// Locked behind the paid tier
    pub pro_only: bool,
}

impl AppDescriptor {
    /// Create a descriptor with an id and display name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the preferred window size
    pub fn with_default_size(mut self, w: i32, h: i32) -> Self {
        self.default_size = Some(Size::new(w, h));
        self
    }

    /// Mark as single-instance
    pub fn single_instance(mut self) -> Self {
        self.single_instance = true;
        self
    }

    /// Mark as paid-tier only
    pub fn pro_only(mut self) -> Self {
        self.pro_only = true;
        self
    }

    /// Set the icon
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }
}
