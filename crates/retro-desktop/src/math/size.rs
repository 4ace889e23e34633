//! Integer size type for window and desktop dimensions

use serde::{Deserialize, Serialize};

/// Width and height in desktop pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    #[serde(alias = "width")]
    pub w: i32,
    #[serde(alias = "height")]
    pub h: i32,
}

impl Size {
    /// Zero size
    pub const ZERO: Size = Size { w: 0, h: 0 };

    /// Create a new size
    #[inline]
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    /// Check if size is zero or negative
    #[inline]
    pub fn is_empty(self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Floor both dimensions at zero
    #[inline]
    pub fn non_negative(self) -> Self {
        Self::new(self.w.max(0), self.h.max(0))
    }
}
