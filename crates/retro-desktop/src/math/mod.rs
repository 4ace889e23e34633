//! Core geometry types for the window layer
//!
//! All geometry is in whole CSS pixels relative to the desktop's
//! top-left corner.

mod point;
mod rect;
mod size;

pub use point::Point;
pub use rect::Rect;
pub use size::Size;

/// Clamp `value` into `[min, max]`, letting `min` win when the range is
/// inverted (a desktop narrower than the minimum window width).
#[inline]
pub fn clamp(value: i32, min: i32, max: i32) -> i32 {
    value.min(max).max(min)
}
