//! Window data model
//!
//! The window record, the options used to open one, and the resize edges.

#[allow(clippy::module_inception)]
mod window;
mod options;
mod region;

pub use window::{AppState, Window};
pub use options::OpenOptions;
pub use region::ResizeEdge;

/// Unique window identifier (`"w1"`, `"w2"`, ...)
pub type WindowId = String;

/// Largest id or z-order counter accepted from outside (the largest
/// integer a JS number holds exactly)
pub const MAX_COUNTER: u64 = (1 << 53) - 1;

/// Format the identifier for a counter value
#[inline]
pub fn format_window_id(counter: u64) -> WindowId {
    format!("w{}", counter)
}

/// Recover the counter value from an identifier produced by [`format_window_id`]
pub fn parse_window_counter(id: &str) -> Option<u64> {
    id.strip_prefix('w')?.parse().ok()
}
