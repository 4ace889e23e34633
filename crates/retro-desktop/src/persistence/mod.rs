//! Persistence module for state serialization
//!
//! Provides the snapshot exchanged with the storage layer.

mod snapshot;

pub use snapshot::{DesktopSnapshot, WindowRecord};
