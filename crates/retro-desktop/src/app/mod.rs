//! Application integration module
//!
//! Provides the application registry, the trait hosted applications
//! implement, and the capability surface they receive.

mod descriptor;
mod registry;
mod context;
mod os;

pub use descriptor::AppDescriptor;
pub use registry::AppRegistry;
pub use context::{Application, LifecycleEvent, WindowContent, WindowContext};
pub use os::{CommandQueue, NoopServices, OsApi, SystemServices, WindowCommand};

pub(crate) use os::StatusLine;
