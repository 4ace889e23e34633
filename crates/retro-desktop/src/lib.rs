//! Window manager for the Retro95 desktop
//!
//! This crate provides the window layer of a retro browser desktop:
//! - Window lifecycle (open, close, minimize, restore, focus, maximize)
//! - Title-bar drags and edge resizes clamped to the desktop
//! - Derived focus and monotonic z-order
//! - Single-instance and paid-tier applications
//! - Snapshots for persistence and change notification
//!
//! ## Architecture
//!
//! The crate is organized into focused modules:
//!
//! - [`math`]: Core geometry types (`Point`, `Rect`, `Size`)
//! - [`window`]: Window record, open options and resize edges
//! - [`app`]: Application registry and the capability surface apps receive
//! - [`input`]: Drag/resize session and its geometry
//! - [`persistence`]: Snapshot exchanged with the storage layer
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//! use retro_desktop::{
//!     AppDescriptor, AppRegistry, Application, OpenOptions, Viewport, WindowContent,
//!     WindowContext, WindowManager,
//! };
//!
//! struct Notes(AppDescriptor);
//!
//! impl Application for Notes {
//!     fn descriptor(&self) -> &AppDescriptor {
//!         &self.0
//!     }
//!
//!     fn create_content(&self, _ctx: WindowContext) -> Option<Box<dyn WindowContent>> {
//!         None
//!     }
//! }
//!
//! let registry = Rc::new(AppRegistry::new());
//! registry.register(Notes(AppDescriptor::new("notes", "Notes"))).unwrap();
//!
//! let mut wm = WindowManager::new(registry, Viewport::new(1280, 800));
//! let id = wm.open_app("notes", OpenOptions::default()).unwrap();
//! assert_eq!(wm.focused_window_id(), Some(id));
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: All state management is pure Rust, testable without a browser
//! 2. **Surfaces Behind a Trait**: The DOM is one `SurfaceFactory` among others
//! 3. **Forgiving Operations**: Unknown ids are no-ops, geometry is clamped

pub mod math;
pub mod window;
pub mod app;
pub mod input;
pub mod persistence;

mod config;
mod error;
mod manager;
mod surface;
mod taskbar;
mod viewport;

// WASM exports (only available with "wasm" feature)
#[cfg(feature = "wasm")]
mod wasm;
#[cfg(feature = "wasm")]
pub use wasm::*;

// Re-export core types for convenience
pub use math::{Point, Rect, Size};
pub use window::{AppState, OpenOptions, ResizeEdge, Window, WindowId};
pub use app::{
    AppDescriptor, AppRegistry, Application, CommandQueue, LifecycleEvent, NoopServices, OsApi,
    SystemServices, WindowCommand, WindowContent, WindowContext,
};
pub use input::{InputResult, Interaction, InteractionSession};
pub use persistence::{DesktopSnapshot, WindowRecord};

pub use config::WmConfig;
pub use error::{RegistryError, SnapshotError};
pub use manager::{ChangeListener, WindowManager};
pub use surface::{HeadlessSurfaces, NullSurface, Surface, SurfaceFactory};
pub use taskbar::TaskbarItem;
pub use viewport::{BreakpointPolicy, LayoutPolicy, Viewport};
