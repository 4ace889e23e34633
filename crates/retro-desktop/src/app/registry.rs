//! Application registry

use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;
use crate::error::RegistryError;
use super::Application;

/// Registered applications, in registration order
///
/// Shared (via `Rc`) between the window manager and every capability
/// surface, so registration works through `&self`.
#[derive(Default)]
pub struct AppRegistry {
    apps: RefCell<Vec<Rc<dyn Application>>>,
}

impl AppRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an application
    ///
    /// Fails when the descriptor has no id or the id is taken.
    pub fn register<A>(&self, app: A) -> Result<(), RegistryError>
    where
        A: Application + 'static,
    {
        self.register_rc(Rc::new(app))
    }

    /// Register an already shared application
    pub fn register_rc(&self, app: Rc<dyn Application>) -> Result<(), RegistryError> {
        let id = app.descriptor().id.clone();
        if id.is_empty() {
            return Err(RegistryError::MissingId);
        }
        if self.has(&id) {
            return Err(RegistryError::DuplicateApp(id));
        }
        debug!(app_id = %id, "registered application");
        self.apps.borrow_mut().push(app);
        Ok(())
    }

    /// Look up an application by id
    pub fn get(&self, id: &str) -> Option<Rc<dyn Application>> {
        self.apps
            .borrow()
            .iter()
            .find(|app| app.descriptor().id == id)
            .cloned()
    }

    /// Check if an application is registered
    pub fn has(&self, id: &str) -> bool {
        self.apps.borrow().iter().any(|app| app.descriptor().id == id)
    }

    /// All applications
    pub fn list(&self) -> Vec<Rc<dyn Application>> {
        self.apps.borrow().clone()
    }

    /// All application ids
    pub fn list_ids(&self) -> Vec<String> {
        self.apps
            .borrow()
            .iter()
            .map(|app| app.descriptor().id.clone())
            .collect()
    }

    /// Number of registered applications
    pub fn len(&self) -> usize {
        self.apps.borrow().len()
    }

    /// Check if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.apps.borrow().is_empty()
    }
}
