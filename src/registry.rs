//! # Registry
//!
//! Lazily built, memoized services shared by name. Each name owns one
//! cell: the first successful constructor wins and every later lookup,
//! concurrent or not, gets the same `Arc`.

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use once_cell::sync::OnceCell;
use thiserror::Error;

type Instance = Arc<dyn Any + Send + Sync>;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Service '{name}' is registered with another type than {expected}")]
    TypeMismatch { name: String, expected: &'static str },

    #[error("Service '{name}' could not be built: {reason}")]
    Construction { name: String, reason: String },

    #[error("Service registry lock poisoned")]
    Poisoned,
}

#[derive(Default)]
pub struct ServiceRegistry {
    cells: Mutex<HashMap<String, Arc<OnceCell<Instance>>>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the service registered under `name`, building it with `init`
    /// on first use. A failed `init` leaves the name unset.
    pub fn resolve<T, F, E>(&self, name: &str, init: F) -> Result<Arc<T>, RegistryError>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> Result<T, E>,
        E: std::fmt::Display,
    {
        let cell = self.cell(name)?;
        // The map lock is released here, so building one service never
        // blocks lookups of another.
        let instance = cell.get_or_try_init(|| {
            init()
                .map(|service| Arc::new(service) as Instance)
                .map_err(|e| RegistryError::Construction {
                    name: name.to_string(),
                    reason: e.to_string(),
                })
        })?;

        Arc::clone(instance)
            .downcast::<T>()
            .map_err(|_| RegistryError::TypeMismatch {
                name: name.to_string(),
                expected: type_name::<T>(),
            })
    }

    /// Registers an already built instance. Returns false when the name
    /// was taken, in which case the earlier instance stays.
    pub fn insert<T>(&self, name: &str, service: T) -> Result<bool, RegistryError>
    where
        T: Any + Send + Sync,
    {
        let cell = self.cell(name)?;
        Ok(cell.set(Arc::new(service)).is_ok())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cells
            .lock()
            .map(|cells| cells.get(name).is_some_and(|cell| cell.get().is_some()))
            .unwrap_or(false)
    }

    fn cell(&self, name: &str) -> Result<Arc<OnceCell<Instance>>, RegistryError> {
        let mut cells = self.cells.lock().map_err(|_| RegistryError::Poisoned)?;
        Ok(Arc::clone(cells.entry(name.to_string()).or_default()))
    }
}
