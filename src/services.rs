use std::sync::Arc;

use crate::backend::{Backend, LoggingBackend};
use crate::config::Config;
use crate::errors::Result;
use crate::logger::{LogConfig, Logger};
use crate::paths::AppPaths;
use crate::registry::ServiceRegistry;
use crate::validation::PathResolver;

const APP_PATHS: &str = "app-paths";
const DEFAULT_CONFIG: &str = "default-config";

/// Everything a command handler may use, built once per process and
/// passed down by reference.
pub struct Services {
    pub logger: Logger,
    pub resolver: PathResolver,
    pub registry: ServiceRegistry,
    backend: Box<dyn Backend>,
}

impl Services {
    pub fn new(logger: Logger, resolver: PathResolver, backend: Box<dyn Backend>) -> Self {
        Self {
            logger,
            resolver,
            registry: ServiceRegistry::new(),
            backend,
        }
    }

    /// Services for the `reel` binary: environment log level, current
    /// directory as resolution base, and the logging back end.
    pub fn from_env() -> Result<Self> {
        let logger = Logger::new(LogConfig::from_env());
        let resolver = PathResolver::from_current_dir()?;
        let backend = Box::new(LoggingBackend::new(logger.clone()));
        Ok(Self::new(logger, resolver, backend))
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    pub fn app_paths(&self) -> Result<Arc<AppPaths>> {
        Ok(self.registry.resolve(APP_PATHS, AppPaths::discover)?)
    }

    /// The embedded template, parsed on first use.
    pub fn default_config(&self) -> Result<Arc<Config>> {
        Ok(self.registry.resolve(DEFAULT_CONFIG, Config::defaults)?)
    }
}
