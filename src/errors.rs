use thiserror::Error;

use crate::config::ConfigViolations;
use crate::registry::RegistryError;
use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum ReelError {
    #[error("{0}")]
    Clap(#[from] clap::error::Error),

    #[error("The command is missing")]
    MissingCommand,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigViolations),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("Command handler panicked: {0}")]
    HandlerPanic(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ReelError>;
