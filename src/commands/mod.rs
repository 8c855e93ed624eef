//! # Commands
//!
//! One module per subcommand. Each handler gates its raw arguments through
//! [`crate::validation`] before anything is read, written or handed to the
//! [`crate::backend::Backend`].

use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::recording::Recording;
use crate::services::Services;
use crate::validation::{ValidationError, check_path, validate_recording_file};

pub mod config;
pub mod generate;
pub mod init;
pub mod play;
pub mod record;
pub mod render;
pub mod share;

/// This trait is the common runner trait
pub trait RunnableCommand {
    /// A runner method is needed for each command
    fn run(&self, services: &Services) -> Result<()>;
}

pub const RECORDING_EXTENSION: &str = "yml";

/// Checks a recording file argument and resolves it against the working
/// directory. A missing extension becomes `.yml`.
pub(crate) fn recording_path(services: &Services, raw: &str) -> Result<PathBuf> {
    check_path(raw)?;

    let raw = if Path::new(raw).extension().is_none() {
        format!("{}.{}", raw, RECORDING_EXTENSION)
    } else {
        raw.to_string()
    };

    let name = Path::new(&raw)
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| ValidationError::InputType(format!("'{}' has no file name", raw)))?;
    validate_recording_file(name)?;

    Ok(services.resolver.resolve_for_write(&raw)?)
}

/// Resolves, reads and checks an existing recording.
pub(crate) fn load_recording(services: &Services, raw: &str) -> Result<(PathBuf, Recording)> {
    let path = recording_path(services, raw)?;
    services
        .logger
        .debug(format!("Loading recording {}", path.display()));
    let recording = Recording::load(&path)?;
    Ok((path, recording))
}
