//! # Validation
//!
//! Every user-supplied string goes through this module before it can reach
//! a file write or a spawned process. All checks are pure functions that
//! return a `Result`; none of them panics or touches the filesystem.
//!
//! - [`filename`] file names and recording file names.
//! - [`path`] the syntactic path check and the canonicalizing resolver.
//! - [`command`] the shell command sanitizer.
//!
//! The configuration check lives in [`crate::config`] and reuses these.

use thiserror::Error;

pub mod command;
pub mod filename;
pub mod path;

pub use command::{sanitize_command, sanitize_command_value};
pub use filename::{MAX_FILE_NAME_LEN, validate_file_name, validate_recording_file};
pub use path::{PathResolver, check_path};

/// Single outcome shape shared by every check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Missing input, or input of the wrong type.
    #[error("{0}")]
    InputType(String),

    /// A `..` segment, or a path that resolves outside its root.
    #[error("{0}")]
    Traversal(String),

    /// A denylisted character, reserved name or dangerous command shape.
    #[error("{0}")]
    ForbiddenCharacter(String),

    /// A value outside its declared bound.
    #[error("{0}")]
    Range(String),
}

/// True when one of the `/`- or `\`-separated segments of `s` is `..`.
pub(crate) fn has_traversal_segment(s: &str) -> bool {
    s.split(['/', '\\']).any(|segment| segment == "..")
}
