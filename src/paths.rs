use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{ReelError, Result};

pub const HOME_ENV_VAR: &str = "REEL_HOME";
pub const GLOBAL_CONFIG_FILE: &str = "config.yml";

/// Locations owned by reel outside of the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    root: PathBuf,
}

impl AppPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `$REEL_HOME` when set, else `~/.reel`.
    pub fn discover() -> Result<Self> {
        if let Some(root) = std::env::var_os(HOME_ENV_VAR).filter(|v| !v.is_empty()) {
            return Ok(Self::new(root));
        }
        let home = dirs::home_dir().ok_or_else(|| {
            ReelError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Unable to locate the home directory",
            ))
        })?;
        Ok(Self::new(home.join(".reel")))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn global_config(&self) -> PathBuf {
        self.root.join(GLOBAL_CONFIG_FILE)
    }

    pub fn ensure_root(&self) -> Result<&Path> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_discover_honors_override() {
        let dir = tempfile::tempdir().unwrap();
        unsafe { std::env::set_var(HOME_ENV_VAR, dir.path()) };
        let paths = AppPaths::discover().unwrap();
        unsafe { std::env::remove_var(HOME_ENV_VAR) };

        assert_eq!(paths.root(), dir.path());
        assert_eq!(paths.global_config(), dir.path().join("config.yml"));
    }

    #[test]
    fn test_ensure_root_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AppPaths::new(dir.path().join("nested").join(".reel"));
        assert!(!paths.root().exists());
        paths.ensure_root().unwrap();
        assert!(paths.root().is_dir());
    }
}
