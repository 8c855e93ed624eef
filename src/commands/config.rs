use std::path::Path;

use super::RunnableCommand;
use crate::config::DEFAULT_CONFIG;
use crate::errors::{ReelError, Result};
use crate::services::Services;
use crate::validation::validate_recording_file;
use clap::Args;

#[derive(Args, PartialEq, Eq, Debug)]
pub struct ConfigCommand {
    /// Name of the generated config file
    #[arg(value_name = "fileName", default_value = "config.yml")]
    file_name: String,
}

impl ConfigCommand {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

impl RunnableCommand for ConfigCommand {
    fn run(&self, services: &Services) -> Result<()> {
        validate_recording_file(&self.file_name)?;
        let target = services
            .resolver
            .resolve_within(&self.file_name, Path::new("."))?;

        if target.exists() {
            return Err(ReelError::AlreadyExists(target.display().to_string()));
        }

        std::fs::write(&target, DEFAULT_CONFIG)?;
        services.logger.success(format!(
            "The config file is created at {}",
            target.display()
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::services::tests::services_with;

    #[test]
    fn test_config_writes_template() {
        let dir = tempfile::tempdir().unwrap();
        let (services, capture) = services_with(dir.path(), MockBackend::new());

        ConfigCommand::new("demo.yml").run(&services).unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join("demo.yml")).unwrap(),
            DEFAULT_CONFIG
        );
        assert!(capture.stdout().contains("demo.yml"));
    }

    #[test]
    fn test_config_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.yml"), "mine").unwrap();
        let (services, _) = services_with(dir.path(), MockBackend::new());

        let res = ConfigCommand::new("config.yml").run(&services);
        assert!(matches!(res, Err(ReelError::AlreadyExists(_))));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("config.yml")).unwrap(),
            "mine"
        );
    }

    #[test]
    fn test_config_rejects_paths() {
        let dir = tempfile::tempdir().unwrap();
        let (services, _) = services_with(dir.path(), MockBackend::new());
        for name in ["../config.yml", "sub/config.yml", "nul.yml"] {
            assert!(matches!(
                ConfigCommand::new(name).run(&services),
                Err(ReelError::Validation(_))
            ));
        }
    }
}
