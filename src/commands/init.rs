use super::RunnableCommand;
use crate::config::DEFAULT_CONFIG;
use crate::errors::Result;
use crate::services::Services;
use clap::Args;

#[derive(Args, PartialEq, Eq, Debug)]
pub struct InitCommand {}

impl RunnableCommand for InitCommand {
    fn run(&self, services: &Services) -> Result<()> {
        let paths = services.app_paths()?;
        paths.ensure_root()?;

        let config_path = paths.global_config();
        if config_path.exists() {
            services.logger.warn(format!(
                "The global config file already exists at {}",
                config_path.display()
            ));
            return Ok(());
        }

        std::fs::write(&config_path, DEFAULT_CONFIG)?;
        services.logger.success(format!(
            "The global config file is created at {}",
            config_path.display()
        ));
        Ok(())
    }
}
