use super::{RunnableCommand, recording_path};
use crate::backend::RecordPlan;
use crate::config::{Config, validate_config};
use crate::errors::Result;
use crate::services::Services;
use crate::validation::{check_path, sanitize_command_value};
use clap::Args;

#[derive(Args, PartialEq, Eq, Debug)]
pub struct RecordCommand {
    /// Name of the recording file to create
    #[arg(value_name = "recordingFile")]
    recording_file: String,

    /// Overwrite the default configurations
    #[arg(short, long, value_name = "file")]
    config: Option<String>,

    /// The command to be executed
    #[arg(short = 'd', long, value_name = "command")]
    command: Option<String>,

    /// Skip sharing and showing the sharing prompt message
    #[arg(short = 'k', long)]
    skip_sharing: bool,
}

impl RecordCommand {
    pub fn new(
        recording_file: impl Into<String>,
        config: Option<String>,
        command: Option<String>,
        skip_sharing: bool,
    ) -> Self {
        Self {
            recording_file: recording_file.into(),
            config,
            command,
            skip_sharing,
        }
    }

    fn load_config(&self, services: &Services) -> Result<Config> {
        let Some(raw) = &self.config else {
            return Ok(services.default_config()?.as_ref().clone());
        };
        check_path(raw)?;
        let path = services.resolver.resolve(raw)?;
        services
            .logger
            .debug(format!("Loading config {}", path.display()));
        Config::load(&path)
    }
}

impl RunnableCommand for RecordCommand {
    fn run(&self, services: &Services) -> Result<()> {
        let output = recording_path(services, &self.recording_file)?;
        let mut config = self.load_config(services)?;
        if let Some(command) = &self.command {
            config.command = serde_yaml::Value::String(command.clone());
        }

        validate_config(&config)?;
        let command = sanitize_command_value(&config.command)?;

        if output.exists() {
            services.logger.warn(format!(
                "{} already exists and will be overwritten",
                output.display()
            ));
        }

        services.logger.progress(format!(
            "Starting the recording into {}",
            output.display()
        ));
        services.backend().record(&RecordPlan {
            output,
            command,
            config,
            skip_sharing: self.skip_sharing,
        })?;
        Ok(())
    }
}
