use super::{RunnableCommand, load_recording};
use crate::backend::SharePlan;
use crate::errors::Result;
use crate::services::Services;
use clap::Args;

#[derive(Args, PartialEq, Eq, Debug)]
pub struct ShareCommand {
    /// Name of the recording file
    #[arg(value_name = "recordingFile")]
    recording_file: String,
}

impl ShareCommand {
    pub fn new(recording_file: impl Into<String>) -> Self {
        Self {
            recording_file: recording_file.into(),
        }
    }
}

impl RunnableCommand for ShareCommand {
    fn run(&self, services: &Services) -> Result<()> {
        let (source, recording) = load_recording(services, &self.recording_file)?;
        services.backend().share(&SharePlan { source, recording })?;
        Ok(())
    }
}
