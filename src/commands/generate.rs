use super::{RunnableCommand, load_recording};
use crate::backend::GeneratePlan;
use crate::errors::Result;
use crate::services::Services;
use clap::Args;

#[derive(Args, PartialEq, Eq, Debug)]
pub struct GenerateCommand {
    /// Name of the recording file
    #[arg(value_name = "recordingFile")]
    recording_file: String,
}

impl GenerateCommand {
    pub fn new(recording_file: impl Into<String>) -> Self {
        Self {
            recording_file: recording_file.into(),
        }
    }
}

impl RunnableCommand for GenerateCommand {
    fn run(&self, services: &Services) -> Result<()> {
        let (source, recording) = load_recording(services, &self.recording_file)?;
        // The player goes next to the recording, named after it
        let stem = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let output_dir = source.with_file_name(format!("{}-player", stem));

        services.backend().generate(&GeneratePlan {
            source,
            recording,
            output_dir,
        })?;
        Ok(())
    }
}
