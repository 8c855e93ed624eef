use super::{RunnableCommand, load_recording};
use crate::args;
use crate::backend::PlayPlan;
use crate::errors::Result;
use crate::services::Services;
use clap::Args;

#[derive(Args, PartialEq, Debug)]
pub struct PlayCommand {
    /// Name of the recording file
    #[arg(value_name = "recordingFile")]
    recording_file: String,

    /// Use the actual delays between frames as recorded
    #[arg(short, long)]
    real_timing: bool,

    /// Speed factor, multiply the frames delays by this factor
    #[arg(
        short,
        long,
        value_name = "factor",
        default_value_t = 1.0,
        value_parser = args::parse_speed_factor
    )]
    speed_factor: f64,
}

impl PlayCommand {
    pub fn new(recording_file: impl Into<String>, real_timing: bool, speed_factor: f64) -> Self {
        Self {
            recording_file: recording_file.into(),
            real_timing,
            speed_factor,
        }
    }
}

impl RunnableCommand for PlayCommand {
    fn run(&self, services: &Services) -> Result<()> {
        let (source, recording) = load_recording(services, &self.recording_file)?;
        services.backend().play(&PlayPlan {
            source,
            recording,
            real_timing: self.real_timing,
            speed_factor: self.speed_factor,
        })?;
        Ok(())
    }
}
