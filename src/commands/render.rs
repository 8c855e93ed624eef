use std::path::Path;

use super::{RunnableCommand, load_recording};
use crate::backend::RenderPlan;
use crate::config::{Setting, validate_config};
use crate::errors::Result;
use crate::services::Services;
use crate::validation::{ValidationError, check_path, validate_file_name};
use clap::Args;

#[derive(Args, PartialEq, Eq, Debug)]
pub struct RenderCommand {
    /// Name of the recording file
    #[arg(value_name = "recordingFile")]
    recording_file: String,

    /// Name of the output file, render<timestamp>.gif when omitted
    #[arg(short, long, value_name = "file")]
    output: Option<String>,

    /// Quality of the rendered image (1 - 100)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: Option<u8>,

    /// Reduce the number of rendered frames (step > 1)
    #[arg(
        short,
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    step: u32,
}

impl RenderCommand {
    pub fn new(
        recording_file: impl Into<String>,
        output: Option<String>,
        quality: Option<u8>,
        step: u32,
    ) -> Self {
        Self {
            recording_file: recording_file.into(),
            output,
            quality,
            step,
        }
    }

    fn output_name(&self) -> String {
        self.output.clone().unwrap_or_else(|| {
            format!("render{}.gif", chrono::Utc::now().timestamp_millis())
        })
    }
}

impl RunnableCommand for RenderCommand {
    fn run(&self, services: &Services) -> Result<()> {
        let (source, mut recording) = load_recording(services, &self.recording_file)?;

        let output = self.output_name();
        check_path(&output)?;
        let file_name = Path::new(&output)
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                ValidationError::InputType(format!("'{}' has no file name", output))
            })?;
        validate_file_name(file_name)?;
        let output = services.resolver.resolve_for_write(&output)?;

        if let Some(quality) = self.quality {
            recording.config.quality = Some(Setting::Number(f64::from(quality)));
            validate_config(&recording.config)?;
        }

        services
            .logger
            .progress(format!("Rendering {}", source.display()));
        services.backend().render(&RenderPlan {
            source,
            recording,
            output,
            step: self.step,
        })?;
        Ok(())
    }
}
