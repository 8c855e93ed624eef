//! # Backend
//!
//! The seam between the validated front end and the code that actually
//! drives a pseudo-terminal, encodes animations or talks to the network.
//! Handlers only ever hand it plans whose every field already passed the
//! validators.

use std::path::PathBuf;

use crate::config::Config;
use crate::logger::Logger;
use crate::recording::Recording;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordPlan {
    pub output: PathBuf,
    /// Sanitized command; `None` records the default shell.
    pub command: Option<String>,
    pub config: Config,
    pub skip_sharing: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayPlan {
    pub source: PathBuf,
    pub recording: Recording,
    pub real_timing: bool,
    pub speed_factor: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub source: PathBuf,
    pub recording: Recording,
    pub output: PathBuf,
    /// Keep one frame out of every `step`.
    pub step: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SharePlan {
    pub source: PathBuf,
    pub recording: Recording,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratePlan {
    pub source: PathBuf,
    pub recording: Recording,
    pub output_dir: PathBuf,
}

#[cfg_attr(test, mockall::automock)]
pub trait Backend: Send + Sync {
    fn record(&self, plan: &RecordPlan) -> anyhow::Result<()>;
    fn play(&self, plan: &PlayPlan) -> anyhow::Result<()>;
    fn render(&self, plan: &RenderPlan) -> anyhow::Result<()>;
    fn share(&self, plan: &SharePlan) -> anyhow::Result<()>;
    fn generate(&self, plan: &GeneratePlan) -> anyhow::Result<()>;
}

/// Reports each plan instead of executing it. Used when no terminal
/// back end is linked in.
pub struct LoggingBackend {
    logger: Logger,
}

impl LoggingBackend {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    fn not_attached(&self, action: &str) {
        self.logger
            .warn(format!("No {} backend is attached, nothing was executed", action));
    }
}

impl Backend for LoggingBackend {
    fn record(&self, plan: &RecordPlan) -> anyhow::Result<()> {
        self.logger.info(format!(
            "Recording `{}` into {}",
            plan.command.as_deref().unwrap_or("<default shell>"),
            plan.output.display()
        ));
        self.not_attached("recording");
        Ok(())
    }

    fn play(&self, plan: &PlayPlan) -> anyhow::Result<()> {
        self.logger.info(format!(
            "Playing {} ({} frames, {:.0} ms, x{})",
            plan.source.display(),
            plan.recording.records.len(),
            plan.recording.duration_ms(),
            plan.speed_factor
        ));
        self.not_attached("playback");
        Ok(())
    }

    fn render(&self, plan: &RenderPlan) -> anyhow::Result<()> {
        self.logger.info(format!(
            "Rendering {} into {} (step {})",
            plan.source.display(),
            plan.output.display(),
            plan.step
        ));
        self.not_attached("rendering");
        Ok(())
    }

    fn share(&self, plan: &SharePlan) -> anyhow::Result<()> {
        self.logger.info(format!("Sharing {}", plan.source.display()));
        self.not_attached("sharing");
        Ok(())
    }

    fn generate(&self, plan: &GeneratePlan) -> anyhow::Result<()> {
        self.logger.info(format!(
            "Generating a web player for {} in {}",
            plan.source.display(),
            plan.output_dir.display()
        ));
        self.not_attached("player generation");
        Ok(())
    }
}
