use std::path::Path;

use serde::Deserialize;

use crate::config::{Config, validate_config};
use crate::errors::Result;

/// One captured chunk of terminal output.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Frame {
    /// Milliseconds since the previous frame.
    pub delay: f64,
    pub content: String,
}

/// A recording file: the configuration it was made with and its frames.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Recording {
    #[serde(default)]
    pub config: Config,
    #[serde(default)]
    pub records: Vec<Frame>,
}

impl Recording {
    pub fn from_yaml(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Reads and checks a recording; the embedded config must be valid.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let recording = Self::from_yaml(&source)?;
        validate_config(&recording.config)?;
        Ok(recording)
    }

    pub fn duration_ms(&self) -> f64 {
        self.records.iter().map(|frame| frame.delay.max(0.0)).sum()
    }
}
