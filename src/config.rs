//! # Config
//!
//! The recording configuration as read from a YAML file, and the check that
//! reports every problem in it at once.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::errors::Result;
use crate::validation::{ValidationError, has_traversal_segment, sanitize_command_value};

/// Template written by `reel init` and `reel config`.
pub const DEFAULT_CONFIG: &str = include_str!("../config.yml");

/// A numeric setting that may also be the `auto` sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum Setting {
    Auto,
    Number(f64),
    /// Anything else, kept verbatim for the error message.
    Invalid(String),
}

impl Setting {
    fn number(&self) -> Option<f64> {
        match self {
            Setting::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Setting::Auto => write!(f, "auto"),
            Setting::Number(n) => write!(f, "{}", n),
            Setting::Invalid(raw) => write!(f, "{}", raw),
        }
    }
}

impl<'de> Deserialize<'de> for Setting {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_yaml::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_yaml::Value::Number(n) => n
                .as_f64()
                .map(Setting::Number)
                .unwrap_or_else(|| Setting::Invalid(n.to_string())),
            serde_yaml::Value::String(s) if s == "auto" => Setting::Auto,
            // Numeric strings are accepted, like "12" in a hand-written file
            serde_yaml::Value::String(s) => match s.trim().parse::<f64>() {
                Ok(n) => Setting::Number(n),
                Err(_) => Setting::Invalid(s),
            },
            other => Setting::Invalid(format!("{:?}", other)),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub command: serde_yaml::Value,
    pub cwd: Option<String>,
    pub cols: Option<Setting>,
    pub rows: Option<Setting>,
    pub quality: Option<Setting>,
    pub frame_delay: Option<Setting>,
    pub max_idle_time: Option<Setting>,
    /// Keys consumed by the rendering back end only.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Config {
    pub fn from_yaml(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml(&source)
    }

    pub fn defaults() -> Result<Self> {
        Self::from_yaml(DEFAULT_CONFIG)
    }
}

/// Every violation found in one configuration, in field order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_messages(.0))]
pub struct ConfigViolations(pub Vec<ValidationError>);

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ConfigViolations {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }
}

fn auto_or_at_least(
    name: &str,
    setting: Option<&Setting>,
    min: f64,
    expected: &str,
) -> Option<ValidationError> {
    match setting {
        Some(Setting::Auto) => None,
        Some(s) if s.number().is_some_and(|n| n >= min) => None,
        _ => Some(ValidationError::Range(format!(
            "{} must be \"auto\" or {}",
            name, expected
        ))),
    }
}

/// Checks a configuration without stopping at the first problem.
pub fn validate_config(config: &Config) -> std::result::Result<(), ConfigViolations> {
    let mut errors: Vec<ValidationError> = [
        auto_or_at_least("cols", config.cols.as_ref(), 1.0, "a positive number"),
        auto_or_at_least("rows", config.rows.as_ref(), 1.0, "a positive number"),
    ]
    .into_iter()
    .flatten()
    .collect();

    if let Some(quality) = &config.quality {
        if !quality.number().is_some_and(|q| (1.0..=100.0).contains(&q)) {
            errors.push(ValidationError::Range(
                "quality must be a number between 1 and 100".into(),
            ));
        }
    }

    errors.extend(
        [
            auto_or_at_least(
                "frameDelay",
                config.frame_delay.as_ref(),
                0.0,
                "a non-negative number",
            ),
            auto_or_at_least(
                "maxIdleTime",
                config.max_idle_time.as_ref(),
                0.0,
                "a non-negative number",
            ),
        ]
        .into_iter()
        .flatten(),
    );

    if let Err(e) = sanitize_command_value(&config.command) {
        errors.push(e);
    }

    if let Some(cwd) = &config.cwd {
        if has_traversal_segment(cwd) {
            errors.push(ValidationError::Traversal(format!(
                "cwd must not contain a parent directory reference: '{}'",
                cwd
            )));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigViolations(errors))
    }
}
