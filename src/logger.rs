//! # Logger
//!
//! Severity-gated output shared by the dispatcher and every command.
//! The threshold is read once when the logger is built and never changes;
//! clones share the same writers.

use std::fmt::Display;
use std::io::{IsTerminal, Write};
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use crossterm::style::{StyledContent, Stylize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ERROR" => Ok(LogLevel::Error),
            "WARN" => Ok(LogLevel::Warn),
            "INFO" => Ok(LogLevel::Info),
            "DEBUG" => Ok(LogLevel::Debug),
            other => Err(format!("Unknown log level '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    pub level: LogLevel,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
        }
    }
}

impl LogConfig {
    pub const ENV_VAR: &'static str = "REEL_LOG_LEVEL";
    pub const FALLBACK_ENV_VAR: &'static str = "LOG_LEVEL";

    /// Reads the threshold from the environment, Info when unset or unknown.
    pub fn from_env() -> Self {
        let raw = std::env::var(Self::ENV_VAR)
            .or_else(|_| std::env::var(Self::FALLBACK_ENV_VAR))
            .ok();
        Self::from_value(raw.as_deref())
    }

    pub fn from_value(raw: Option<&str>) -> Self {
        let level = raw
            .and_then(|value| value.parse().ok())
            .unwrap_or(LogLevel::Info);
        Self { level }
    }
}

type SharedWriter = Arc<Mutex<dyn Write + Send>>;

#[derive(Clone)]
pub struct Logger {
    level: LogLevel,
    out: SharedWriter,
    err: SharedWriter,
    out_color: bool,
    err_color: bool,
}

/// Which of the two writers a message goes to.
#[derive(Clone, Copy)]
enum Stream {
    Out,
    Err,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger").field("level", &self.level).finish()
    }
}

impl Logger {
    /// Logger writing to the process stdout and stderr. Tags are colored
    /// only on the streams attached to a terminal.
    pub fn new(config: LogConfig) -> Self {
        Self::with_writers(
            config,
            Arc::new(Mutex::new(std::io::stdout())),
            Arc::new(Mutex::new(std::io::stderr())),
        )
        .with_color(std::io::stdout().is_terminal(), std::io::stderr().is_terminal())
    }

    /// Logger over arbitrary writers, uncolored until [`with_color`](Self::with_color).
    pub fn with_writers(config: LogConfig, out: SharedWriter, err: SharedWriter) -> Self {
        Self {
            level: config.level,
            out,
            err,
            out_color: false,
            err_color: false,
        }
    }

    pub fn with_color(mut self, out: bool, err: bool) -> Self {
        self.out_color = out;
        self.err_color = err;
        self
    }

    /// Logger over in-memory buffers, for tests of code that logs.
    pub fn captured(config: LogConfig) -> (Self, LogCapture) {
        let capture = LogCapture::default();
        let logger = Self::with_writers(config, capture.out.clone(), capture.err.clone());
        (logger, capture)
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.level
    }

    pub fn error(&self, message: impl Display) {
        self.emit(LogLevel::Error, "ERROR:".red(), Stream::Err, message);
    }

    pub fn warn(&self, message: impl Display) {
        self.emit(LogLevel::Warn, "WARN:".yellow(), Stream::Err, message);
    }

    pub fn info(&self, message: impl Display) {
        self.emit(LogLevel::Info, "INFO:".blue(), Stream::Out, message);
    }

    pub fn debug(&self, message: impl Display) {
        self.emit(LogLevel::Debug, "DEBUG:".dark_grey(), Stream::Out, message);
    }

    pub fn success(&self, message: impl Display) {
        self.emit(LogLevel::Info, "SUCCESS:".green(), Stream::Out, message);
    }

    pub fn progress(&self, message: impl Display) {
        self.emit(LogLevel::Info, "PROGRESS:".magenta(), Stream::Out, message);
    }

    fn emit(
        &self,
        level: LogLevel,
        tag: StyledContent<&str>,
        stream: Stream,
        message: impl Display,
    ) {
        if !self.enabled(level) {
            return;
        }
        let (writer, color) = match stream {
            Stream::Out => (&self.out, self.out_color),
            Stream::Err => (&self.err, self.err_color),
        };
        // Logging never fails the caller
        if let Ok(mut writer) = writer.lock() {
            let _ = if color {
                writeln!(writer, "{} {}", tag, message)
            } else {
                writeln!(writer, "{} {}", tag.content(), message)
            };
            let _ = writer.flush();
        }
    }
}

/// Buffers behind a [`Logger::captured`] logger.
#[derive(Clone, Default)]
pub struct LogCapture {
    out: Arc<Mutex<Vec<u8>>>,
    err: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn stdout(&self) -> String {
        Self::read(&self.out)
    }

    pub fn stderr(&self) -> String {
        Self::read(&self.err)
    }

    fn read(buffer: &Mutex<Vec<u8>>) -> String {
        buffer
            .lock()
            .map(|buf| String::from_utf8_lossy(&buf).into_owned())
            .unwrap_or_default()
    }
}
