//! # reel
//!
//! `reel` is the core library for the `reel` CLI tool, a utility to
//! record, play and render terminal sessions.
//!
//! This crate is the entry layer of the tool: it parses the command line,
//! builds the shared services and validates every user-supplied file name,
//! path, command and configuration value before any of it reaches the
//! [`backend`] that spawns processes or writes animations.
//!
//! ## Modules
//!
//! - [`args`] Defines the command-line interface using `clap`.
//! - [`commands`] Contains the handlers of all supported subcommands.
//! - [`validation`] File name, path and command checks.
//! - [`config`] The recording configuration and its check.
//! - [`logger`] Severity-gated, colorized output.
//! - [`registry`] and [`services`] The shared services handed to handlers.
//!
//! ## Usage
//!
//! ```no_run
//! let args: Vec<String> = std::env::args().collect();
//! let services = reel::services::Services::from_env().unwrap();
//! if let Err(err) = reel::run(&args, &services) {
//!     let style = reel::ReportStyle { debug: reel::debug_enabled(), color: false };
//!     let _ = reel::report_failure(&err, style, &mut std::io::stderr());
//!     std::process::exit(1);
//! }
//! ```

use std::error::Error;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};

use crossterm::style::Stylize;

pub mod args;
pub mod backend;
pub mod commands;
pub mod config;
pub mod errors;
pub mod logger;
pub mod paths;
pub mod recording;
pub mod registry;
pub mod services;
pub mod validation;

use args::{CliCommand, Invocation};
use errors::{ReelError, Result};
use services::Services;

/// Entrypoint called by the binary.
/// Parses CLI arguments and dispatches the appropriate command.
pub fn run(args: &[String], services: &Services) -> Result<()> {
    services.logger.debug("Parsing command line arguments");
    match args::parse_command(args)? {
        Invocation::Info(text) => {
            print!("{}", text);
            Ok(())
        }
        Invocation::Command(command) => dispatch(&command, services),
    }
}

/// Runs one handler. A panic inside it is turned into an error so the
/// failure handler stays the only exit point.
pub fn dispatch(command: &CliCommand, services: &Services) -> Result<()> {
    services
        .logger
        .debug(format!("Dispatching `{}`", command.name()));
    panic::catch_unwind(AssertUnwindSafe(|| command.run(services)))
        .map_err(|payload| ReelError::HandlerPanic(panic_message(payload.as_ref())))?
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::from("unknown panic payload")
    }
}

/// True when `DEBUG` is set or `REEL_ENV` is `development`.
pub fn debug_enabled() -> bool {
    std::env::var_os("DEBUG").is_some_and(|v| !v.is_empty())
        || std::env::var("REEL_ENV").is_ok_and(|v| v == "development")
}

/// First meaningful line of an error, without clap's `error:` prefix.
pub fn one_line_message(err: &ReelError) -> String {
    let text = err.to_string();
    let line = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("Unknown error");
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}

/// How [`report_failure`] writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportStyle {
    /// Print the error details and its cause chain.
    pub debug: bool,
    /// Color the hint; only for a terminal.
    pub color: bool,
}

/// The top-level failure handler: prints the error, the cause chain when
/// `debug` is set, and a usage hint. The caller exits with status 1.
pub fn report_failure(
    err: &ReelError,
    style: ReportStyle,
    out: &mut impl Write,
) -> std::io::Result<()> {
    writeln!(out, "Error: \n  {}\n", one_line_message(err))?;

    if style.debug {
        writeln!(out, "Details:\n{:#?}", err)?;
        let mut source = err.source();
        while let Some(cause) = source {
            writeln!(out, "Caused by: {}", cause)?;
            source = cause.source();
        }
        writeln!(out)?;
    }

    let flag = if style.color {
        "--help".green().to_string()
    } else {
        String::from("--help")
    };
    writeln!(out, "Hint:\n  Use the {} option to get help about the usage", flag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::commands::init::InitCommand;
    use crate::services::tests::services_with;
    use crate::validation::ValidationError;
    use std::path::Path;

    fn report(err: &ReelError, debug: bool) -> String {
        let mut out = Vec::new();
        let style = ReportStyle {
            debug,
            color: false,
        };
        report_failure(err, style, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_report_failure_format() {
        let text = report(&ReelError::MissingCommand, false);
        assert!(text.starts_with("Error: \n  The command is missing\n"));
        assert!(text.contains("Hint:"));
        assert!(text.contains("--help"));
        assert!(!text.contains("Details:"));
    }

    #[test]
    fn test_report_failure_plain_without_color() {
        let text = report(&ReelError::MissingCommand, false);
        assert!(!text.contains('\u{1b}'));
        assert!(text.ends_with("Hint:\n  Use the --help option to get help about the usage\n"));
    }

    #[test]
    fn test_report_failure_debug_details() {
        let err = ReelError::Validation(ValidationError::Traversal("Path traversal".into()));
        let text = report(&err, true);
        assert!(text.contains("Details:"));
        assert!(text.contains("Traversal"));
    }

    #[test]
    fn test_clap_errors_become_one_line() {
        let args: Vec<String> = ["reel", "--nope"].iter().map(|s| s.to_string()).collect();
        let err = args::parse_command(&args).unwrap_err();
        let message = one_line_message(&err);
        assert!(!message.contains('\n'));
        assert!(!message.starts_with("error:"));
        assert!(message.contains("--nope"));
    }

    struct PanickingBackend;

    impl backend::Backend for PanickingBackend {
        fn record(&self, _: &backend::RecordPlan) -> anyhow::Result<()> {
            panic!("backend exploded")
        }
        fn play(&self, _: &backend::PlayPlan) -> anyhow::Result<()> {
            panic!("backend exploded")
        }
        fn render(&self, _: &backend::RenderPlan) -> anyhow::Result<()> {
            panic!("backend exploded")
        }
        fn share(&self, _: &backend::SharePlan) -> anyhow::Result<()> {
            panic!("backend exploded")
        }
        fn generate(&self, _: &backend::GeneratePlan) -> anyhow::Result<()> {
            panic!("backend exploded")
        }
    }

    #[test]
    fn test_dispatch_turns_panics_into_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("demo.yml"),
            crate::commands::tests::SAMPLE_RECORDING,
        )
        .unwrap();
        let (logger, _) = logger::Logger::captured(logger::LogConfig::default());
        let services = Services::new(
            logger,
            validation::PathResolver::new(dir.path()),
            Box::new(PanickingBackend),
        );

        let command = CliCommand::Share(commands::share::ShareCommand::new("demo"));
        let res = dispatch(&command, &services);
        let Err(ReelError::HandlerPanic(message)) = res else {
            panic!("Expected a handler panic, got {:?}", res);
        };
        assert_eq!(message, "backend exploded");
    }

    #[test]
    fn test_run_missing_command() {
        let (services, _) = services_with(Path::new("/work"), MockBackend::new());
        let res = run(&[String::from("reel")], &services);
        assert!(matches!(res, Err(ReelError::MissingCommand)));
    }

    #[test]
    fn test_dispatch_logs_at_debug() {
        let home = tempfile::tempdir().unwrap();
        let (logger, capture) = logger::Logger::captured(logger::LogConfig {
            level: logger::LogLevel::Debug,
        });
        let services = Services::new(
            logger,
            validation::PathResolver::new(home.path()),
            Box::new(MockBackend::new()),
        );
        services
            .registry
            .insert("app-paths", paths::AppPaths::new(home.path()))
            .unwrap();

        dispatch(&CliCommand::Init(InitCommand {}), &services).unwrap();
        assert!(capture.stdout().contains("Dispatching `init`"));
    }
}
