//! # Args
//!
//! `Args` is the parsing module used by our main library
//! It defines the command grammar and turns the raw argv into the
//! command to run

use crate::{
    commands::{RunnableCommand, config, generate, init, play, record, render, share},
    errors::{ReelError, Result},
    services::Services,
};
use clap::{ArgAction, Parser, Subcommand, error::ErrorKind};

pub const HELP_WIDTH: usize = 100;

#[derive(Parser, Debug)]
#[command(
    name = "reel",
    about = "Record, play and render terminal sessions",
    override_usage = "reel <command> [options]",
    after_help = "For more information, run a command with --help",
    disable_version_flag = true,
    disable_help_subcommand = true,
    term_width = HELP_WIDTH
)]
pub struct CliParser {
    /// Show version number
    #[arg(short = 'v', long = "version", action = ArgAction::SetTrue)]
    pub version: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, PartialEq, Debug)]
pub enum CliCommand {
    /// Create a global config directory
    Init(init::InitCommand),

    /// Generate a config file in the current directory
    Config(config::ConfigCommand),

    /// Record your terminal and create a recording file
    Record(record::RecordCommand),

    /// Play a recording file on your terminal
    Play(play::PlayCommand),

    /// Render a recording file as an animated gif image
    Render(render::RenderCommand),

    /// Upload a recording file and get a link for an online player
    Share(share::ShareCommand),

    /// Generate a web player for a recording file
    Generate(generate::GenerateCommand),
}

impl CliCommand {
    pub fn name(&self) -> &'static str {
        match self {
            CliCommand::Init(_) => "init",
            CliCommand::Config(_) => "config",
            CliCommand::Record(_) => "record",
            CliCommand::Play(_) => "play",
            CliCommand::Render(_) => "render",
            CliCommand::Share(_) => "share",
            CliCommand::Generate(_) => "generate",
        }
    }

    pub fn run(&self, services: &Services) -> Result<()> {
        match self {
            CliCommand::Init(cmd) => cmd.run(services),
            CliCommand::Config(cmd) => cmd.run(services),
            CliCommand::Record(cmd) => cmd.run(services),
            CliCommand::Play(cmd) => cmd.run(services),
            CliCommand::Render(cmd) => cmd.run(services),
            CliCommand::Share(cmd) => cmd.run(services),
            CliCommand::Generate(cmd) => cmd.run(services),
        }
    }
}

/// What the parsed command line asks for.
#[derive(Debug, PartialEq)]
pub enum Invocation {
    /// Help or version text to print, then exit successfully.
    Info(String),
    Command(CliCommand),
}

pub fn parse_command(args: &[String]) -> Result<Invocation> {
    let cli = match CliParser::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp) => {
            return Ok(Invocation::Info(err.render().to_string()));
        }
        Err(err) => return Err(err.into()),
    };

    if cli.version {
        return Ok(Invocation::Info(format!("{}\n", env!("CARGO_PKG_VERSION"))));
    }

    cli.command
        .map(Invocation::Command)
        .ok_or(ReelError::MissingCommand)
}

pub fn parse_speed_factor(s: &str) -> std::result::Result<f64, String> {
    let factor: f64 = s
        .parse()
        .map_err(|_| format!("Speed factor must be a number, got '{}'", s))?;
    if factor.is_finite() && factor > 0.0 {
        Ok(factor)
    } else {
        Err(format!("Speed factor must be greater than 0, got '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        std::iter::once("reel")
            .chain(raw.iter().copied())
            .map(String::from)
            .collect()
    }

    fn command(raw: &[&str]) -> CliCommand {
        match parse_command(&args(raw)).unwrap() {
            Invocation::Command(cmd) => cmd,
            other => panic!("Expected a command, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_record_command() {
        let expected = CliCommand::Record(record::RecordCommand::new(
            "demo",
            Some(String::from("custom.yml")),
            Some(String::from("htop")),
            true,
        ));
        assert_eq!(
            expected,
            command(&["record", "demo", "-c", "custom.yml", "-d", "htop", "-k"])
        );
    }

    #[test]
    fn test_valid_render_command() {
        let expected = CliCommand::Render(render::RenderCommand::new(
            "demo.yml",
            Some(String::from("demo.gif")),
            Some(50),
            3,
        ));
        assert_eq!(
            expected,
            command(&["render", "demo.yml", "-o", "demo.gif", "-q", "50", "--step", "3"])
        );
    }

    #[test]
    fn test_valid_play_command() {
        let expected = CliCommand::Play(play::PlayCommand::new("demo", true, 1.0));
        assert_eq!(expected, command(&["play", "demo", "--real-timing"]));
        assert_eq!(command(&["play", "demo", "-s", "2.5"]).name(), "play");
    }

    #[test]
    fn test_config_default_file_name() {
        assert_eq!(
            command(&["config"]),
            CliCommand::Config(config::ConfigCommand::new("config.yml"))
        );
    }

    #[test]
    fn test_invalid_render_command() {
        // Quality out of range
        let res = parse_command(&args(&["render", "demo", "-q", "150"]));
        assert!(matches!(res, Err(ReelError::Clap(_))));

        // Step must be at least one
        let res = parse_command(&args(&["render", "demo", "-s", "0"]));
        assert!(matches!(res, Err(ReelError::Clap(_))));

        // Missing recording file
        let res = parse_command(&args(&["render"]));
        assert!(matches!(res, Err(ReelError::Clap(_))));
    }

    #[test]
    fn test_invalid_speed_factor() {
        for factor in ["0", "-1", "fast", "inf"] {
            let res = parse_command(&args(&["play", "demo", "-s", factor]));
            assert!(matches!(res, Err(ReelError::Clap(_))), "{factor}");
        }
    }

    #[test]
    fn test_missing_command() {
        let res = parse_command(&args(&[]));
        assert!(matches!(res, Err(ReelError::MissingCommand)));
        assert_eq!(
            ReelError::MissingCommand.to_string(),
            "The command is missing"
        );
    }

    #[test]
    fn test_unknown_flag_and_command() {
        let res = parse_command(&args(&["--verbose", "init"]));
        assert!(matches!(res, Err(ReelError::Clap(_))));

        let res = parse_command(&args(&["invalid"]));
        assert!(matches!(res, Err(ReelError::Clap(_))));

        let res = parse_command(&args(&["init", "--force"]));
        assert!(matches!(res, Err(ReelError::Clap(_))));
    }

    #[test]
    fn test_version_flag() {
        for flag in ["-v", "--version"] {
            let Invocation::Info(text) = parse_command(&args(&[flag])).unwrap() else {
                panic!("Expected version text");
            };
            assert_eq!(text.trim(), env!("CARGO_PKG_VERSION"));
        }
    }

    #[test]
    fn test_help_lists_every_command() {
        let Invocation::Info(help) = parse_command(&args(&["--help"])).unwrap() else {
            panic!("Expected help text");
        };
        assert!(help.contains("Usage: reel <command> [options]"));
        for name in [
            "init", "config", "record", "play", "render", "share", "generate",
        ] {
            assert!(help.contains(name), "{name} missing from help");
        }
        assert!(!help.contains("Print this message or the help of the given subcommand"));
    }

    #[test]
    fn test_no_help_subcommand() {
        let res = parse_command(&args(&["help"]));
        assert!(matches!(res, Err(ReelError::Clap(_))));

        let Invocation::Info(help) = parse_command(&args(&["render", "-h"])).unwrap() else {
            panic!("Expected help text");
        };
        assert!(help.contains("--quality"));
    }
}
