//! Command-line arguments
//!
//! Every option except the username can also come from the config file;
//! values given here win. The token additionally falls back to `GITHUB_TOKEN`.

use crate::core::logging::LOG_FORMATS;
use crate::core::styles::palette_to_clap;
use crate::core::validation::parse_positive_int;
use crate::core::version;
use clap::{CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "envscan")]
#[command(about = "Check a GitHub user's public repositories for committed .env files")]
#[command(version, long_version = version::long_version())]
pub struct Args {
    /// GitHub username to scan
    #[arg(value_name = "USERNAME")]
    pub username: String,

    /// GitHub token (raises the API rate limit)
    #[arg(
        short = 't',
        long = "token",
        value_name = "TOKEN",
        env = "GITHUB_TOKEN",
        hide_env_values = true
    )]
    pub token: Option<String>,

    /// GitHub REST API base URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Repositories checked concurrently
    #[arg(short = 'b', long = "batch-size", value_name = "COUNT", value_parser = parse_positive_int)]
    pub batch_size: Option<usize>,

    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = LOG_FORMATS.to_vec())]
    pub log_format: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<String>,

    /// Force coloured output
    #[arg(long = "color", conflicts_with = "no_color")]
    pub color: bool,

    /// Disable coloured output
    #[arg(long = "no-color", conflicts_with = "color")]
    pub no_color: bool,

    /// Print the scan report as JSON
    #[arg(long = "json")]
    pub json: bool,
}

impl Args {
    /// Parse `argv` with help styled to match the rest of the output
    pub fn try_parse_styled<I, T>(argv: I, color: bool) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut command = Self::command().styles(palette_to_clap(color));
        let matches = command.try_get_matches_from_mut(argv)?;
        Self::from_arg_matches(&matches).map_err(|e| e.format(&mut command))
    }

    /// `Some(..)` when colour was forced either way, `None` for auto
    pub fn color_choice(&self) -> Option<bool> {
        if self.no_color {
            Some(false)
        } else if self.color {
            Some(true)
        } else {
            None
        }
    }

    /// Early look at raw arguments, before clap runs, to style its output
    pub fn color_hint(argv: &[String]) -> Option<bool> {
        argv.iter().rev().find_map(|arg| match arg.as_str() {
            "--no-color" => Some(false),
            "--color" => Some(true),
            _ => None,
        })
    }
}
