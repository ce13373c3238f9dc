//! Configuration loading and layering
//!
//! Settings resolve in order: built-in defaults, TOML file, `GITHUB_TOKEN`,
//! command-line flags. The file is either given with `--config-file` (and
//! must exist) or discovered at `<config_dir>/Envscan/envscan.toml`.

use super::args::Args;
use crate::core::error_handling::ContextualError;
use crate::core::validation::{validate_page_size, validate_positive, ValidationError};
use crate::github::api::GithubClientConfig;
use crate::scanner::api::ScanSettings;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const CONFIG_DIR_NAME: &str = "Envscan";
const CONFIG_FILE_NAME: &str = "envscan.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("The specified configuration file does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Error reading configuration file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error parsing configuration file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        true
    }

    fn user_message(&self) -> Option<String> {
        Some(self.to_string())
    }
}

/// Contents of the TOML configuration file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub batch_size: Option<usize>,
    pub page_size: Option<usize>,
    pub max_pages: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<String>,
    pub color: Option<bool>,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub username: String,
    pub client: GithubClientConfig,
    pub scan: ScanSettings,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<String>,
    pub color: bool,
    pub json: bool,
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load the config file, if there is one
pub async fn load_file_config(explicit: Option<&Path>) -> Result<FileConfig, ConfigError> {
    let path = match explicit {
        Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                log::debug!("No configuration file found");
                return Ok(FileConfig::default());
            }
        },
    };

    log::debug!("Loading configuration from {}", path.display());
    let contents = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
    parse_file_config(&contents).map_err(|source| ConfigError::Parse { path, source })
}

pub fn parse_file_config(contents: &str) -> Result<FileConfig, toml::de::Error> {
    toml::from_str(contents)
}

/// Merge command-line arguments over the file config
///
/// `auto_color` is used when neither layer forces colour.
pub fn resolve(args: &Args, file: FileConfig, auto_color: bool) -> Result<AppConfig, ConfigError> {
    let defaults = ScanSettings::default();

    let batch_size = match args.batch_size.or(file.batch_size) {
        Some(n) => validate_positive("batch_size", n)?,
        None => defaults.batch_size,
    };
    let page_size = match file.page_size {
        Some(n) => validate_page_size(n)?,
        None => defaults.page_size,
    };
    let max_pages = match file.max_pages {
        Some(n) => validate_positive("max_pages", n as usize)? as u32,
        None => defaults.max_pages,
    };

    let mut client = GithubClientConfig::default()
        .with_token(args.token.clone().or(file.token));
    if let Some(api_url) = args.api_url.clone().or(file.api_url) {
        client = client.with_api_url(api_url);
    }
    if let Some(secs) = file.timeout_secs {
        let secs = validate_positive("timeout_secs", secs as usize)? as u64;
        client = client.with_timeout(Duration::from_secs(secs));
    }

    let log_file = args
        .log_file
        .clone()
        .or(file.log_file)
        .filter(|f| !f.eq_ignore_ascii_case("none") && f != "-");

    Ok(AppConfig {
        username: args.username.clone(),
        client,
        scan: ScanSettings {
            batch_size,
            page_size,
            max_pages,
            ..defaults
        },
        log_level: args.log_level.clone().or(file.log_level),
        log_format: args.log_format.clone().or(file.log_format),
        log_file,
        color: args.color_choice().or(file.color).unwrap_or(auto_color),
        json: args.json,
    })
}
