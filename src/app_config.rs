use anyhow::{Context, Result};
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

use crate::comparison::Era;
use crate::errors::ConfigError;
use crate::file_utils::FileManager;
use crate::structure::ListPolicy;

/// Application configuration module
/// This module handles loading, validating and saving the settings of a
/// comparison run: which seasons to sample, where the API lives and where
/// the report goes.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Stats API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Eras to compare, in report column order
    #[serde(default = "default_eras")]
    pub eras: Vec<Era>,

    /// CSV report location
    #[serde(default = "default_output_path")]
    pub output_path: String,

    /// Treatment of empty and scalar arrays
    #[serde(default)]
    pub list_policy: ListPolicy,

    /// Fetch all eras at once instead of one after another
    #[serde(default)]
    pub concurrent: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Stats API endpoint configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Scheme and host, without a version segment
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Version segment of the schedule endpoint
    #[serde(default = "default_schedule_version")]
    pub schedule_version: String,

    /// Version segment of the live feed endpoint
    #[serde(default = "default_feed_version")]
    pub feed_version: String,

    #[serde(default = "default_sport_id")]
    pub sport_id: u32,

    /// Game type filter, `R` is regular season
    #[serde(default = "default_game_type")]
    pub game_type: String,

    /// Request timeout; the HTTP client default applies when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            schedule_version: default_schedule_version(),
            feed_version: default_feed_version(),
            sport_id: default_sport_id(),
            game_type: default_game_type(),
            timeout_secs: None,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

fn default_base_url() -> String {
    "https://statsapi.mlb.com".to_string()
}

fn default_schedule_version() -> String {
    "v1".to_string()
}

fn default_feed_version() -> String {
    "v1.1".to_string()
}

fn default_sport_id() -> u32 {
    1
}

fn default_game_type() -> String {
    "R".to_string()
}

fn default_output_path() -> String {
    "era_differences.csv".to_string()
}

fn default_eras() -> Vec<Era> {
    vec![
        Era::new("Statcast", 2023),
        Era::new("PitchFX", 2010),
        Era::new("Pre-tracking", 2000),
    ]
}

impl Config {
    /// Check the configuration before any network I/O happens
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.eras.is_empty() {
            return Err(ConfigError::NoEras);
        }

        let mut seen = HashSet::new();
        for era in &self.eras {
            if era.label.trim().is_empty() {
                return Err(ConfigError::EmptyEraLabel(era.year));
            }
            if !seen.insert(era.label.as_str()) {
                return Err(ConfigError::DuplicateEraLabel(era.label.clone()));
            }
        }

        Url::parse(&self.api.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.api.base_url.clone(),
            reason: e.to_string(),
        })?;

        if self.output_path.trim().is_empty() {
            return Err(ConfigError::EmptyOutputPath);
        }

        Ok(())
    }

    /// Load the configuration at `path`, or write and return the default one
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        FileManager::write_to_file(path, &config_json)?;
        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            api: ApiConfig::default(),
            eras: default_eras(),
            output_path: default_output_path(),
            list_policy: ListPolicy::default(),
            concurrent: false,
            log_level: LogLevel::default(),
        }
    }
}

/// Parse a `LABEL=YEAR` era specification
pub fn parse_era_spec(spec: &str) -> Result<Era, ConfigError> {
    let invalid = || ConfigError::InvalidEraSpec(spec.to_string());
    let (label, year) = spec.split_once('=').ok_or_else(invalid)?;
    let label = label.trim();
    if label.is_empty() {
        return Err(invalid());
    }
    let year = year.trim().parse::<i32>().map_err(|_| invalid())?;
    Ok(Era::new(label, year))
}
