//! Configuration management
//!
//! Handles:
//! - Shared command-line flags
//! - The optional settings file (`<config dir>/codepad/config.toml`)
//! - Merge order: CLI flag > environment > settings file > built-in default

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable consulted for the assist API key.
pub const API_KEY_ENV: &str = "CODEPAD_API_KEY";

/// Default remote generation endpoint.
pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";

/// Default quiet period before a preview re-render.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct GlobalArgs {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Session file path (defaults to the user config directory)
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    /// Remote generation endpoint URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// API key for the generation endpoint
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Preview debounce in milliseconds
    #[arg(long, global = true)]
    pub debounce_ms: Option<u64>,
}

/// Settings file contents. Every section and field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub assist: AssistSettings,
    #[serde(default)]
    pub preview: PreviewSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssistSettings {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreviewSettings {
    pub debounce_ms: Option<u64>,
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse settings TOML")
    }

    /// Load the settings file if one exists; absence is not an error.
    fn load_default() -> Result<Self> {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(Self::default());
        };
        let path = config_dir.join("codepad").join("config.toml");
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))
    }
}

/// Combined configuration from all sources.
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub session_file: Option<PathBuf>,
    pub endpoint: String,
    pub api_key: String,
    pub debounce: Duration,
}

impl Config {
    /// Merge command-line flags with the settings file and environment.
    pub fn resolve(args: GlobalArgs) -> Result<Self> {
        let settings = Settings::load_default()?;
        Ok(Self::merge(args, settings))
    }

    /// Merge from explicit parts (useful for testing).
    pub fn merge(args: GlobalArgs, settings: Settings) -> Self {
        let endpoint = args
            .endpoint
            .or(settings.assist.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let api_key = args
            .api_key
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .or(settings.assist.api_key)
            .unwrap_or_default();

        let debounce_ms = args
            .debounce_ms
            .or(settings.preview.debounce_ms)
            .unwrap_or(DEFAULT_DEBOUNCE_MS);

        Self {
            log_level: args.log_level,
            session_file: args.session_file,
            endpoint,
            api_key,
            debounce: Duration::from_millis(debounce_ms),
        }
    }
}
