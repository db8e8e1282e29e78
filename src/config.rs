use crate::defaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub recognition: RecognitionConfig,
    pub summary: SummaryConfig,
}

/// Speech recognition configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecognitionConfig {
    /// Recognition language code (BCP 47 tag).
    pub language: String,
    /// Interim text expiry window in milliseconds.
    pub interim_timeout_ms: u64,
}

/// Summarization configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SummaryConfig {
    /// Summarization model name (see the summary model catalog).
    pub model: String,
    /// Restore the saved transcript on startup.
    pub restore_transcript: bool,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            language: defaults::DEFAULT_LANGUAGE.to_string(),
            interim_timeout_ms: defaults::INTERIM_TIMEOUT_MS,
        }
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_SUMMARY_MODEL.to_string(),
            restore_transcript: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                if e.downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false)
                {
                    Self::default()
                } else {
                    // Re-panic on invalid TOML or other errors
                    panic!("Failed to load config from {}: {}", path.display(), e);
                }
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - DICTANOTE_LANGUAGE → recognition.language
    /// - DICTANOTE_INTERIM_TIMEOUT_MS → recognition.interim_timeout_ms
    /// - DICTANOTE_SUMMARY_MODEL → summary.model
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(language) = std::env::var("DICTANOTE_LANGUAGE")
            && !language.is_empty()
        {
            self.recognition.language = language;
        }

        if let Ok(timeout) = std::env::var("DICTANOTE_INTERIM_TIMEOUT_MS")
            && let Ok(ms) = timeout.parse::<u64>()
        {
            self.recognition.interim_timeout_ms = ms;
        }

        if let Ok(model) = std::env::var("DICTANOTE_SUMMARY_MODEL")
            && !model.is_empty()
        {
            self.summary.model = model;
        }

        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/dictanote/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .expect("Could not determine config directory")
            .join("dictanote")
            .join("config.toml")
    }
}
