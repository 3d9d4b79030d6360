//! Configuration management for the Talkyo speech test tooling
//!
//! Supports loading configuration from:
//! - YAML/TOML files (`config/default`, then `config/{env}`)
//! - Environment variables (TALKYO prefix, `__` separator)
//!
//! The API credential is deliberately NOT part of the layered settings:
//! it is resolved fail-closed from `ELEVENLABS_API_KEY` at the point of
//! use so it never ends up serialized into a config dump.

pub mod constants;
pub mod settings;

pub use settings::{
    load_settings, resolve_api_key, ExportSettings, FixtureSettings, ObservabilityConfig,
    Settings, VoiceSettings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment error: {0}")]
    Environment(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
