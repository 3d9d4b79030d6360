//! Fixture generation for the Talkyo transcription tests
//!
//! Synthesizes one audio file per configured phrase through the
//! ElevenLabs API, strictly sequentially and with zero retries, then
//! writes the `test_metadata.json` document the downstream test suite
//! consumes. Per-phrase failures are logged and skipped; the metadata
//! document always lists the full configured corpus.

pub mod client;
pub mod generator;

pub use client::ElevenLabsClient;
pub use generator::{BatchReport, FixtureGenerator};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Configuration error: {0}")]
    Config(#[from] talkyo_config::ConfigError),

    #[error("Synthesis request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Synthesis API returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
