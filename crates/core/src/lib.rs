//! Shared types for the Talkyo speech test tooling
//!
//! This crate provides the types used by both command-line tools:
//! - Test phrase entries (text + target filename + expected transcription)
//! - The fixture manifest written next to generated audio files
//! - Audio parameter types and a WAV sanity probe

pub mod audio;
pub mod manifest;
pub mod phrase;

pub use audio::{probe_wav, AudioParams, Channels, SampleRate, WavProbe};
pub use manifest::{FixtureManifest, ManifestEntry};
pub use phrase::TestPhrase;
