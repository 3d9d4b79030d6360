//! Fixture manifest written next to the generated audio files
//!
//! The key names are a contract with the downstream transcription test
//! suite, which looks the files up by `test_audio_files[].filename` and
//! scores recognizer output against `expected_transcription`. Do not
//! rename fields without updating that suite.

use serde::{Deserialize, Serialize};

use crate::audio::AudioParams;
use crate::phrase::TestPhrase;

/// One entry of `test_audio_files`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub filename: String,
    pub text: String,
    pub expected_transcription: String,
}

impl From<&TestPhrase> for ManifestEntry {
    fn from(phrase: &TestPhrase) -> Self {
        Self {
            filename: phrase.filename.clone(),
            text: phrase.text.clone(),
            expected_transcription: phrase.expected_transcription().to_string(),
        }
    }
}

/// The sidecar metadata document for a generated fixture set
///
/// Lists every configured phrase regardless of per-phrase synthesis
/// outcome; success is visible only through file presence on disk and the
/// generator's exit code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureManifest {
    pub test_audio_files: Vec<ManifestEntry>,
    pub audio_format: String,
    pub sample_rate: u32,
    pub channels: u16,
    pub voice_model: String,
}

impl FixtureManifest {
    /// Build the manifest for a configured phrase list
    pub fn for_phrases(
        phrases: &[TestPhrase],
        audio_format: &str,
        params: AudioParams,
        voice_model: &str,
    ) -> Self {
        Self {
            test_audio_files: phrases.iter().map(ManifestEntry::from).collect(),
            audio_format: audio_format.to_string(),
            sample_rate: params.sample_rate.as_u32(),
            channels: params.channels.count(),
            voice_model: voice_model.to_string(),
        }
    }

    /// Pretty-printed JSON, UTF-8 with non-ASCII preserved literally
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
