//! Sequential batch generation with partial-success semantics

use std::path::PathBuf;

use talkyo_core::{probe_wav, FixtureManifest, WavProbe};
use talkyo_config::{resolve_api_key, FixtureSettings};

use crate::client::ElevenLabsClient;
use crate::FixtureError;

/// File name of the sidecar metadata document
pub const METADATA_FILENAME: &str = "test_metadata.json";

/// Outcome of one batch run
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Phrases whose audio file was written
    pub generated: usize,
    /// Phrases that failed (transport, API, or file write)
    pub failed: usize,
    /// Configured phrase count
    pub total: usize,
    /// Where the metadata document landed
    pub metadata_path: PathBuf,
}

impl BatchReport {
    /// True when every configured phrase produced an audio file
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Generates the fixture corpus for a configured phrase list
pub struct FixtureGenerator {
    client: ElevenLabsClient,
    settings: FixtureSettings,
}

impl FixtureGenerator {
    /// Create a generator with an explicit credential
    pub fn new(settings: FixtureSettings, api_key: String) -> Result<Self, FixtureError> {
        let client = ElevenLabsClient::new(&settings, api_key)?;
        Ok(Self { client, settings })
    }

    /// Create a generator with the credential from `ELEVENLABS_API_KEY`.
    ///
    /// Fails closed before any client exists, so a missing credential
    /// can never result in a network call.
    pub fn from_env(settings: FixtureSettings) -> Result<Self, FixtureError> {
        let api_key = resolve_api_key()?;
        Self::new(settings, api_key)
    }

    /// Run the batch: one synthesis call per phrase, strictly sequential,
    /// zero retries.
    ///
    /// Per-phrase failures are logged and skipped. The metadata document
    /// is written unconditionally after the loop and lists every
    /// configured phrase whether or not its audio file exists; callers
    /// cross-reference file presence to tell which succeeded. Only a
    /// failure to set up the output directory or to write the metadata
    /// document aborts the run.
    pub async fn run(&self) -> Result<BatchReport, FixtureError> {
        let out_dir = &self.settings.output_dir;
        std::fs::create_dir_all(out_dir)?;

        let mut generated = 0usize;
        for phrase in &self.settings.phrases {
            let target = out_dir.join(&phrase.filename);
            match self.generate_one(&phrase.text, &target).await {
                Ok(()) => {
                    tracing::info!(path = %target.display(), "Generated audio");
                    generated += 1;
                }
                Err(e) => {
                    tracing::error!(
                        text = %phrase.text,
                        error = %e,
                        "Failed to generate audio"
                    );
                }
            }
        }

        let manifest = FixtureManifest::for_phrases(
            &self.settings.phrases,
            &self.settings.audio_format,
            self.settings.audio,
            &self.settings.voice_model,
        );
        let metadata_path = out_dir.join(METADATA_FILENAME);
        tokio::fs::write(&metadata_path, manifest.to_json()?).await?;

        let total = self.settings.phrases.len();
        tracing::info!(
            metadata = %metadata_path.display(),
            "Generated {}/{} audio files",
            generated,
            total
        );

        Ok(BatchReport {
            generated,
            failed: total - generated,
            total,
            metadata_path,
        })
    }

    /// Synthesize one phrase and write the response bytes verbatim
    async fn generate_one(&self, text: &str, target: &std::path::Path) -> Result<(), FixtureError> {
        let bytes = self.client.synthesize(text).await?;

        // Diagnostic only; the bytes are written untouched either way
        match probe_wav(&bytes, self.settings.audio) {
            WavProbe::Ok => {}
            WavProbe::Mismatch {
                sample_rate,
                channels,
            } => {
                tracing::warn!(
                    path = %target.display(),
                    sample_rate,
                    channels,
                    "WAV header disagrees with declared audio parameters"
                );
            }
            WavProbe::NotWav => {
                tracing::warn!(
                    path = %target.display(),
                    "Response is not parseable as WAV"
                );
            }
        }

        tokio::fs::write(target, &bytes).await?;
        Ok(())
    }
}
