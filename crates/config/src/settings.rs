//! Main settings module

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use talkyo_core::{AudioParams, TestPhrase};

use crate::constants::{corpus, endpoints, env, export, models};
use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Encoder export configuration
    #[serde(default)]
    pub export: ExportSettings,

    /// Fixture generation configuration
    #[serde(default)]
    pub fixtures: FixtureSettings,
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level filter fallback when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON-formatted logs
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

/// Encoder export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    /// HuggingFace hub id of the source model
    #[serde(default = "default_export_model_id")]
    pub model_id: String,

    /// Local directory holding config.json + model.safetensors; when set,
    /// the hub is never contacted
    #[serde(default)]
    pub weights_dir: Option<PathBuf>,

    /// Directory the encoder package is written to (replaced on re-run)
    #[serde(default = "default_export_output_dir")]
    pub output_dir: PathBuf,

    /// Minimum deployment target recorded in the package manifest
    #[serde(default = "default_min_platform")]
    pub min_platform: String,

    /// Frame count of the synthetic validation input (batch=1, mel bins
    /// come from the model config)
    #[serde(default = "default_input_frames")]
    pub input_frames: usize,
}

fn default_export_model_id() -> String {
    models::KOTOBA_WHISPER_V2_2.to_string()
}

fn default_export_output_dir() -> PathBuf {
    PathBuf::from("models/export/kotoba-whisper-encoder")
}

fn default_min_platform() -> String {
    export::MIN_PLATFORM.to_string()
}

fn default_input_frames() -> usize {
    export::INPUT_FRAMES
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            model_id: default_export_model_id(),
            weights_dir: None,
            output_dir: default_export_output_dir(),
            min_platform: default_min_platform(),
            input_frames: default_input_frames(),
        }
    }
}

/// Voice quality parameters sent with every synthesis request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    #[serde(default = "default_stability")]
    pub stability: f32,
    #[serde(default = "default_similarity_boost")]
    pub similarity_boost: f32,
    #[serde(default)]
    pub style: f32,
    #[serde(default = "default_speaker_boost")]
    pub use_speaker_boost: bool,
}

fn default_stability() -> f32 {
    0.5
}

fn default_similarity_boost() -> f32 {
    0.75
}

fn default_speaker_boost() -> bool {
    true
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: default_stability(),
            similarity_boost: default_similarity_boost(),
            style: 0.0,
            use_speaker_boost: default_speaker_boost(),
        }
    }
}

/// Fixture generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSettings {
    /// ElevenLabs API base URL (overridable for tests)
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Voice identity placed in the request URL path
    #[serde(default = "default_voice_id")]
    pub voice_id: String,

    /// Synthesis model id sent in the request body
    #[serde(default = "default_voice_model")]
    pub voice_model: String,

    /// Voice quality parameters
    #[serde(default)]
    pub voice: VoiceSettings,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Output directory for audio files and the metadata document
    #[serde(default = "default_fixture_output_dir")]
    pub output_dir: PathBuf,

    /// Container format requested from the API and declared in metadata
    #[serde(default = "default_audio_format")]
    pub audio_format: String,

    /// Declared audio parameters of the corpus
    #[serde(default)]
    pub audio: AudioParams,

    /// Phrase corpus; defaults to the five phrases the transcription
    /// tests were written against
    #[serde(default = "corpus::default_phrases")]
    pub phrases: Vec<TestPhrase>,
}

fn default_api_base() -> String {
    endpoints::ELEVENLABS_API_BASE.to_string()
}

fn default_voice_id() -> String {
    models::DEFAULT_VOICE_ID.to_string()
}

fn default_voice_model() -> String {
    models::ELEVEN_MULTILINGUAL_V2.to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_fixture_output_dir() -> PathBuf {
    PathBuf::from("TalkyoTests/TestAudio")
}

fn default_audio_format() -> String {
    "wav".to_string()
}

impl Default for FixtureSettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            voice_id: default_voice_id(),
            voice_model: default_voice_model(),
            voice: VoiceSettings::default(),
            timeout_ms: default_timeout_ms(),
            output_dir: default_fixture_output_dir(),
            audio_format: default_audio_format(),
            audio: AudioParams::default(),
            phrases: corpus::default_phrases(),
        }
    }
}

impl Settings {
    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fixtures.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "fixtures.timeout_ms".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        for (name, value) in [
            ("fixtures.voice.stability", self.fixtures.voice.stability),
            (
                "fixtures.voice.similarity_boost",
                self.fixtures.voice.similarity_boost,
            ),
            ("fixtures.voice.style", self.fixtures.voice.style),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    field: name.to_string(),
                    message: format!("{value} is outside [0.0, 1.0]"),
                });
            }
        }

        let mut seen = std::collections::HashSet::new();
        for phrase in &self.fixtures.phrases {
            if phrase.text.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "fixtures.phrases".to_string(),
                    message: format!("phrase for {} has empty text", phrase.filename),
                });
            }
            if phrase.filename.is_empty() || phrase.filename.contains(std::path::MAIN_SEPARATOR) {
                return Err(ConfigError::InvalidValue {
                    field: "fixtures.phrases".to_string(),
                    message: format!("invalid filename {:?}", phrase.filename),
                });
            }
            if !seen.insert(phrase.filename.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "fixtures.phrases".to_string(),
                    message: format!("duplicate filename {}", phrase.filename),
                });
            }
        }

        if self.export.input_frames == 0 {
            return Err(ConfigError::InvalidValue {
                field: "export.input_frames".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

/// Load settings from config files and environment variables
///
/// Priority: env vars > config/{env} > config/default > serde defaults.
pub fn load_settings(env_name: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    // Load default config
    builder = builder.add_source(File::with_name("config/default").required(false));

    // Load environment-specific config
    if let Some(env_name) = env_name {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    // Load from environment variables
    builder = builder.add_source(
        Environment::with_prefix("TALKYO")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

/// Resolve the ElevenLabs API credential from the process environment.
///
/// Fails closed: callers must not construct an HTTP client without it.
pub fn resolve_api_key() -> Result<String, ConfigError> {
    match std::env::var(env::ELEVENLABS_API_KEY) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        Ok(_) => Err(ConfigError::Environment(format!(
            "{} is set but empty",
            env::ELEVENLABS_API_KEY
        ))),
        Err(_) => Err(ConfigError::Environment(format!(
            "{} environment variable not set",
            env::ELEVENLABS_API_KEY
        ))),
    }
}
