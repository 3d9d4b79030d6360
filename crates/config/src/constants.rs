//! Centralized constants and defaults for the Talkyo tooling
//!
//! Single source of truth for service endpoints, model identifiers, and
//! the default fixture corpus. Values here feed the serde `default_*`
//! functions in `settings.rs`; prefer overriding via config files or
//! environment variables rather than editing these.

/// Service endpoints
pub mod endpoints {
    /// ElevenLabs API base URL (no trailing slash)
    pub const ELEVENLABS_API_BASE: &str = "https://api.elevenlabs.io";
}

/// Environment variable names
pub mod env {
    /// Required API credential for the fixture generator
    pub const ELEVENLABS_API_KEY: &str = "ELEVENLABS_API_KEY";
}

/// Model and voice identifiers
pub mod models {
    /// Hub id of the speech model whose encoder gets exported
    pub const KOTOBA_WHISPER_V2_2: &str = "kotoba-tech/kotoba-whisper-v2.2";

    /// ElevenLabs synthesis model used for the fixture corpus
    pub const ELEVEN_MULTILINGUAL_V2: &str = "eleven_multilingual_v2";

    /// Rachel (multilingual) - acceptable Japanese pronunciation
    pub const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";
}

/// Export defaults
pub mod export {
    /// Minimum deployment target recorded in the package manifest
    pub const MIN_PLATFORM: &str = "ios15";

    /// Log-mel frame count Whisper expects for a 30s window
    pub const INPUT_FRAMES: usize = 3000;
}

/// Default fixture corpus
pub mod corpus {
    use talkyo_core::TestPhrase;

    /// The five Japanese phrases the transcription tests were written
    /// against. Greetings plus two longer sentences with kanji.
    pub fn default_phrases() -> Vec<TestPhrase> {
        vec![
            TestPhrase::new("こんにちは", "konnichiwa.wav"),
            TestPhrase::new("ありがとうございます", "arigatou.wav"),
            TestPhrase::new("さようなら", "sayounara.wav"),
            TestPhrase::new("今日は良い天気ですね", "weather.wav"),
            TestPhrase::new("図書館で本を読んでいます", "library.wav"),
        ]
    }
}
