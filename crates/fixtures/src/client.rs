//! ElevenLabs text-to-speech client
//!
//! One POST per phrase to `/v1/text-to-speech/{voice_id}`; a successful
//! response body is the raw encoded audio, returned to the caller
//! untouched.

use std::time::Duration;

use serde::Serialize;

use talkyo_config::{FixtureSettings, VoiceSettings};

use crate::FixtureError;

/// Synthesis request body
#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: &'a VoiceSettings,
}

/// ElevenLabs TTS client with a fixed voice identity
#[derive(Debug, Clone)]
pub struct ElevenLabsClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model_id: String,
    voice: VoiceSettings,
    accept: String,
}

impl ElevenLabsClient {
    /// Create a client for the configured voice and synthesis model.
    ///
    /// The credential is taken as an argument rather than read here so
    /// construction stays fail-closed at the caller: no credential, no
    /// client, no request.
    pub fn new(settings: &FixtureSettings, api_key: String) -> Result<Self, FixtureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            api_key,
            endpoint: format!(
                "{}/v1/text-to-speech/{}",
                settings.api_base.trim_end_matches('/'),
                settings.voice_id
            ),
            model_id: settings.voice_model.clone(),
            voice: settings.voice,
            accept: format!("audio/{}", settings.audio_format),
        })
    }

    /// Synthesize one phrase, returning the raw response bytes.
    ///
    /// Non-2xx responses become `FixtureError::Api` carrying the status
    /// and a body excerpt for the log.
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, FixtureError> {
        let request = TtsRequest {
            text,
            model_id: &self.model_id,
            voice_settings: &self.voice,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Accept", &self.accept)
            .header("xi-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(200).collect();
            return Err(FixtureError::Api {
                status,
                body: excerpt,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_includes_voice_id() {
        let settings = FixtureSettings::default();
        let client = ElevenLabsClient::new(&settings, "key".to_string()).unwrap();
        assert_eq!(
            client.endpoint,
            "https://api.elevenlabs.io/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM"
        );
        assert_eq!(client.accept, "audio/wav");
    }

    #[test]
    fn test_request_body_shape() {
        let voice = VoiceSettings::default();
        let request = TtsRequest {
            text: "こんにちは",
            model_id: "eleven_multilingual_v2",
            voice_settings: &voice,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["text"], "こんにちは");
        assert_eq!(json["model_id"], "eleven_multilingual_v2");
        assert_eq!(json["voice_settings"]["similarity_boost"], 0.75);
    }
}
