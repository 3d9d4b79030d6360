//! Batch generation tests against a mock synthesis endpoint
//!
//! Covers the partial-success model: per-phrase failures never stop the
//! batch, the metadata document always lists the full corpus, and only a
//! fully successful run reports success.

use std::path::Path;

use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use talkyo_config::FixtureSettings;
use talkyo_core::FixtureManifest;
use talkyo_fixtures::{FixtureError, FixtureGenerator};

const VOICE_PATH: &str = "/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM";
const AUDIO_BODY: &[u8] = b"fake-wav-bytes";

fn settings(server: &MockServer, out_dir: &Path) -> FixtureSettings {
    FixtureSettings {
        api_base: server.uri(),
        output_dir: out_dir.to_path_buf(),
        ..Default::default()
    }
}

fn read_manifest(out_dir: &Path) -> FixtureManifest {
    let json = std::fs::read_to_string(out_dir.join("test_metadata.json")).unwrap();
    serde_json::from_str(&json).unwrap()
}

#[tokio::test]
async fn missing_credential_makes_no_network_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    std::env::remove_var("ELEVENLABS_API_KEY");
    let out_dir = tempfile::tempdir().unwrap();
    let result = FixtureGenerator::from_env(settings(&server, out_dir.path()));

    assert!(matches!(result, Err(FixtureError::Config(_))));
    server.verify().await;
}

#[tokio::test]
async fn all_phrases_succeed_produces_full_corpus() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(VOICE_PATH))
        .and(header("xi-api-key", "test-key"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(AUDIO_BODY))
        .expect(5)
        .mount(&server)
        .await;

    let out_dir = tempfile::tempdir().unwrap();
    let generator =
        FixtureGenerator::new(settings(&server, out_dir.path()), "test-key".to_string()).unwrap();
    let report = generator.run().await.unwrap();

    assert!(report.all_succeeded());
    assert_eq!(report.generated, 5);
    assert_eq!(report.total, 5);

    for filename in [
        "konnichiwa.wav",
        "arigatou.wav",
        "sayounara.wav",
        "weather.wav",
        "library.wav",
    ] {
        let bytes = std::fs::read(out_dir.path().join(filename)).unwrap();
        // Response bytes are written verbatim, WAV or not
        assert_eq!(bytes, AUDIO_BODY);
    }
    assert_eq!(read_manifest(out_dir.path()).test_audio_files.len(), 5);
}

#[tokio::test]
async fn one_failure_does_not_stop_the_batch() {
    let server = MockServer::start().await;
    // First mounted wins: こんにちは gets a 500 once, everything else 200
    Mock::given(method("POST"))
        .and(path(VOICE_PATH))
        .and(body_string_contains("こんにちは"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(VOICE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(AUDIO_BODY))
        .expect(4)
        .mount(&server)
        .await;

    let out_dir = tempfile::tempdir().unwrap();
    let generator =
        FixtureGenerator::new(settings(&server, out_dir.path()), "test-key".to_string()).unwrap();
    let report = generator.run().await.unwrap();

    assert!(!report.all_succeeded());
    assert_eq!(report.generated, 4);
    assert_eq!(report.failed, 1);

    assert!(!out_dir.path().join("konnichiwa.wav").exists());
    assert!(out_dir.path().join("arigatou.wav").exists());

    // The failed phrase is still listed; callers cross-reference disk
    let manifest = read_manifest(out_dir.path());
    assert_eq!(manifest.test_audio_files.len(), 5);
    assert!(manifest
        .test_audio_files
        .iter()
        .any(|e| e.filename == "konnichiwa.wav"));
}

#[tokio::test]
async fn metadata_is_written_even_when_every_phrase_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(5)
        .mount(&server)
        .await;

    let out_dir = tempfile::tempdir().unwrap();
    let generator =
        FixtureGenerator::new(settings(&server, out_dir.path()), "test-key".to_string()).unwrap();
    let report = generator.run().await.unwrap();

    assert_eq!(report.generated, 0);
    assert_eq!(report.failed, 5);

    let manifest = read_manifest(out_dir.path());
    assert_eq!(manifest.test_audio_files.len(), 5);
    assert_eq!(manifest.voice_model, "eleven_multilingual_v2");
    assert_eq!(manifest.sample_rate, 22050);
    assert_eq!(manifest.channels, 1);
}

#[tokio::test]
async fn rerun_overwrites_previous_output() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"first run".as_slice()))
        .up_to_n_times(5)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"second run".as_slice()))
        .mount(&server)
        .await;

    let out_dir = tempfile::tempdir().unwrap();
    let generator =
        FixtureGenerator::new(settings(&server, out_dir.path()), "test-key".to_string()).unwrap();

    generator.run().await.unwrap();
    let report = generator.run().await.unwrap();

    assert!(report.all_succeeded());
    let bytes = std::fs::read(out_dir.path().join("konnichiwa.wav")).unwrap();
    assert_eq!(bytes, b"second run");
}

#[tokio::test]
async fn metadata_preserves_japanese_literally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(AUDIO_BODY))
        .mount(&server)
        .await;

    let out_dir = tempfile::tempdir().unwrap();
    let generator =
        FixtureGenerator::new(settings(&server, out_dir.path()), "test-key".to_string()).unwrap();
    generator.run().await.unwrap();

    let json = std::fs::read_to_string(out_dir.path().join("test_metadata.json")).unwrap();
    assert!(json.contains("図書館で本を読んでいます"));
    assert!(!json.contains("\\u"));
}
