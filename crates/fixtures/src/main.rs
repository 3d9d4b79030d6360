//! Fixture generation entry point
//!
//! Exit code 0 only if every configured phrase produced an audio file;
//! partial output (whatever files succeeded, plus the full metadata
//! document) is left on disk either way.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use talkyo_config::{load_settings, Settings};
use talkyo_fixtures::FixtureGenerator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = std::env::var("TALKYO_ENV").ok();
    let config = match load_settings(env.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            // Tracing not yet initialized, use eprintln for early logging
            eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
            Settings::default()
        }
    };

    init_tracing(&config);

    tracing::info!(
        phrases = config.fixtures.phrases.len(),
        output_dir = %config.fixtures.output_dir.display(),
        voice_id = %config.fixtures.voice_id,
        "Starting fixture generation v{}",
        env!("CARGO_PKG_VERSION")
    );

    let generator = match FixtureGenerator::from_env(config.fixtures) {
        Ok(generator) => generator,
        Err(e) => {
            tracing::error!(error = %e, "Cannot start fixture generation");
            std::process::exit(1);
        }
    };

    let report = generator.run().await?;

    if !report.all_succeeded() {
        tracing::error!(
            generated = report.generated,
            failed = report.failed,
            total = report.total,
            "Batch finished with failures"
        );
        std::process::exit(1);
    }

    Ok(())
}

/// Fallback filter directives when RUST_LOG is unset, one per crate
/// actually linked into this binary
fn fallback_directives(level: &str) -> String {
    format!("talkyo_fixtures={level},talkyo_config={level}")
}

/// Initialize tracing (console only)
fn init_tracing(config: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| fallback_directives(&config.observability.log_level).into());

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if config.observability.log_json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };
    subscriber.with(fmt_layer).init();
}
