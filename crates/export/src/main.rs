//! Encoder export entry point
//!
//! Downloads the configured checkpoint, validates the encoder with one
//! fixed-shape forward pass, and writes the on-device package. Behaviour
//! is driven entirely by configuration and environment; there are no CLI
//! flags.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use talkyo_config::{load_settings, Settings};
use talkyo_export::run_export;

fn main() -> anyhow::Result<()> {
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
        model_id = %config.export.model_id,
        output_dir = %config.export.output_dir.display(),
        "Starting encoder export v{}",
        env!("CARGO_PKG_VERSION")
    );

    let report = run_export(&config.export)?;

    tracing::info!(
        output_shape = ?report.validation.output_shape,
        tensors = report.summary.tensor_count,
        "Encoder saved to {}",
        report.summary.package_dir.display()
    );

    Ok(())
}

/// Fallback filter directives when RUST_LOG is unset, one per crate
/// actually linked into this binary
fn fallback_directives(level: &str) -> String {
    format!("talkyo_export={level},talkyo_config={level}")
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
