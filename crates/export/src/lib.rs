//! Encoder export pipeline
//!
//! Turns the Kotoba Whisper v2.2 checkpoint into an on-device encoder
//! package: the `model.encoder.*` weight subset re-serialized as
//! SafeTensors next to a JSON manifest naming the input
//! (`input_features`) and output (`encoder_output`) tensors.
//!
//! Known limitations, carried over deliberately:
//! - The validation pass runs on one fixed-shape synthetic input; the
//!   package is only known-good for that shape.
//! - Decoder, generation loop, and tokenizer are NOT exported. A complete
//!   on-device pipeline additionally needs log-mel preprocessing, the
//!   autoregressive decoder with past key values, and token-to-text
//!   conversion.

pub mod encoder;
pub mod fetch;
pub mod package;

pub use encoder::{validate_encoder, EncoderValidation};
pub use fetch::{resolve_model, ModelFiles};
pub use package::{write_package, PackageManifest, PackageSummary, TensorSpec};

use std::path::Path;

use talkyo_config::ExportSettings;
use thiserror::Error;

/// Tensor name the package manifest declares as input
pub const INPUT_TENSOR_NAME: &str = "input_features";
/// Tensor name the package manifest declares as output
pub const OUTPUT_TENSOR_NAME: &str = "encoder_output";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Pre-flight check failed: {reason}. {hint}")]
    Preflight { reason: String, hint: String },

    #[error("Failed to fetch model files: {0}")]
    Fetch(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("SafeTensors error: {0}")]
    Tensors(#[from] safetensors::SafeTensorError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of a completed export run
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Shapes observed during the validation pass
    pub validation: EncoderValidation,
    /// What landed on disk
    pub summary: PackageSummary,
}

/// Verify required capabilities before any side-effecting work.
///
/// Checks that a weight source is reachable (the configured local
/// directory exists, or the hub API can be constructed) and that the
/// output parent directory is writable, so the expensive load and
/// validation steps never run for an export that could not land on disk.
/// Failures carry a remediation hint.
pub fn preflight(settings: &ExportSettings) -> Result<(), ExportError> {
    match &settings.weights_dir {
        Some(dir) => {
            if !dir.is_dir() {
                return Err(ExportError::Preflight {
                    reason: format!("weights directory {} does not exist", dir.display()),
                    hint: "Point export.weights_dir at a directory containing config.json and \
                           model.safetensors, or unset it to download from the hub"
                        .to_string(),
                });
            }
        }
        None => {
            hf_hub::api::sync::Api::new().map_err(|e| ExportError::Preflight {
                reason: format!("hub API unavailable: {e}"),
                hint: "Check network access to huggingface.co and that the cache directory \
                       is writable, or set export.weights_dir to a local checkpoint"
                    .to_string(),
            })?;
        }
    }

    probe_output_parent(&settings.output_dir)?;

    Ok(())
}

/// Prove the package's parent directory can be created and written
fn probe_output_parent(output_dir: &Path) -> Result<(), ExportError> {
    let parent = match output_dir.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let attempt = std::fs::create_dir_all(parent).and_then(|()| {
        let probe = parent.join(".export-preflight");
        std::fs::write(&probe, b"")?;
        std::fs::remove_file(&probe)
    });

    attempt.map_err(|e| ExportError::Preflight {
        reason: format!("output parent {} is not writable: {e}", parent.display()),
        hint: "Set export.output_dir to a path under a writable directory".to_string(),
    })
}

/// Run the full export: fetch, load, validate, package.
///
/// Any failure before packaging leaves the previous package (if any)
/// untouched; the output directory is only replaced once fetch, load, and
/// the validation pass have all succeeded.
pub fn run_export(settings: &ExportSettings) -> Result<ExportReport, ExportError> {
    preflight(settings)?;

    let files = resolve_model(&settings.model_id, settings.weights_dir.as_deref())?;
    tracing::info!(
        config = %files.config.display(),
        weights = %files.weights.display(),
        "Resolved model files"
    );

    let validation = validate_encoder(&files, settings.input_frames)?;
    tracing::info!(
        input_shape = ?validation.input_shape,
        output_shape = ?validation.output_shape,
        "Encoder validation pass complete"
    );

    let manifest = PackageManifest {
        model_id: settings.model_id.clone(),
        min_platform: settings.min_platform.clone(),
        input: TensorSpec {
            name: INPUT_TENSOR_NAME.to_string(),
            shape: validation.input_shape.clone(),
        },
        output: TensorSpec {
            name: OUTPUT_TENSOR_NAME.to_string(),
            shape: validation.output_shape.clone(),
        },
    };

    if is_package_dir(&settings.output_dir) {
        tracing::info!(
            path = %settings.output_dir.display(),
            "Replacing existing encoder package"
        );
    }

    let summary = write_package(&files.weights, &settings.output_dir, &manifest)?;
    tracing::info!(
        path = %summary.package_dir.display(),
        tensors = summary.tensor_count,
        bytes = summary.weight_bytes,
        "Encoder package written"
    );

    tracing::warn!(
        "Conversion partially complete: decoder with past key values, generation loop, \
         log-mel preprocessing, and token-to-text conversion are not exported"
    );

    Ok(ExportReport {
        validation,
        summary,
    })
}

/// True when `path` looks like a previously written encoder package
pub fn is_package_dir(path: &Path) -> bool {
    path.join("manifest.json").is_file() && path.join("encoder.safetensors").is_file()
}
