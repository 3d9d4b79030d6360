//! On-device package writing
//!
//! A package is a directory containing `encoder.safetensors` (the
//! `model.encoder.*` subset of the checkpoint, tensor names unchanged)
//! and `manifest.json` describing the traced interface.

use std::path::{Path, PathBuf};

use safetensors::SafeTensors;
use serde::{Deserialize, Serialize};

use crate::ExportError;

/// Checkpoint prefix of the encoder sub-module
const ENCODER_PREFIX: &str = "model.encoder.";

/// Named tensor with its traced shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TensorSpec {
    pub name: String,
    pub shape: Vec<usize>,
}

/// `manifest.json` contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageManifest {
    /// Hub id of the source checkpoint
    pub model_id: String,
    /// Minimum deployment target the package is intended for
    pub min_platform: String,
    /// Declared input tensor (`input_features`)
    pub input: TensorSpec,
    /// Declared output tensor (`encoder_output`)
    pub output: TensorSpec,
}

/// What a completed package write produced
#[derive(Debug, Clone)]
pub struct PackageSummary {
    pub package_dir: PathBuf,
    pub tensor_count: usize,
    pub weight_bytes: usize,
}

/// Write the encoder package, replacing any existing package at `out_dir`.
///
/// Filters the full checkpoint down to the encoder tensors and fails if
/// none match, which would mean the checkpoint layout is not the expected
/// seq2seq `model.encoder.*` / `model.decoder.*` split.
pub fn write_package(
    weights: &Path,
    out_dir: &Path,
    manifest: &PackageManifest,
) -> Result<PackageSummary, ExportError> {
    let bytes = std::fs::read(weights)?;
    let tensors = SafeTensors::deserialize(&bytes)?;

    let encoder_tensors: Vec<_> = tensors
        .tensors()
        .into_iter()
        .filter(|(name, _)| name.starts_with(ENCODER_PREFIX))
        .collect();

    if encoder_tensors.is_empty() {
        return Err(ExportError::Model(format!(
            "checkpoint {} contains no {}* tensors",
            weights.display(),
            ENCODER_PREFIX
        )));
    }

    let tensor_count = encoder_tensors.len();
    let weight_bytes: usize = encoder_tensors
        .iter()
        .map(|(_, view)| view.data().len())
        .sum();

    // Replace-on-success: everything fallible above ran before the old
    // package is touched
    if out_dir.exists() {
        std::fs::remove_dir_all(out_dir)?;
    }
    std::fs::create_dir_all(out_dir)?;

    safetensors::serialize_to_file(encoder_tensors, &None, &out_dir.join("encoder.safetensors"))?;
    std::fs::write(
        out_dir.join("manifest.json"),
        serde_json::to_string_pretty(manifest)?,
    )?;

    Ok(PackageSummary {
        package_dir: out_dir.to_path_buf(),
        tensor_count,
        weight_bytes,
    })
}
