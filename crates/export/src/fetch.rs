//! Model file resolution: local checkpoint directory or HuggingFace hub
//!
//! Hub files land in the hf-hub cache and are reused across runs.

use std::path::{Path, PathBuf};

use crate::ExportError;

/// Resolved checkpoint files for one model
#[derive(Debug, Clone)]
pub struct ModelFiles {
    /// Whisper `config.json`
    pub config: PathBuf,
    /// Full checkpoint, encoder and decoder tensors together
    pub weights: PathBuf,
}

/// Resolve `config.json` and `model.safetensors` for `model_id`.
///
/// When `weights_dir` is set, both files must already exist there and the
/// hub is never contacted. Otherwise they are fetched (or served from the
/// hf-hub cache) by repo id.
pub fn resolve_model(model_id: &str, weights_dir: Option<&Path>) -> Result<ModelFiles, ExportError> {
    match weights_dir {
        Some(dir) => resolve_local(dir),
        None => resolve_hub(model_id),
    }
}

fn resolve_local(dir: &Path) -> Result<ModelFiles, ExportError> {
    let config = dir.join("config.json");
    let weights = dir.join("model.safetensors");
    for (label, path) in [("config.json", &config), ("model.safetensors", &weights)] {
        if !path.is_file() {
            return Err(ExportError::Fetch(format!(
                "{} not found in {}",
                label,
                dir.display()
            )));
        }
    }
    Ok(ModelFiles { config, weights })
}

fn resolve_hub(model_id: &str) -> Result<ModelFiles, ExportError> {
    tracing::info!(model_id, "Downloading model from hub");
    let api = hf_hub::api::sync::Api::new()
        .map_err(|e| ExportError::Fetch(format!("hub API init failed: {e}")))?;
    let repo = api.model(model_id.to_string());
    let config = repo
        .get("config.json")
        .map_err(|e| ExportError::Fetch(format!("config.json for {model_id}: {e}")))?;
    let weights = repo
        .get("model.safetensors")
        .map_err(|e| ExportError::Fetch(format!("model.safetensors for {model_id}: {e}")))?;
    Ok(ModelFiles { config, weights })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_local_dir_fails_without_network() {
        let err = resolve_model("kotoba-tech/kotoba-whisper-v2.2", Some(Path::new("/no/such/dir")))
            .unwrap_err();
        assert!(matches!(err, ExportError::Fetch(_)));
    }

    #[test]
    fn test_local_dir_missing_weights_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), "{}").unwrap();
        let err = resolve_model("any", Some(dir.path())).unwrap_err();
        assert!(err.to_string().contains("model.safetensors"));
    }

    #[test]
    fn test_local_dir_with_both_files_resolves() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), "{}").unwrap();
        std::fs::write(dir.path().join("model.safetensors"), b"stub").unwrap();
        let files = resolve_model("any", Some(dir.path())).unwrap();
        assert!(files.config.ends_with("config.json"));
        assert!(files.weights.ends_with("model.safetensors"));
    }
}
