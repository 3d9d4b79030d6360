//! Encoder loading and the one-shot validation forward pass

use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};

use crate::fetch::ModelFiles;
use crate::ExportError;

/// Shapes observed while validating the encoder
#[derive(Debug, Clone)]
pub struct EncoderValidation {
    /// Synthetic input shape, `(1, num_mel_bins, input_frames)`
    pub input_shape: Vec<usize>,
    /// Encoder output shape from the forward pass
    pub output_shape: Vec<usize>,
    /// Mel bin count from the model config
    pub num_mel_bins: usize,
}

/// Load the Whisper encoder and run it once on a synthetic log-mel input.
///
/// This is the tracing step: it proves the checkpoint actually builds and
/// the encoder runs end to end for the fixed input shape before anything
/// is written to disk. The result is only valid for that shape.
pub fn validate_encoder(
    files: &ModelFiles,
    input_frames: usize,
) -> Result<EncoderValidation, ExportError> {
    let config_str = std::fs::read_to_string(&files.config)?;
    let config: Config = serde_json::from_str(&config_str)
        .map_err(|e| ExportError::Model(format!("Failed to parse config.json: {e}")))?;

    let device = Device::Cpu;
    let vb = unsafe {
        VarBuilder::from_mmaped_safetensors(&[files.weights.clone()], m::DTYPE, &device)
            .map_err(|e| ExportError::Model(format!("Failed to load weights: {e}")))?
    };

    let mut model = m::model::Whisper::load(&vb, config.clone())
        .map_err(|e| ExportError::Model(format!("Failed to build Whisper model: {e}")))?;

    let num_mel_bins = config.num_mel_bins;
    let input_shape = vec![1, num_mel_bins, input_frames];
    // Stand-in for a real log-mel spectrogram; only the shape matters here
    let input = Tensor::randn(0f32, 1f32, (1, num_mel_bins, input_frames), &device)
        .map_err(|e| ExportError::Model(format!("Failed to build synthetic input: {e}")))?
        .to_dtype(m::DTYPE)
        .map_err(|e| ExportError::Model(format!("Failed to cast synthetic input: {e}")))?;

    let output = model
        .encoder
        .forward(&input, true)
        .map_err(|e| ExportError::Model(format!("Encoder forward failed: {e}")))?;

    Ok(EncoderValidation {
        input_shape,
        output_shape: output.dims().to_vec(),
        num_mel_bins,
    })
}
