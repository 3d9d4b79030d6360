//! Audio parameter types and a WAV sanity probe

use std::io::Cursor;

use serde::{Deserialize, Serialize};

/// Sample rates used by the fixture corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SampleRate {
    /// 16kHz - standard speech recognition input
    Hz16000,
    /// 22.05kHz - ElevenLabs multilingual TTS output
    #[default]
    Hz22050,
    /// 44.1kHz - CD quality
    Hz44100,
}

impl SampleRate {
    /// Get sample rate as u32
    pub fn as_u32(&self) -> u32 {
        match self {
            SampleRate::Hz16000 => 16000,
            SampleRate::Hz22050 => 22050,
            SampleRate::Hz44100 => 44100,
        }
    }
}

/// Audio channel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Channels {
    #[default]
    Mono,
    Stereo,
}

impl Channels {
    pub fn count(&self) -> u16 {
        match self {
            Channels::Mono => 1,
            Channels::Stereo => 2,
        }
    }
}

/// Declared audio parameters of a fixture corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioParams {
    pub sample_rate: SampleRate,
    pub channels: Channels,
}

impl Default for AudioParams {
    fn default() -> Self {
        Self {
            sample_rate: SampleRate::Hz22050,
            channels: Channels::Mono,
        }
    }
}

/// Result of probing synthesized bytes as a WAV file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavProbe {
    /// Parseable WAV matching the declared parameters
    Ok,
    /// Parseable WAV, but the header disagrees with the declared parameters
    Mismatch {
        sample_rate: u32,
        channels: u16,
    },
    /// Not parseable as WAV at all
    NotWav,
}

/// Probe response bytes as a WAV header against the declared parameters.
///
/// Purely diagnostic: callers write the bytes verbatim regardless of the
/// outcome. The downstream transcription tests feed these files to a
/// recognizer at a declared sample rate, so a mismatch is worth a warning
/// at generation time rather than a confusing accuracy drop later.
pub fn probe_wav(bytes: &[u8], declared: AudioParams) -> WavProbe {
    match hound::WavReader::new(Cursor::new(bytes)) {
        Ok(reader) => {
            let spec = reader.spec();
            if spec.sample_rate == declared.sample_rate.as_u32()
                && spec.channels == declared.channels.count()
            {
                WavProbe::Ok
            } else {
                WavProbe::Mismatch {
                    sample_rate: spec.sample_rate,
                    channels: spec.channels,
                }
            }
        }
        Err(_) => WavProbe::NotWav,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav_bytes(sample_rate: u32, channels: u16) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for _ in 0..64 {
                writer.write_sample(0i16).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_probe_matching_wav() {
        let bytes = wav_bytes(22050, 1);
        assert_eq!(probe_wav(&bytes, AudioParams::default()), WavProbe::Ok);
    }

    #[test]
    fn test_probe_mismatched_rate() {
        let bytes = wav_bytes(44100, 1);
        assert_eq!(
            probe_wav(&bytes, AudioParams::default()),
            WavProbe::Mismatch {
                sample_rate: 44100,
                channels: 1
            }
        );
    }

    #[test]
    fn test_probe_garbage_is_not_wav() {
        assert_eq!(
            probe_wav(b"not a riff header", AudioParams::default()),
            WavProbe::NotWav
        );
    }
}
