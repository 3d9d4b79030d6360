//! Test phrase entries

use serde::{Deserialize, Serialize};

/// One phrase of the fixture corpus
///
/// `expected` is the transcription ground truth the downstream test suite
/// compares against. For the shipped corpus it is identical to `text`, but
/// the two are kept separate so punctuation or normalization differences
/// can be expressed per phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestPhrase {
    /// Source text sent to the synthesis service
    pub text: String,
    /// Target audio file name (relative to the output directory)
    pub filename: String,
    /// Expected transcription, defaults to `text` when omitted
    #[serde(default)]
    pub expected: Option<String>,
}

impl TestPhrase {
    /// Create a phrase whose expected transcription equals its text
    pub fn new(text: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            filename: filename.into(),
            expected: None,
        }
    }

    /// Expected transcription for this phrase
    pub fn expected_transcription(&self) -> &str {
        self.expected.as_deref().unwrap_or(&self.text)
    }
}
