//! Error types for the gmv-core library.

use thiserror::Error;

/// Main error type for the gmv library.
#[derive(Error, Debug)]
pub enum GmvError {
    /// Text recognition (OCR collaborator) error.
    #[error("recognition error: {0}")]
    Recognition(#[from] RecognitionError),

    /// GMV extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning OCR text into a monetary value.
///
/// `MalformedNumber` and `NoMatch` never leave a strategy: they make the
/// strategy decline and the cascade moves on. Only `ExtractionFailed` is
/// reported to callers, and only through the `Result` API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// A token matched a pattern but its digits are not a valid number.
    #[error("malformed number: {value:?}")]
    MalformedNumber { value: String },

    /// A strategy's patterns found nothing usable in the text.
    #[error("no match for strategy {strategy}")]
    NoMatch { strategy: &'static str },

    /// Every strategy declined.
    #[error("no GMV value found")]
    ExtractionFailed,
}

impl ExtractionError {
    pub(crate) fn malformed(value: impl Into<String>) -> Self {
        Self::MalformedNumber {
            value: value.into(),
        }
    }
}

/// Errors from the external text recognition backend.
#[derive(Error, Debug)]
pub enum RecognitionError {
    /// The recognizer could not be started or exited unsuccessfully.
    #[error("recognizer command failed: {0}")]
    Command(String),

    /// The recognizer did not answer within the configured time box.
    #[error("recognizer timed out after {0} ms")]
    Timeout(u64),

    /// The recognizer returned no text at all.
    #[error("recognizer returned no text")]
    EmptyOutput,

    /// I/O error while talking to the recognizer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RecognitionError {
    /// Whether retrying the same call may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Io(_))
    }
}

/// Result type for the gmv library.
pub type Result<T> = std::result::Result<T, GmvError>;
