//! Text recognition seam.
//!
//! The OCR engine itself lives outside this crate. It is modeled as a
//! fallible call that turns a screenshot into plain text; [`RetryingRecognizer`]
//! bounds how often a transient failure is retried.

use std::path::Path;
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::RecognitionError;
use crate::models::config::RecognizerConfig;

/// External OCR backend returning the full-page text of an image.
pub trait TextRecognizer {
    fn recognize(&self, image: &Path) -> Result<String, RecognitionError>;
}

impl<F> TextRecognizer for F
where
    F: Fn(&Path) -> Result<String, RecognitionError>,
{
    fn recognize(&self, image: &Path) -> Result<String, RecognitionError> {
        self(image)
    }
}

/// Retries transient recognition failures a bounded number of times.
pub struct RetryingRecognizer<R> {
    inner: R,
    max_retries: u32,
    retry_delay: Duration,
}

impl<R: TextRecognizer> RetryingRecognizer<R> {
    pub fn new(inner: R) -> Self {
        Self::from_config(inner, &RecognizerConfig::default())
    }

    pub fn from_config(inner: R, config: &RecognizerConfig) -> Self {
        Self {
            inner,
            max_retries: config.max_retries,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }
}

impl<R: TextRecognizer> TextRecognizer for RetryingRecognizer<R> {
    fn recognize(&self, image: &Path) -> Result<String, RecognitionError> {
        let mut attempt = 0;
        loop {
            match self.inner.recognize(image) {
                Ok(text) if text.trim().is_empty() => return Err(RecognitionError::EmptyOutput),
                Ok(text) => {
                    debug!("Recognized {} characters from {}", text.len(), image.display());
                    return Ok(text);
                }
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(
                        "Recognition of {} failed ({}), retry {}/{}",
                        image.display(),
                        e,
                        attempt,
                        self.max_retries
                    );
                    thread::sleep(self.retry_delay);
                }
                Err(e) => return Err(e),
            }
        }
    }
}
