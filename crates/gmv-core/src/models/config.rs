//! Configuration structures for the GMV pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::GmvError;

/// Main configuration for the gmv pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GmvConfig {
    /// Extraction configuration.
    pub extraction: ExtractionConfig,

    /// External text recognizer configuration.
    pub recognizer: RecognizerConfig,

    /// Output rendering configuration.
    pub output: OutputConfig,
}

/// Extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Maximum characters of OCR text scanned per call (0 = unlimited).
    pub max_input_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_input_chars: 65_536,
        }
    }
}

/// External OCR command configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    /// Command line to run; `{input}` is replaced with the image path.
    pub command: Vec<String>,

    /// Time box for one recognition call, in milliseconds.
    pub timeout_ms: u64,

    /// Retries after a transient failure.
    pub max_retries: u32,

    /// Pause between retries, in milliseconds.
    pub retry_delay_ms: u64,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            command: vec![
                "tesseract".to_string(),
                "{input}".to_string(),
                "stdout".to_string(),
            ],
            timeout_ms: 30_000,
            max_retries: 2,
            retry_delay_ms: 500,
        }
    }
}

/// Output rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Currency symbol used when printing amounts.
    pub currency_symbol: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "Rp".to_string(),
        }
    }
}

impl GmvConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| GmvError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| GmvError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
