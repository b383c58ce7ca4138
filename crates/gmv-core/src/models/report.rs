//! Serializable extraction report handed to the session-update collaborator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::gmv::ExtractionResult;
use crate::gmv::rules::{format_idr_with_symbol, Strategy};

/// Outcome of extracting GMV from one screenshot's text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GmvReport {
    /// Extracted GMV, absent when not found.
    pub gmv: Option<Decimal>,

    /// Strategy that produced the value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,

    /// Text fragment the value was read from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_text: Option<String>,

    /// Human-readable amount ("Rp 1.234.567").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,

    /// Number of characters of OCR text received.
    pub input_chars: usize,
}

impl GmvReport {
    pub fn new(result: &ExtractionResult, input: &str, currency_symbol: &str) -> Self {
        let found = result.gmv.as_ref();
        Self {
            gmv: found.map(|m| m.value.normalize()),
            strategy: found.map(|m| m.strategy),
            matched_text: found.map(|m| m.source.clone()),
            formatted: found.map(|m| format_idr_with_symbol(m.value, currency_symbol)),
            input_chars: input.chars().count(),
        }
    }

    pub fn is_found(&self) -> bool {
        self.gmv.is_some()
    }

    /// One-line message for the person who submitted the screenshot.
    pub fn summary(&self) -> String {
        match &self.formatted {
            Some(amount) => format!("GMV: {}", amount),
            None => "GMV not found in screenshot text".to_string(),
        }
    }
}
