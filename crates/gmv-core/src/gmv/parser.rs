//! Strategy cascade over OCR text.

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;

use super::rules::{ExtractionMatch, Strategy};
use super::GmvExtractor;

/// Result of one extraction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Accepted value, if any strategy produced one.
    pub gmv: Option<ExtractionMatch<Decimal>>,
    /// Strategies that declined before the accepting one, in the order tried.
    pub declined: Vec<(Strategy, ExtractionError)>,
}

impl ExtractionResult {
    /// The accepted monetary value.
    pub fn value(&self) -> Option<Decimal> {
        self.gmv.as_ref().map(|m| m.value)
    }

    /// Strategy that produced the value.
    pub fn strategy(&self) -> Option<Strategy> {
        self.gmv.as_ref().map(|m| m.strategy)
    }

    pub fn is_found(&self) -> bool {
        self.gmv.is_some()
    }

    /// Convert "not found" into [`ExtractionError::ExtractionFailed`].
    pub fn into_match(self) -> Result<ExtractionMatch<Decimal>, ExtractionError> {
        self.gmv.ok_or(ExtractionError::ExtractionFailed)
    }
}

/// Runs the strategies of [`Strategy::ORDER`] and keeps the first accepted value.
///
/// Pure: the same text always yields the same result, and nothing outside
/// the call is read or written.
#[derive(Debug, Clone)]
pub struct GmvParser {
    /// Characters of input considered (0 = unlimited).
    max_input_chars: usize,
}

impl GmvParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            max_input_chars: config.max_input_chars,
        }
    }

    /// Limit how much of the input is scanned.
    pub fn with_max_input_chars(mut self, max: usize) -> Self {
        self.max_input_chars = max;
        self
    }

    fn bounded<'a>(&self, text: &'a str) -> &'a str {
        if self.max_input_chars == 0 {
            return text;
        }
        match text.char_indices().nth(self.max_input_chars) {
            Some((cut, _)) => {
                debug!("Truncating input at {} characters", self.max_input_chars);
                &text[..cut]
            }
            None => text,
        }
    }
}

impl Default for GmvParser {
    fn default() -> Self {
        Self::new()
    }
}

impl GmvExtractor for GmvParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let text = self.bounded(text);
        let mut declined = Vec::new();

        debug!("Extracting GMV from {} characters of text", text.len());

        for strategy in Strategy::ORDER {
            match strategy.apply(text) {
                Ok(found) => {
                    info!(
                        "GMV {} accepted by {} from {:?}",
                        found.value, strategy, found.source
                    );
                    return ExtractionResult {
                        gmv: Some(found),
                        declined,
                    };
                }
                Err(e) => {
                    debug!("Strategy {} declined: {}", strategy, e);
                    declined.push((strategy, e));
                }
            }
        }

        debug!("No strategy produced a GMV value");
        ExtractionResult {
            gmv: None,
            declined,
        }
    }
}
