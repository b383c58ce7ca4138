//! Rule-based GMV extraction strategies.
//!
//! Each strategy is a self-contained heuristic that locates one candidate
//! figure in OCR text. [`Strategy::ORDER`] fixes the priority in which the
//! parser tries them: specific, labeled signals pre-empt generic ones.

pub mod bare;
pub mod currency;
pub mod keyword;
pub mod labeled;
pub mod magnitude;
pub mod numbers;
pub mod patterns;

pub use bare::BareMagnitudeExtractor;
pub use currency::CurrencyFormatExtractor;
pub use keyword::KeywordValueExtractor;
pub use labeled::LabeledMagnitudeExtractor;
pub use magnitude::{apply_suffix, Magnitude};
pub use numbers::{format_idr_amount, format_idr_with_symbol, parse_idr_number, parse_magnitude_base};

use std::fmt;

use regex::Captures;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::ExtractionError;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// The extraction strategies, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Revenue label followed by a K/M/B figure.
    LabeledMagnitude,
    /// Largest K/M/B figure anywhere in the text.
    BareMagnitude,
    /// Currency-prefixed or heavily grouped number.
    CurrencyFormat,
    /// GMV/revenue keyword followed by a number, suffix optional.
    KeywordValue,
}

impl Strategy {
    /// Priority order. The parser stops at the first strategy that accepts a value.
    pub const ORDER: [Strategy; 4] = [
        Strategy::LabeledMagnitude,
        Strategy::BareMagnitude,
        Strategy::CurrencyFormat,
        Strategy::KeywordValue,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::LabeledMagnitude => "labeled_magnitude",
            Self::BareMagnitude => "bare_magnitude",
            Self::CurrencyFormat => "currency_format",
            Self::KeywordValue => "keyword_value",
        }
    }

    /// Run this strategy alone against `text`.
    ///
    /// Declines with [`ExtractionError::NoMatch`] when no candidate is accepted.
    pub fn apply(self, text: &str) -> Result<ExtractionMatch<Decimal>, ExtractionError> {
        let found = match self {
            Self::LabeledMagnitude => LabeledMagnitudeExtractor::new().extract(text),
            Self::BareMagnitude => BareMagnitudeExtractor::new().extract(text),
            Self::CurrencyFormat => CurrencyFormatExtractor::new().extract(text),
            Self::KeywordValue => KeywordValueExtractor::new().extract(text),
        };

        found.ok_or(ExtractionError::NoMatch {
            strategy: self.name(),
        })
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An accepted candidate and where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Strategy that produced the value.
    pub strategy: Strategy,
    /// Source text that was matched.
    pub source: String,
    /// Byte range of the match in the source text.
    pub position: Option<(usize, usize)>,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, strategy: Strategy, source: impl Into<String>) -> Self {
        Self {
            value,
            strategy,
            source: source.into(),
            position: None,
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Only strictly positive values count as a GMV figure.
pub fn is_accepted(value: Decimal) -> bool {
    value > Decimal::ZERO
}

/// Turn one regex match into an accepted candidate, or drop it.
///
/// Malformed digits and non-positive values are logged and skipped so the
/// remaining matches still get a chance.
pub(crate) fn accept_candidate(
    strategy: Strategy,
    caps: &Captures<'_>,
    value: Result<Decimal, ExtractionError>,
) -> Option<ExtractionMatch<Decimal>> {
    let full_match = caps.get(0)?;

    match value {
        Ok(value) if is_accepted(value) => {
            trace!(%strategy, source = full_match.as_str(), %value, "candidate accepted");
            Some(
                ExtractionMatch::new(value, strategy, full_match.as_str())
                    .with_position(full_match.start(), full_match.end()),
            )
        }
        Ok(value) => {
            trace!(%strategy, source = full_match.as_str(), %value, "non-positive candidate skipped");
            None
        }
        Err(e) => {
            debug!(%strategy, source = full_match.as_str(), "skipping token: {}", e);
            None
        }
    }
}

/// Whether a magnitude suffix follows byte offset `end` in `text`.
///
/// Mirrors the suffix shape of the magnitude patterns: at most one space,
/// one K/M/B letter, then a word boundary.
pub(crate) fn has_magnitude_suffix(text: &str, end: usize) -> bool {
    let rest = text.get(end..).unwrap_or("");
    let rest = rest.strip_prefix(' ').unwrap_or(rest);
    let mut chars = rest.chars();

    match chars.next() {
        Some(c) if Magnitude::from_suffix(c).is_some() => {
            !chars.next().is_some_and(|n| n.is_alphanumeric() || n == '_')
        }
        _ => false,
    }
}

/// Whether byte offset `start` in `text` sits inside a larger number.
///
/// The counterpart of [`has_magnitude_suffix`] on the left side: a digit,
/// period or comma right before `start` means the match is a fragment.
pub(crate) fn starts_inside_number(text: &str, start: usize) -> bool {
    text.get(..start)
        .and_then(|head| head.chars().next_back())
        .is_some_and(|c| c.is_ascii_digit() || c == '.' || c == ',')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_order_is_total_and_fixed() {
        assert_eq!(
            Strategy::ORDER.map(Strategy::name),
            [
                "labeled_magnitude",
                "bare_magnitude",
                "currency_format",
                "keyword_value"
            ]
        );
    }

    #[test]
    fn test_apply_declines_with_no_match() {
        assert_eq!(
            Strategy::BareMagnitude.apply("tidak ada angka"),
            Err(ExtractionError::NoMatch {
                strategy: "bare_magnitude"
            })
        );
    }

    #[test]
    fn test_is_accepted() {
        assert!(is_accepted(Decimal::from_str("0.01").unwrap()));
        assert!(!is_accepted(Decimal::ZERO));
        assert!(!is_accepted(Decimal::from(-5)));
    }

    #[test]
    fn test_has_magnitude_suffix() {
        let text = "Rp 1.234 K and Rp 5.000.000 kg and 7M";
        assert!(has_magnitude_suffix(text, 8));
        assert!(!has_magnitude_suffix(text, 27));
        assert!(has_magnitude_suffix("7M", 1));
        assert!(!has_magnitude_suffix("7", 1));
    }

    #[test]
    fn test_starts_inside_number() {
        let text = "Terjual 1.234.567K";
        assert!(!starts_inside_number(text, 8));
        assert!(starts_inside_number(text, 10));
        assert!(starts_inside_number(text, 14));
        assert!(!starts_inside_number("5K", 0));
        assert!(starts_inside_number("12,5K", 3));
    }
}
