//! Keyword-value strategy: "GMV: Rp 1.500.000", "Total penjualan 12,5 M".

use rust_decimal::Decimal;

use super::magnitude::apply_suffix;
use super::numbers::parse_idr_number;
use super::patterns::KEYWORD_VALUE;
use super::{accept_candidate, ExtractionMatch, FieldExtractor, Strategy};

/// Extractor for a GMV/revenue keyword followed by an amount.
///
/// The base is read with the Indonesian convention; a trailing K/M/B
/// scales it afterwards.
pub struct KeywordValueExtractor;

impl KeywordValueExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for KeywordValueExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for KeywordValueExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        KEYWORD_VALUE
            .captures_iter(text)
            .filter_map(|caps| {
                let suffix = caps.get(2).map(|m| m.as_str());
                let value =
                    parse_idr_number(&caps[1]).and_then(|base| apply_suffix(base, suffix));
                accept_candidate(Strategy::KeywordValue, &caps, value)
            })
            .collect()
    }
}
