//! Currency-format strategy: "Rp 1.234.567" or a marker-less "1.234.567".

use rust_decimal::Decimal;

use super::numbers::parse_idr_number;
use super::patterns::{CURRENCY_PREFIXED, GROUPED_NUMBER};
use super::{accept_candidate, has_magnitude_suffix, ExtractionMatch, FieldExtractor, Strategy};

/// Extractor for plain, suffix-free rupiah amounts.
///
/// Currency-prefixed amounts are tried first; numbers with three or more
/// digit groups are the fallback when no prefixed amount is usable.
pub struct CurrencyFormatExtractor;

impl CurrencyFormatExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CurrencyFormatExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CurrencyFormatExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        [&*CURRENCY_PREFIXED, &*GROUPED_NUMBER]
            .into_iter()
            .flat_map(|pattern| pattern.captures_iter(text))
            .filter(|caps| {
                // Suffixed figures belong to the magnitude strategies.
                caps.get(1)
                    .is_some_and(|m| !has_magnitude_suffix(text, m.end()))
            })
            .filter_map(|caps| {
                let value = parse_idr_number(&caps[1]);
                accept_candidate(Strategy::CurrencyFormat, &caps, value)
            })
            .collect()
    }
}
