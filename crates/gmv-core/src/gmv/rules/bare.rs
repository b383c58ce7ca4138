//! Bare-magnitude strategy: the largest K/M/B figure on the screenshot.

use rust_decimal::Decimal;

use super::magnitude::apply_suffix;
use super::numbers::parse_magnitude_base;
use super::patterns::BARE_MAGNITUDE;
use super::{accept_candidate, starts_inside_number, ExtractionMatch, FieldExtractor, Strategy};

/// Extractor that picks the maximum suffixed figure.
///
/// Dashboards show revenue as their headline number, so the biggest
/// abbreviated value is taken as the GMV.
pub struct BareMagnitudeExtractor;

impl BareMagnitudeExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BareMagnitudeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for BareMagnitudeExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        // Ties keep the earliest occurrence.
        self.extract_all(text)
            .into_iter()
            .rev()
            .max_by(|a, b| a.value.cmp(&b.value))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        BARE_MAGNITUDE
            .captures_iter(text)
            .filter(|caps| {
                // "345,6K" inside "12.345,6K" is not a figure of its own.
                caps.get(1)
                    .is_some_and(|m| !starts_inside_number(text, m.start()))
            })
            .filter_map(|caps| {
                let value = parse_magnitude_base(&caps[1])
                    .and_then(|base| apply_suffix(base, Some(&caps[2])));
                accept_candidate(Strategy::BareMagnitude, &caps, value)
            })
            .collect()
    }
}
