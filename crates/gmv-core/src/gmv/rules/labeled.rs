//! Labeled-magnitude strategy: a revenue label followed by a K/M/B figure.

use rust_decimal::Decimal;

use super::magnitude::apply_suffix;
use super::numbers::parse_magnitude_base;
use super::patterns::{LABELED_MAGNITUDE_ANY, LABELED_MAGNITUDE_DOT};
use super::{accept_candidate, ExtractionMatch, FieldExtractor, Strategy};

/// Extractor for "Pendapatan 286.9K"-style figures.
///
/// The period-only sub-pattern is tried before the one that also accepts a
/// decimal comma; the first accepted candidate wins.
pub struct LabeledMagnitudeExtractor;

impl LabeledMagnitudeExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LabeledMagnitudeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for LabeledMagnitudeExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        [&*LABELED_MAGNITUDE_DOT, &*LABELED_MAGNITUDE_ANY]
            .into_iter()
            .flat_map(|pattern| pattern.captures_iter(text))
            .filter_map(|caps| {
                let value = parse_magnitude_base(&caps[1])
                    .and_then(|base| apply_suffix(base, Some(&caps[2])));
                accept_candidate(Strategy::LabeledMagnitude, &caps, value)
            })
            .collect()
    }
}
