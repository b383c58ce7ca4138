//! K/M/B magnitude suffixes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Scale abbreviated by a trailing letter on a dashboard figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Magnitude {
    /// K, thousand.
    Thousand,
    /// M, million.
    Million,
    /// B, billion.
    Billion,
}

impl Magnitude {
    /// Recognize a suffix letter, case-insensitively.
    pub fn from_suffix(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'K' => Some(Self::Thousand),
            'M' => Some(Self::Million),
            'B' => Some(Self::Billion),
            _ => None,
        }
    }

    /// Recognize a one-character suffix token.
    pub fn from_token(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_suffix(c),
            _ => None,
        }
    }

    pub fn multiplier(self) -> Decimal {
        match self {
            Self::Thousand => Decimal::from(1_000u64),
            Self::Million => Decimal::from(1_000_000u64),
            Self::Billion => Decimal::from(1_000_000_000u64),
        }
    }

    /// Multiply `base` by this magnitude.
    pub fn apply(self, base: Decimal) -> Result<Decimal, ExtractionError> {
        base.checked_mul(self.multiplier())
            .ok_or_else(|| ExtractionError::malformed(format!("{base} x {}", self.multiplier())))
    }
}

/// Expand `base` by an optional suffix token.
///
/// No suffix, or a token that is not K/M/B, leaves the value unchanged.
pub fn apply_suffix(base: Decimal, suffix: Option<&str>) -> Result<Decimal, ExtractionError> {
    match suffix.and_then(Magnitude::from_token) {
        Some(magnitude) => magnitude.apply(base),
        None => Ok(base),
    }
}
