//! Indonesian number formatting: periods group thousands, a comma marks decimals.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ExtractionError;

/// Parse an Indonesian-formatted number (e.g., "1.234.567" or "1.234,56").
///
/// Periods are dropped as thousands separators and the comma becomes the
/// decimal point. Separators trailing the last digit (sentence punctuation
/// picked up by a greedy match) are ignored.
pub fn parse_idr_number(s: &str) -> Result<Decimal, ExtractionError> {
    let trimmed = s.trim().trim_end_matches(['.', ',']);

    let well_formed = trimmed.starts_with(|c: char| c.is_ascii_digit())
        && trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
        && trimmed.matches(',').count() <= 1;
    if !well_formed {
        return Err(ExtractionError::malformed(s));
    }

    let normalized = trimmed.replace('.', "").replace(',', ".");
    Decimal::from_str(&normalized).map_err(|_| ExtractionError::malformed(s))
}

/// Parse the numeric part of a suffixed figure ("286.9" in "286.9K").
///
/// A suffixed figure carries at most one separator and it is always the
/// decimal point, whichever of period or comma the dashboard used.
pub fn parse_magnitude_base(s: &str) -> Result<Decimal, ExtractionError> {
    let trimmed = s.trim();

    let separators = trimmed.chars().filter(|c| *c == '.' || *c == ',').count();
    let well_formed = trimmed.starts_with(|c: char| c.is_ascii_digit())
        && trimmed.ends_with(|c: char| c.is_ascii_digit())
        && trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
        && separators <= 1;
    if !well_formed {
        return Err(ExtractionError::malformed(s));
    }

    Decimal::from_str(&trimmed.replace(',', ".")).map_err(|_| ExtractionError::malformed(s))
}

/// Format an amount Indonesian style (1.234.567 or 1.234,5).
///
/// The fractional part is shown only when the value has one.
pub fn format_idr_amount(amount: Decimal) -> String {
    let s = amount.normalize().to_string();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let (integer_part, fraction) = match digits.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (digits, None),
    };

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::from(sign);

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(*c);
    }

    if let Some(frac) = fraction {
        formatted.push(',');
        formatted.push_str(frac);
    }

    formatted
}

/// Format an amount with a currency symbol ("Rp 1.234.567").
pub fn format_idr_with_symbol(amount: Decimal, symbol: &str) -> String {
    format!("{} {}", symbol, format_idr_amount(amount))
}
