//! Common regex patterns for GMV extraction from dashboard screenshots.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Revenue label immediately followed by a suffixed figure ("Pendapatan 286.9K").
    // Sub-pattern 1 only accepts a period as the decimal separator.
    pub static ref LABELED_MAGNITUDE_DOT: Regex = Regex::new(
        r"(?i)\b(?:pendapatan|gmv|om[sz]et)\b[\s:]*(?:(?:Rp\.?|IDR)\s*)?(\d+(?:\.\d+)?) ?([KMB])\b"
    ).unwrap();

    // Sub-pattern 2 accepts either a period or a comma.
    pub static ref LABELED_MAGNITUDE_ANY: Regex = Regex::new(
        r"(?i)\b(?:pendapatan|gmv|om[sz]et)\b[\s:]*(?:(?:Rp\.?|IDR)\s*)?(\d+(?:[.,]\d+)?) ?([KMB])\b"
    ).unwrap();

    // Any suffixed figure, no label ("1.2M", "500 K").
    pub static ref BARE_MAGNITUDE: Regex = Regex::new(
        r"(?i)\b(\d+(?:[.,]\d+)?) ?([KMB])\b"
    ).unwrap();

    // Currency-prefixed amount ("Rp 1.234.567", "Rp1.234,50", "IDR 250.000").
    pub static ref CURRENCY_PREFIXED: Regex = Regex::new(
        r"(?i)(?:\bRp\.?|\bIDR)\s*(\d[\d.,]*)"
    ).unwrap();

    // Marker-less amount with three or more digit groups ("1.234.567").
    pub static ref GROUPED_NUMBER: Regex = Regex::new(
        r"\b(\d{1,3}(?:\.\d{3}){2,}(?:,\d+)?)\b"
    ).unwrap();

    // GMV/revenue keyword, optional currency marker, grouped number, optional suffix.
    pub static ref KEYWORD_VALUE: Regex = Regex::new(
        r"(?i)\b(?:gmv|total\s+pendapatan|pendapatan|om[sz]et|penjualan|total)\b[\s:]*(?:(?:Rp\.?|IDR)\s*)?(\d[\d.,]*)(?: ?([KMB]))?\b"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_patterns_span_line_breaks() {
        let caps = LABELED_MAGNITUDE_DOT.captures("Pendapatan\n286.9K").unwrap();
        assert_eq!(&caps[1], "286.9");
        assert_eq!(&caps[2], "K");

        assert!(LABELED_MAGNITUDE_DOT.captures("Pendapatan 286,9K").is_none());
        let caps = LABELED_MAGNITUDE_ANY.captures("Pendapatan 286,9K").unwrap();
        assert_eq!(&caps[1], "286,9");
    }

    #[test]
    fn test_bare_magnitude_requires_word_boundary() {
        let found: Vec<_> = BARE_MAGNITUDE
            .captures_iter("Views 1.2M, 35 barang, 500 k")
            .map(|c| c[0].to_string())
            .collect();
        assert_eq!(found, vec!["1.2M", "500 k"]);
    }

    #[test]
    fn test_grouped_number_needs_three_groups() {
        assert!(GROUPED_NUMBER.is_match("1.234.567"));
        assert!(GROUPED_NUMBER.is_match("12.345.678,90"));
        assert!(!GROUPED_NUMBER.is_match("12.345"));
        assert!(!GROUPED_NUMBER.is_match("18.11.2025"));
    }

    #[test]
    fn test_keyword_value_optional_suffix() {
        let caps = KEYWORD_VALUE.captures("GMV: Rp 1.500.000").unwrap();
        assert_eq!(&caps[1], "1.500.000");
        assert!(caps.get(2).is_none());

        let caps = KEYWORD_VALUE.captures("Total penjualan 12,5 M").unwrap();
        assert_eq!(&caps[1], "12,5");
        assert_eq!(&caps[2], "M");

        let caps = KEYWORD_VALUE.captures("Total 500 barang").unwrap();
        assert_eq!(&caps[1], "500");
        assert!(caps.get(2).is_none());
    }
}
