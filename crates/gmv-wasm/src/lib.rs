//! WASM bindings for livestream GMV extraction.
//!
//! The host application runs OCR in the browser (or Node.js) and hands the
//! recognized text to these functions.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use gmv_core::gmv::rules::format_idr_with_symbol;
use gmv_core::{ExtractionResult, GmvExtractor, GmvParser, GmvReport};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract the GMV value from screenshot text, or `undefined` when absent.
#[wasm_bindgen]
pub fn extract_gmv(text: &str) -> Option<f64> {
    GmvParser::new().parse(text).value().and_then(|v| v.to_f64())
}

/// Extract GMV and return the full report object.
#[wasm_bindgen]
pub fn extract_report(text: &str) -> Result<JsValue, JsValue> {
    GmvReader::new().extract(text)
}

/// Parse an Indonesian-formatted number (e.g. "1.234.567" or "1.234,56").
#[wasm_bindgen]
pub fn parse_idr_number(s: &str) -> Option<f64> {
    gmv_core::parse_idr_number(s).ok().and_then(|d| d.to_f64())
}

/// Format an amount with period thousands separators ("1.234.567").
#[wasm_bindgen]
pub fn format_idr_amount(amount: f64) -> String {
    Decimal::from_f64(amount)
        .map(gmv_core::format_idr_amount)
        .unwrap_or_default()
}

/// Reusable extractor with its own limits and currency symbol.
#[wasm_bindgen]
pub struct GmvReader {
    parser: GmvParser,
    currency_symbol: String,
}

#[wasm_bindgen]
impl GmvReader {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: GmvParser::new(),
            currency_symbol: "Rp".to_string(),
        }
    }

    /// Cap the number of characters inspected (0 disables the cap).
    #[wasm_bindgen]
    pub fn set_max_input_chars(&mut self, max: usize) {
        self.parser = GmvParser::new().with_max_input_chars(max);
    }

    #[wasm_bindgen]
    pub fn set_currency_symbol(&mut self, symbol: &str) {
        self.currency_symbol = symbol.to_string();
    }

    /// Extract GMV and return the report object.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        let report = self.report(text);
        serde_wasm_bindgen::to_value(&report).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Report plus the reason each earlier strategy declined.
    #[wasm_bindgen]
    pub fn extract_with_trace(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self.parser.parse(text);
        let output = TracedReport {
            report: GmvReport::new(&result, text, &self.currency_symbol),
            declined: declined_reasons(&result),
        };

        serde_wasm_bindgen::to_value(&output).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Formatted amount for display, or `undefined` when no GMV was found.
    #[wasm_bindgen]
    pub fn extract_formatted(&self, text: &str) -> Option<String> {
        self.parser
            .parse(text)
            .value()
            .map(|v| format_idr_with_symbol(v, &self.currency_symbol))
    }
}

impl GmvReader {
    fn report(&self, text: &str) -> GmvReport {
        GmvReport::new(&self.parser.parse(text), text, &self.currency_symbol)
    }
}

impl Default for GmvReader {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct TracedReport {
    #[serde(flatten)]
    report: GmvReport,
    declined: Vec<DeclinedStrategy>,
}

#[derive(Debug, PartialEq, Serialize)]
struct DeclinedStrategy {
    strategy: &'static str,
    reason: String,
}

fn declined_reasons(result: &ExtractionResult) -> Vec<DeclinedStrategy> {
    result
        .declined
        .iter()
        .map(|(strategy, reason)| DeclinedStrategy {
            strategy: strategy.name(),
            reason: reason.to_string(),
        })
        .collect()
}
