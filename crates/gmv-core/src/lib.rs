//! Core library for livestream GMV extraction.
//!
//! This crate provides:
//! - Indonesian number parsing (`1.234.567`, `1.234,56`) and K/M/B expansion
//! - A fixed-priority cascade of extraction strategies over OCR text
//! - Serializable reports and configuration for the host application
//! - A recognizer seam for plugging in an external OCR engine

pub mod error;
pub mod gmv;
pub mod models;
pub mod ocr;

pub use error::{ExtractionError, GmvError, RecognitionError, Result};
pub use gmv::rules::{format_idr_amount, parse_idr_number, ExtractionMatch, Magnitude, Strategy};
pub use gmv::{ExtractionResult, GmvExtractor, GmvParser};
pub use models::config::GmvConfig;
pub use models::report::GmvReport;
pub use ocr::{RetryingRecognizer, TextRecognizer};
