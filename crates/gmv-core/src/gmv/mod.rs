//! GMV extraction from livestream dashboard text.

mod parser;
pub mod rules;

pub use parser::{ExtractionResult, GmvParser};

use std::path::Path;

use rust_decimal::Decimal;

use crate::error::ExtractionError;
use crate::ocr::TextRecognizer;

use rules::ExtractionMatch;

/// Trait for GMV extractors.
pub trait GmvExtractor {
    /// Run the extraction and report which strategies declined.
    fn parse(&self, text: &str) -> ExtractionResult;

    /// Extract the GMV value, `None` when nothing trustworthy was found.
    fn extract(&self, text: &str) -> Option<Decimal> {
        self.parse(text).value()
    }

    /// Extract the GMV match, failing with [`ExtractionError::ExtractionFailed`].
    fn try_extract(&self, text: &str) -> Result<ExtractionMatch<Decimal>, ExtractionError> {
        self.parse(text).into_match()
    }

    /// Recognize the screenshot's text, then extract from it.
    ///
    /// Recognition failures are errors; an unreadable figure is not.
    fn extract_from_image<R>(&self, recognizer: &R, image: &Path) -> crate::Result<ExtractionResult>
    where
        R: TextRecognizer + ?Sized,
    {
        let text = recognizer.recognize(image)?;
        Ok(self.parse(&text))
    }
}
