//! Visa field extraction module.

mod parser;
pub mod rules;

pub use parser::{document_name, ExtractionResult, VisaParser};

use crate::error::ExtractionError;
use crate::models::VisaRecord;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for visa field extractors.
pub trait VisaExtractor {
    /// Build a record from already normalized text.
    ///
    /// Never fails: fields that are not found are `None`.
    fn extract(&self, text: &str, identifier: &str) -> VisaRecord;

    /// Normalize raw page text, then extract.
    fn parse(&self, raw_text: &str, identifier: &str) -> Result<ExtractionResult>;
}
