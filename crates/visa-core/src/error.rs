//! Error types for the visa-core library.

use thiserror::Error;

/// Main error type for the visa library.
#[derive(Error, Debug)]
pub enum VisaError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Whole-document extraction failures.
///
/// Individual field misses are never errors; they surface as `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The page text was empty or whitespace only.
    #[error("no extractable text in document")]
    EmptyDocument,

    /// The source had no text layer at all.
    #[error("no text layer in {identifier}")]
    NoTextLayer { identifier: String },
}

/// Result type for the visa library.
pub type Result<T> = std::result::Result<T, VisaError>;
