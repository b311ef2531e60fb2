//! Core library for visa document field extraction.
//!
//! This crate provides:
//! - First-page PDF text extraction
//! - Arabic reshaping and bidirectional reordering of mixed-script text
//! - Rule-based extraction of visa fields (nationality, passport and visa
//!   numbers, validity dates, duration of stay, entry type)
//! - Per-batch processing with order-preserving parallelism

pub mod batch;
pub mod error;
pub mod extract;
pub mod models;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod text;

pub use batch::{Batch, BatchEntry, BatchOutcome, SourceDocument};
pub use error::{ExtractionError, PdfError, Result, VisaError};
pub use extract::{document_name, ExtractionResult, VisaExtractor, VisaParser};
pub use models::{EmptyDocumentPolicy, EntryType, SheetFormat, VisaConfig, VisaRecord};
#[cfg(feature = "pdf")]
pub use pdf::{read_first_page, PdfExtractor, PdfProcessor};
pub use text::TextNormalizer;
