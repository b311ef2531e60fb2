//! PDF text source: plain text of a document's first page.

mod extractor;

pub use extractor::PdfExtractor;

use std::path::Path;

use tracing::debug;

use crate::batch::SourceDocument;
use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from every page, in page order.
    fn extract_pages(&self) -> Result<Vec<String>>;

    /// Extract text from a specific page (1-indexed).
    ///
    /// The default runs `extract_pages` and keeps one page, so it pays for
    /// every page. Implementations that can isolate a page should override it.
    fn extract_page_text(&self, page: u32) -> Result<String> {
        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }
        self.extract_pages()?
            .into_iter()
            .nth((page - 1) as usize)
            .ok_or(PdfError::InvalidPage(page))
    }

    /// Text of the first page, the only page visa extraction reads.
    fn first_page_text(&self) -> Result<String> {
        self.extract_page_text(1)
    }
}

/// Read a PDF from disk and materialise its first page as a batch document.
///
/// A page without a text layer becomes a document with no text, which the
/// batch reports per document instead of failing here.
pub fn read_first_page(path: &Path) -> crate::error::Result<SourceDocument> {
    let identifier = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let data = std::fs::read(path)?;
    let mut extractor = PdfExtractor::new();
    extractor.load(&data)?;

    let text = extractor.first_page_text()?;
    debug!("{}: first page has {} chars", identifier, text.chars().count());

    if text.trim().is_empty() {
        Ok(SourceDocument::without_text(identifier))
    } else {
        Ok(SourceDocument::new(identifier, text))
    }
}
