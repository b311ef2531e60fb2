//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// PDF text extractor backed by lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    fn loaded(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or(PdfError::Parse("No document loaded".to_string()))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract reads the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_pages(&self) -> Result<Vec<String>> {
        self.loaded()?;
        pdf_extract::extract_text_from_mem_by_pages(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    /// Text of one page. Other pages are removed from a copy of the
    /// document first, so their content streams are never interpreted.
    fn extract_page_text(&self, page: u32) -> Result<String> {
        let count = self.page_count();
        if page == 0 || page > count {
            return Err(PdfError::InvalidPage(page));
        }
        let doc = self.loaded()?;

        if count == 1 {
            return text_from_mem(&self.raw_data);
        }

        let others: Vec<u32> = (1..=count).filter(|&p| p != page).collect();
        let mut single = doc.clone();
        single.delete_pages(&others);
        debug!("Isolated page {} of {}", page, count);

        let mut data = Vec::new();
        single
            .save_to(&mut data)
            .map_err(|e| PdfError::Parse(format!("Failed to save page {}: {}", page, e)))?;
        text_from_mem(&data)
    }
}

fn text_from_mem(data: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(data).map_err(|e| PdfError::TextExtraction(e.to_string()))
}
