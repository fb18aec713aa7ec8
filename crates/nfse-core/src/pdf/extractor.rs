//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, trace};

use super::{join_pages, PdfProcessor, Result};
use crate::error::PdfError;

/// Below this many non-whitespace characters a document is treated as having
/// no text layer (typically a scan).
const MIN_TEXT_LAYER_CHARS: usize = 20;

/// PDF text extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

/// Extracted text content from a PDF.
#[derive(Debug, Clone)]
pub struct PdfContent {
    /// Text of each page (1-indexed page `n` is `pages[n - 1]`).
    pub pages: Vec<String>,
    /// Non-empty page texts joined with a newline.
    pub text: String,
}

impl PdfContent {
    /// Whether the document carries a usable text layer.
    pub fn has_text_layer(&self) -> bool {
        self.text.chars().filter(|c| !c.is_whitespace()).count() >= MIN_TEXT_LAYER_CHARS
    }
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Load a PDF from bytes and extract all of its text.
    pub fn from_bytes(data: &[u8]) -> Result<PdfContent> {
        let mut extractor = Self::new();
        extractor.load(data)?;
        extractor.extract_all()
    }

    /// Extract the text of every page of the loaded document.
    pub fn extract_all(&self) -> Result<PdfContent> {
        let pages = self.extract_page_texts()?;
        let text = join_pages(&pages);

        debug!(
            "PDF text: {} pages, {} chars",
            pages.len(),
            text.len()
        );

        Ok(PdfContent { pages, text })
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

            // pdf-extract needs the decrypted bytes
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

    fn extract_page_texts(&self) -> Result<Vec<String>> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }

        // pdf-extract panics on some malformed font and content streams
        let data = self.raw_data.as_slice();
        let pages = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(data))
            .map_err(|_| PdfError::TextExtraction("text extractor panicked".to_string()))?
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        for (index, page) in pages.iter().enumerate() {
            trace!("Page {}: {} chars", index + 1, page.len());
        }

        Ok(pages)
    }
}
