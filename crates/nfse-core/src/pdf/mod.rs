//! PDF processing module.

mod extractor;

pub use extractor::{PdfContent, PdfExtractor};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract the text layer of each page, in page order.
    fn extract_page_texts(&self) -> Result<Vec<String>>;

    /// Extract the text layer of the whole document.
    ///
    /// Non-empty page texts are joined with a newline.
    fn extract_text(&self) -> Result<String> {
        Ok(join_pages(&self.extract_page_texts()?))
    }
}

/// Join page texts, skipping pages without text.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let texts: Vec<&str> = pages
        .iter()
        .map(|page| page.as_ref())
        .filter(|text| !text.is_empty())
        .collect();
    texts.join("\n")
}
