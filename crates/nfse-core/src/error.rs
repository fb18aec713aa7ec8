//! Error types for the nfse-core library.

use thiserror::Error;

/// Main error type for the nfse library.
#[derive(Error, Debug)]
pub enum NfseError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration file.
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
}

/// Errors related to writing the output spreadsheet.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The XLSX writer rejected a cell, sheet, or the final save.
    #[error("xlsx writer: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// More rows than a worksheet can hold.
    #[error("too many rows for a worksheet: {0}")]
    TooManyRows(usize),

    /// Nothing to write.
    #[error("no records to export")]
    NoRecords,
}

/// Result type for the nfse library.
pub type Result<T> = std::result::Result<T, NfseError>;
