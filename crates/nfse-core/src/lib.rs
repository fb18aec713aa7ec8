//! Core library for NFS-e (Brazilian electronic service invoice) processing.
//!
//! This crate provides:
//! - PDF text-layer extraction
//! - Pattern-based field extraction (invoice number, CNPJs, location, taxes, emission)
//! - Cost center classification from the client CNPJ
//! - XLSX export of the collected records

pub mod error;
pub mod export;
pub mod invoice;
pub mod models;
pub mod pdf;

pub use error::{ExportError, NfseError, PdfError, Result};
pub use export::{CellValue, XlsxExporter};
pub use invoice::{ExtractionResult, NfseExtractor, NfseParser};
pub use invoice::rules::cost_center::{classify, classify_records, CostCenterClassifier};
pub use models::config::NfseConfig;
pub use models::record::{Column, CostCenter, Field, FieldValue, NfseRecord, COLUMNS};
pub use pdf::{PdfContent, PdfExtractor, PdfProcessor};
