//! NFS-e field extraction module.

mod parser;
pub mod rules;

pub use parser::{ExtractionResult, NfseParser};

use crate::models::record::NfseRecord;

/// Trait for NFS-e field extractors.
///
/// Extraction never fails: fields without a usable match are reported as
/// not found in the returned record.
pub trait NfseExtractor {
    /// Extract a record from the plain text of one document.
    fn extract(&self, text: &str, source_name: &str) -> NfseRecord;
}
