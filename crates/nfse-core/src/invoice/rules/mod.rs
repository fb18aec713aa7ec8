//! Rule-based field extractors for NFS-e documents.

pub mod amounts;
pub mod cnpj;
pub mod cost_center;
pub mod emission;
pub mod labeled;
pub mod location;
pub mod patterns;

pub use amounts::{extract_amounts, TaxAmounts, AMOUNT_FIELDS};
pub use cnpj::{branch_code, select_by_prefix, CnpjExtractor};
pub use cost_center::{classify, classify_records, CostCenterClassifier};
pub use emission::{extract_emission, Emission, EmissionExtractor};
pub use labeled::LabeledExtractor;
pub use location::{extract_location, Location, LocationExtractor};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    /// Extract all occurrences of the field, in document order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value matched in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range of the whole match in the source text.
    pub position: (usize, usize),
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, start: usize, end: usize) -> Self {
        Self {
            value,
            position: (start, end),
        }
    }
}
