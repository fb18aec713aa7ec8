//! Tax and withholding amounts.
//!
//! Amounts are kept as the decimal-formatted strings printed on the invoice
//! (e.g. `1.234,56`); they are not parsed into numbers.

use regex::Regex;

use super::{ExtractionMatch, FieldExtractor, LabeledExtractor};
use super::patterns::{COFINS, CSLL, INCOME_TAX, INSS, ISS_WITHHELD, PIS, SERVICES_VALUE};
use crate::models::record::Field;

/// Fields holding an amount, in record order.
pub const AMOUNT_FIELDS: [Field; 7] = [
    Field::Pis,
    Field::Cofins,
    Field::IncomeTax,
    Field::Inss,
    Field::Csll,
    Field::IssWithheld,
    Field::ServicesValue,
];

/// Amounts extracted from an invoice. Each is the first labeled match.
#[derive(Debug, Clone, Default)]
pub struct TaxAmounts {
    pub pis: Option<ExtractionMatch<String>>,
    pub cofins: Option<ExtractionMatch<String>>,
    pub income_tax: Option<ExtractionMatch<String>>,
    pub inss: Option<ExtractionMatch<String>>,
    pub csll: Option<ExtractionMatch<String>>,
    pub iss_withheld: Option<ExtractionMatch<String>>,
    pub services_value: Option<ExtractionMatch<String>>,
}

impl TaxAmounts {
    /// Amount for a field; `None` for non-amount fields or missing amounts.
    pub fn get(&self, field: Field) -> Option<&ExtractionMatch<String>> {
        match field {
            Field::Pis => self.pis.as_ref(),
            Field::Cofins => self.cofins.as_ref(),
            Field::IncomeTax => self.income_tax.as_ref(),
            Field::Inss => self.inss.as_ref(),
            Field::Csll => self.csll.as_ref(),
            Field::IssWithheld => self.iss_withheld.as_ref(),
            Field::ServicesValue => self.services_value.as_ref(),
            _ => None,
        }
    }
}

/// Extract all tax amounts from invoice text.
pub fn extract_amounts(text: &str) -> TaxAmounts {
    let first = |pattern: &'static Regex| LabeledExtractor::new(pattern).extract(text);

    TaxAmounts {
        pis: first(&*PIS),
        cofins: first(&*COFINS),
        income_tax: first(&*INCOME_TAX),
        inss: first(&*INSS),
        csll: first(&*CSLL),
        iss_withheld: first(&*ISS_WITHHELD),
        services_value: first(&*SERVICES_VALUE),
    }
}
