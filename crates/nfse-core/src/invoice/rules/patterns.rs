//! Label patterns for NFS-e field extraction.
//!
//! All patterns are case-sensitive, allow free whitespace between label and
//! value, and may span line breaks.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Municipality and state code of the service location
    pub static ref LOCATION: Regex = Regex::new(
        r"(?s)Local da Prestação[\s:]*([\w\s]+)-\s*([A-Z]{2})"
    ).unwrap();

    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"(?s)Número da\s*NFS-e[\s:]*(\d+)"
    ).unwrap();

    // Shared by provider and client; told apart by prefix
    pub static ref CNPJ: Regex = Regex::new(
        r"(?s)CNPJ/CPF[\s:]*([\d./-]+)"
    ).unwrap();

    pub static ref VERIFICATION_CODE: Regex = Regex::new(
        r"(?s)Código de Verificação[\s:]*(\d+)"
    ).unwrap();

    // Tax and withholding amounts (Brazilian format: 1.234,56)
    pub static ref PIS: Regex = Regex::new(
        r"(?s)PIS[\s:]*([\d.,]+)"
    ).unwrap();

    pub static ref COFINS: Regex = Regex::new(
        r"(?s)COFINS[\s:]*([\d.,]+)"
    ).unwrap();

    pub static ref INCOME_TAX: Regex = Regex::new(
        r"(?s)IR\(R\$\)[\s:]*([\d.,]+)"
    ).unwrap();

    pub static ref INSS: Regex = Regex::new(
        r"(?s)INSS\(R\$\)[\s:]*([\d.,]+)"
    ).unwrap();

    pub static ref CSLL: Regex = Regex::new(
        r"(?s)CSLL\(R\$\)[\s:]*([\d.,]+)"
    ).unwrap();

    pub static ref ISS_WITHHELD: Regex = Regex::new(
        r"(?s)\(-\) ISS Retido[\s:]*([\d.,]+)"
    ).unwrap();

    pub static ref SERVICES_VALUE: Regex = Regex::new(
        r"(?s)Valor dos Serviços R\$[\s:]*([\d.,]+)"
    ).unwrap();

    // Emission date and time share one label
    pub static ref EMISSION: Regex = Regex::new(
        r"(?s)Data e Hora da Emissão\s*([\d/]+)\s*([\d:]+)"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_are_case_sensitive() {
        assert!(PIS.is_match("PIS: 1,00"));
        assert!(!PIS.is_match("pis: 1,00"));
    }

    #[test]
    fn test_patterns_span_line_breaks() {
        let caps = INVOICE_NUMBER.captures("Número da\nNFS-e\n 000123").unwrap();
        assert_eq!(&caps[1], "000123");
    }
}
