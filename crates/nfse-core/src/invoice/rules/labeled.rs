//! Single-value labeled fields (invoice number, verification code, amounts).

use regex::Regex;

use super::{ExtractionMatch, FieldExtractor};
use super::patterns::{INVOICE_NUMBER, VERIFICATION_CODE};

/// Extractor for a label followed by one captured value.
///
/// The pattern's first capture group is the value; it is trimmed.
pub struct LabeledExtractor {
    pattern: &'static Regex,
}

impl LabeledExtractor {
    /// Create an extractor over a static label pattern.
    pub fn new(pattern: &'static Regex) -> Self {
        Self { pattern }
    }

    /// Invoice number extractor (Número da NFS-e).
    pub fn invoice_number() -> Self {
        Self::new(&INVOICE_NUMBER)
    }

    /// Verification code extractor (Código de Verificação).
    pub fn verification_code() -> Self {
        Self::new(&VERIFICATION_CODE)
    }
}

impl FieldExtractor for LabeledExtractor {
    type Output = ExtractionMatch<String>;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let full_match = caps.get(0)?;
                let value = caps.get(1)?;
                Some(ExtractionMatch::new(
                    value.as_str().trim().to_string(),
                    full_match.start(),
                    full_match.end(),
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_number() {
        let text = "Prefeitura de São Paulo\nNúmero da NFS-e\n00004567\nData e Hora";
        let result = LabeledExtractor::invoice_number().extract(text);
        assert_eq!(result.map(|m| m.value), Some("00004567".to_string()));
    }

    #[test]
    fn test_verification_code_takes_first_match() {
        let text = "Código de Verificação: 1111\n...\nCódigo de Verificação: 2222";
        let extractor = LabeledExtractor::verification_code();

        let all = extractor.extract_all(text);
        assert_eq!(all.len(), 2);
        assert_eq!(extractor.extract(text).unwrap().value, "1111");
        assert!(all[0].position.0 < all[1].position.0);
    }

    #[test]
    fn test_missing_label() {
        assert!(LabeledExtractor::invoice_number().extract("Nota fiscal").is_none());
    }
}
