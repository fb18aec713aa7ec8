//! CNPJ (Brazilian entity tax ID) extraction and prefix selection.
//!
//! Provider and client CNPJs share the `CNPJ/CPF` label, so both are taken
//! from the same match list and told apart only by their leading digits. A
//! document whose parties share a prefix cannot be disambiguated.

use tracing::trace;

use super::{ExtractionMatch, FieldExtractor};
use super::patterns::CNPJ;

/// CNPJ/CPF field extractor.
#[derive(Default)]
pub struct CnpjExtractor;

impl CnpjExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for CnpjExtractor {
    type Output = ExtractionMatch<String>;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let results: Vec<_> = CNPJ
            .captures_iter(text)
            .filter_map(|caps| {
                let full_match = caps.get(0)?;
                let value = caps.get(1)?.as_str().trim().to_string();
                Some(ExtractionMatch::new(value, full_match.start(), full_match.end()))
            })
            .collect();

        trace!("Found {} CNPJ/CPF candidates", results.len());
        results
    }
}

/// First match (in document order) starting with any of `prefixes`.
pub fn select_by_prefix<'a, S: AsRef<str>>(
    matches: &'a [ExtractionMatch<String>],
    prefixes: &[S],
) -> Option<&'a ExtractionMatch<String>> {
    matches
        .iter()
        .find(|m| prefixes.iter().any(|p| m.value.starts_with(p.as_ref())))
}

/// Branch (establishment) code of a CNPJ formatted `NN.NNN.NNN/NNNN-NN`.
///
/// Takes up to four characters after the first `/`, stopping at the next
/// `/`. Returns `None` when there is no `/` or those characters are not all
/// digits.
pub fn branch_code(cnpj: &str) -> Option<u32> {
    let (_, after_slash) = cnpj.split_once('/')?;
    let segment = after_slash.split('/').next().unwrap_or(after_slash);
    let digits: String = segment.chars().take(4).collect();

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_PARTIES: &str = r#"
        PRESTADOR DE SERVIÇOS
        CNPJ/CPF: 15.040.123/0001-55
        TOMADOR DE SERVIÇOS
        CNPJ/CPF: 06.626.417/0001-20
    "#;

    #[test]
    fn test_extract_all_in_document_order() {
        let values: Vec<String> = CnpjExtractor::new()
            .extract_all(TWO_PARTIES)
            .into_iter()
            .map(|m| m.value)
            .collect();
        assert_eq!(values, vec!["15.040.123/0001-55", "06.626.417/0001-20"]);
    }

    fn selected<'a>(matches: &'a [ExtractionMatch<String>], prefixes: &[&str]) -> Option<&'a str> {
        select_by_prefix(matches, prefixes).map(|m| m.value.as_str())
    }

    #[test]
    fn test_select_by_prefix() {
        let matches = CnpjExtractor::new().extract_all(TWO_PARTIES);
        assert_eq!(selected(&matches, &["15.040"]), Some("15.040.123/0001-55"));
        assert_eq!(
            selected(&matches, &["06.626", "04.899"]),
            Some("06.626.417/0001-20")
        );
        assert_eq!(selected(&matches, &["99.999"]), None);
    }

    #[test]
    fn test_select_skips_unrecognized_leading_match() {
        let text = "CNPJ/CPF 11.111.111/0001-11 CNPJ/CPF 04.899.000/3050-10";
        let matches = CnpjExtractor::new().extract_all(text);
        let client = select_by_prefix(&matches, &["06.626", "04.899"]).unwrap();
        assert_eq!(client.value, "04.899.000/3050-10");
        assert!(client.position.0 > matches[0].position.0);
    }

    #[test]
    fn test_branch_code() {
        assert_eq!(branch_code("06.626.417/0001-20"), Some(1));
        assert_eq!(branch_code("04.899.000/3050-10"), Some(3050));
        assert_eq!(branch_code("04.899.000/12"), Some(12));
    }

    #[test]
    fn test_branch_code_malformed() {
        assert_eq!(branch_code("06.626.417"), None);
        assert_eq!(branch_code("06.626.417/"), None);
        assert_eq!(branch_code("06.626.417/00-1"), None);
    }
}
