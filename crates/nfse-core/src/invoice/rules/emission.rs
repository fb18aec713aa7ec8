//! Emission date and time.

use super::{ExtractionMatch, FieldExtractor};
use super::patterns::EMISSION;

/// Emission date and time as printed on the invoice.
///
/// Both values are kept verbatim; no calendar validation is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    pub date: String,
    pub time: String,
}

/// Emission field extractor.
#[derive(Default)]
pub struct EmissionExtractor;

impl EmissionExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for EmissionExtractor {
    type Output = ExtractionMatch<Emission>;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        EMISSION
            .captures_iter(text)
            .filter_map(|caps| {
                let full_match = caps.get(0)?;
                let emission = Emission {
                    date: caps.get(1)?.as_str().trim().to_string(),
                    time: caps.get(2)?.as_str().trim().to_string(),
                };
                Some(ExtractionMatch::new(emission, full_match.start(), full_match.end()))
            })
            .collect()
    }
}

/// Extract the first emission date/time from text.
pub fn extract_emission(text: &str) -> Option<Emission> {
    EmissionExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_emission() {
        let emission = extract_emission("Data e Hora da Emissão\n05/03/2024 14:32:10\n").unwrap();
        assert_eq!(emission.date, "05/03/2024");
        assert_eq!(emission.time, "14:32:10");
    }

    #[test]
    fn test_missing_emission() {
        assert!(extract_emission("Data da Emissão 05/03/2024").is_none());
    }
}
