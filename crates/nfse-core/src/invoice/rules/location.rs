//! Service location (municipality and state code).

use super::{ExtractionMatch, FieldExtractor};
use super::patterns::LOCATION;

/// Where the service was rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Municipality name, trimmed.
    pub municipality: String,
    /// Two-letter state code.
    pub state: String,
}

/// Location field extractor.
#[derive(Default)]
pub struct LocationExtractor;

impl LocationExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for LocationExtractor {
    type Output = ExtractionMatch<Location>;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        LOCATION
            .captures_iter(text)
            .filter_map(|caps| {
                let full_match = caps.get(0)?;
                let location = Location {
                    municipality: caps.get(1)?.as_str().trim().to_string(),
                    state: caps.get(2)?.as_str().trim().to_string(),
                };
                Some(ExtractionMatch::new(location, full_match.start(), full_match.end()))
            })
            .collect()
    }
}

/// Extract the first service location from text.
pub fn extract_location(text: &str) -> Option<Location> {
    LocationExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_location() {
        let location = extract_location("Local da Prestação: São Paulo - SP").unwrap();
        assert_eq!(location.municipality, "São Paulo");
        assert_eq!(location.state, "SP");
    }

    #[test]
    fn test_location_across_lines() {
        let text = "Local da Prestação\nRio de Janeiro\n- RJ\nDiscriminação";
        let location = extract_location(text).unwrap();
        assert_eq!(location.municipality, "Rio de Janeiro");
        assert_eq!(location.state, "RJ");
    }

    #[test]
    fn test_first_location_wins() {
        let text = "Local da Prestação: Campinas - SP\nLocal da Prestação: Curitiba - PR";
        let all = LocationExtractor::new().extract_all(text);
        assert_eq!(all.len(), 2);
        assert_eq!(extract_location(text).unwrap().municipality, "Campinas");
    }

    #[test]
    fn test_lowercase_state_does_not_match() {
        assert!(extract_location("Local da Prestação: Santos - sp").is_none());
    }
}
