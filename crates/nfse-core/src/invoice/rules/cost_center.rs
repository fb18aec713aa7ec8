//! Cost center classification from the client CNPJ.
//!
//! A recognized client entity maps its branch code into a disjoint range:
//! `base + branch code + entity offset`. Anything else is undefined.

use tracing::debug;

use super::cnpj::branch_code;
use crate::models::config::{ClientEntity, CostCenterConfig};
use crate::models::record::{CostCenter, FieldValue, NfseRecord};

/// Cost center classifier.
pub struct CostCenterClassifier {
    base: u32,
    entities: Vec<ClientEntity>,
}

impl CostCenterClassifier {
    /// Create a classifier with the default entities.
    pub fn new() -> Self {
        Self::from_config(&CostCenterConfig::default())
    }

    /// Create a classifier from configuration.
    pub fn from_config(config: &CostCenterConfig) -> Self {
        Self {
            base: config.base,
            entities: config.entities.clone(),
        }
    }

    /// Classify a client CNPJ.
    pub fn classify(&self, client_tax_id: &str) -> CostCenter {
        let Some(entity) = self
            .entities
            .iter()
            .find(|e| client_tax_id.starts_with(e.prefix.as_str()))
        else {
            return CostCenter::Undefined;
        };

        let Some(branch) = branch_code(client_tax_id) else {
            debug!("No branch code in client CNPJ {:?}", client_tax_id);
            return CostCenter::Undefined;
        };

        self.base
            .checked_add(branch)
            .and_then(|code| code.checked_add(entity.offset))
            .map(CostCenter::Defined)
            .unwrap_or(CostCenter::Undefined)
    }

    /// Classify an extracted client CNPJ; not found is undefined.
    pub fn classify_value(&self, client_tax_id: &FieldValue) -> CostCenter {
        client_tax_id
            .as_found()
            .map(|cnpj| self.classify(cnpj))
            .unwrap_or(CostCenter::Undefined)
    }

    /// Assign the cost center of every record.
    pub fn classify_records(&self, records: &mut [NfseRecord]) {
        for record in records.iter_mut() {
            record.cost_center = Some(self.classify_value(&record.client_tax_id));
        }
    }
}

impl Default for CostCenterClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify a client CNPJ with the default entities.
pub fn classify(client_tax_id: &str) -> CostCenter {
    CostCenterClassifier::new().classify(client_tax_id)
}

/// Assign cost centers to all records with the default entities.
pub fn classify_records(records: &mut [NfseRecord]) {
    CostCenterClassifier::new().classify_records(records);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_entity() {
        assert_eq!(classify("06.626.417/0001-20"), CostCenter::Defined(10_001));
    }

    #[test]
    fn test_second_entity() {
        assert_eq!(classify("04.899.000/3050-10"), CostCenter::Defined(200_013_050));
    }

    #[test]
    fn test_unrecognized_prefix() {
        assert_eq!(classify("99.999.999/9999-99"), CostCenter::Undefined);
        assert_eq!(classify(""), CostCenter::Undefined);
    }

    #[test]
    fn test_recognized_prefix_without_branch() {
        assert_eq!(classify("06.626.417"), CostCenter::Undefined);
        assert_eq!(classify("04.899.000/ABCD-10"), CostCenter::Undefined);
    }

    #[test]
    fn test_not_found_is_undefined() {
        let classifier = CostCenterClassifier::new();
        assert_eq!(classifier.classify_value(&FieldValue::NotFound), CostCenter::Undefined);
    }

    #[test]
    fn test_classify_records() {
        let mut first = NfseRecord::new("a.pdf");
        first.client_tax_id = FieldValue::found("06.626.417/0012-20");
        let second = NfseRecord::new("b.pdf");

        let mut records = vec![first, second];
        classify_records(&mut records);

        assert_eq!(records[0].cost_center, Some(CostCenter::Defined(10_012)));
        assert_eq!(records[1].cost_center, Some(CostCenter::Undefined));
    }

    #[test]
    fn test_custom_entities() {
        let config = CostCenterConfig {
            base: 0,
            entities: vec![ClientEntity::new("11.222", 5)],
        };
        let classifier = CostCenterClassifier::from_config(&config);
        assert_eq!(classifier.classify("11.222.333/0100-00"), CostCenter::Defined(105));
        assert_eq!(classifier.classify("06.626.417/0001-20"), CostCenter::Undefined);
    }
}
