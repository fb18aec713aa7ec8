//! NFS-e parser applying the label rules to a document's text layer.

use std::fs;
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::config::NfseConfig;
use crate::pdf::PdfExtractor;
use crate::models::record::{Field, FieldValue, NfseRecord};

use super::rules::{
    amounts::{extract_amounts, AMOUNT_FIELDS},
    cnpj::{select_by_prefix, CnpjExtractor},
    emission::extract_emission,
    labeled::LabeledExtractor,
    location::extract_location,
    FieldExtractor,
};
use super::NfseExtractor;

/// Result of parsing one document.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted record (cost center not yet assigned).
    pub record: NfseRecord,
    /// Fields that were not found.
    pub missing_fields: Vec<Field>,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Rule-based NFS-e parser.
pub struct NfseParser {
    /// CNPJ prefix of the service provider.
    provider_prefix: String,
    /// CNPJ prefixes of the recognized clients.
    client_prefixes: Vec<String>,
}

impl NfseParser {
    /// Create a parser with the default prefixes.
    pub fn new() -> Self {
        Self::from_config(&NfseConfig::default())
    }

    /// Create a parser from configuration.
    pub fn from_config(config: &NfseConfig) -> Self {
        Self {
            provider_prefix: config.extraction.provider_prefix.clone(),
            client_prefixes: config.cost_center.client_prefixes(),
        }
    }

    /// Set the provider CNPJ prefix.
    pub fn with_provider_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.provider_prefix = prefix.into();
        self
    }

    /// Set the recognized client CNPJ prefixes.
    pub fn with_client_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.client_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Parse one document.
    pub fn parse(&self, text: &str, source_name: &str) -> ExtractionResult {
        let start = Instant::now();
        let mut warnings = Vec::new();
        let mut record = NfseRecord::new(source_name);

        info!("Parsing {} from {} characters of text", source_name, text.len());

        if let Some(location) = extract_location(text) {
            record.municipality = FieldValue::found(&location.municipality);
            record.state_code = FieldValue::found(&location.state);
        }

        let cnpjs = CnpjExtractor::new().extract_all(text);
        let provider = select_by_prefix(&cnpjs, std::slice::from_ref(&self.provider_prefix));
        let client = select_by_prefix(&cnpjs, self.client_prefixes.as_slice());
        record.provider_tax_id = provider.map(|m| m.value.as_str()).into();
        record.client_tax_id = client.map(|m| m.value.as_str()).into();

        // The provider block is printed above the client block
        if let (Some(provider), Some(client)) = (provider, client) {
            if client.position.0 < provider.position.0 {
                warnings.push(format!(
                    "client CNPJ {} appears before provider CNPJ {}",
                    client.value, provider.value
                ));
            }
        }

        if !cnpjs.is_empty() {
            if !record.provider_tax_id.is_found() {
                warnings.push(format!(
                    "{} CNPJ/CPF values found, none with provider prefix {}",
                    cnpjs.len(),
                    self.provider_prefix
                ));
            }
            if !record.client_tax_id.is_found() {
                warnings.push(format!(
                    "{} CNPJ/CPF values found, none with a client prefix ({})",
                    cnpjs.len(),
                    self.client_prefixes.join(", ")
                ));
            }
        }

        record.invoice_number = LabeledExtractor::invoice_number()
            .extract(text)
            .map(|m| FieldValue::found(&m.value))
            .unwrap_or_default();

        record.verification_code = LabeledExtractor::verification_code()
            .extract(text)
            .map(|m| FieldValue::found(&m.value))
            .unwrap_or_default();

        let amounts = extract_amounts(text);
        for field in AMOUNT_FIELDS {
            let value = amounts.get(field).map(|m| m.value.as_str());
            record.set(field, value.into());
        }

        if let Some(emission) = extract_emission(text) {
            record.emission_date = FieldValue::found(&emission.date);
            record.emission_time = FieldValue::found(&emission.time);
        }

        let missing_fields = record.missing_fields();

        debug!(
            "Extracted {} with {} of {} fields missing",
            source_name,
            missing_fields.len(),
            Field::ALL.len()
        );

        ExtractionResult {
            record,
            missing_fields,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }

    /// Parse a PDF held in memory.
    pub fn parse_pdf(&self, data: &[u8], source_name: &str) -> Result<ExtractionResult> {
        let content = PdfExtractor::from_bytes(data)?;

        if !content.has_text_layer() {
            warn!("{} has no usable text layer, its fields will be missing", source_name);
        }

        Ok(self.parse(&content.text, source_name))
    }

    /// Read and parse a PDF file. The record is named after the file name.
    pub fn parse_file(&self, path: &Path) -> Result<ExtractionResult> {
        let source_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        debug!("Reading PDF: {}", path.display());
        let data = fs::read(path)?;

        self.parse_pdf(&data, &source_name)
    }
}

impl Default for NfseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl NfseExtractor for NfseParser {
    fn extract(&self, text: &str, source_name: &str) -> NfseRecord {
        self.parse(text, source_name).record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NfseError;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
        PREFEITURA DO MUNICÍPIO DE SÃO PAULO
        NOTA FISCAL ELETRÔNICA DE SERVIÇOS - NFS-e
        Número da
        NFS-e
        00001234
        Data e Hora da Emissão
        05/03/2024 14:32:10
        Código de Verificação
        98765432
        PRESTADOR DE SERVIÇOS
        CNPJ/CPF: 15.040.123/0001-55
        Nome/Razão Social: SERVIÇOS TÉCNICOS LTDA
        TOMADOR DE SERVIÇOS
        CNPJ/CPF: 06.626.417/0012-20
        Local da Prestação: São Paulo - SP
        INSS(R$) 0,00 IR(R$) 15,00 CSLL(R$) 10,00 COFINS 30,00 PIS 6,50
        Valor dos Serviços R$ 1.000,00
        (-) ISS Retido 20,00
    "#;

    #[test]
    fn test_parse_full_invoice() {
        let record = NfseParser::new().extract(SAMPLE, "nota_1234.pdf");

        let found = |field| record.get(field).as_found().map(str::to_string);
        assert_eq!(record.source_name, "nota_1234.pdf");
        assert_eq!(found(Field::InvoiceNumber).as_deref(), Some("00001234"));
        assert_eq!(found(Field::EmissionDate).as_deref(), Some("05/03/2024"));
        assert_eq!(found(Field::EmissionTime).as_deref(), Some("14:32:10"));
        assert_eq!(found(Field::VerificationCode).as_deref(), Some("98765432"));
        assert_eq!(found(Field::ProviderTaxId).as_deref(), Some("15.040.123/0001-55"));
        assert_eq!(found(Field::ClientTaxId).as_deref(), Some("06.626.417/0012-20"));
        assert_eq!(found(Field::Municipality).as_deref(), Some("São Paulo"));
        assert_eq!(found(Field::StateCode).as_deref(), Some("SP"));
        assert_eq!(found(Field::Inss).as_deref(), Some("0,00"));
        assert_eq!(found(Field::IncomeTax).as_deref(), Some("15,00"));
        assert_eq!(found(Field::Csll).as_deref(), Some("10,00"));
        assert_eq!(found(Field::Cofins).as_deref(), Some("30,00"));
        assert_eq!(found(Field::Pis).as_deref(), Some("6,50"));
        assert_eq!(found(Field::ServicesValue).as_deref(), Some("1.000,00"));
        assert_eq!(found(Field::IssWithheld).as_deref(), Some("20,00"));
        assert_eq!(record.cost_center, None);
    }

    #[test]
    fn test_label_free_text_is_all_not_found() {
        let parser = NfseParser::new();

        for text in ["", "Recibo de pagamento\nsem campos reconhecidos"] {
            let result = parser.parse(text, "recibo.pdf");
            assert_eq!(result.record, NfseRecord::new("recibo.pdf"));
            assert_eq!(result.missing_fields, Field::ALL.to_vec());
            assert!(result.warnings.is_empty());
        }
    }

    #[test]
    fn test_location_sample() {
        let record = NfseParser::new().extract("Local da Prestação: São Paulo - SP", "x.pdf");
        assert_eq!(record.municipality, FieldValue::Found("São Paulo".to_string()));
        assert_eq!(record.state_code, FieldValue::Found("SP".to_string()));
    }

    #[test]
    fn test_tax_ids_never_swapped() {
        // Client listed before provider
        let text = "CNPJ/CPF 04.899.000/3050-10\nCNPJ/CPF 15.040.999/0002-01";
        let record = NfseParser::new().extract(text, "x.pdf");

        assert_eq!(record.provider_tax_id.as_found(), Some("15.040.999/0002-01"));
        assert_eq!(record.client_tax_id.as_found(), Some("04.899.000/3050-10"));
    }

    #[test]
    fn test_client_before_provider_is_reported() {
        let text = "CNPJ/CPF 04.899.000/3050-10\nCNPJ/CPF 15.040.999/0002-01";
        let result = NfseParser::new().parse(text, "x.pdf");

        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("appears before provider"));
        assert!(NfseParser::new().parse(SAMPLE, "nota.pdf").warnings.is_empty());
    }

    #[test]
    fn test_parse_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let parser = NfseParser::new();

        let missing = parser.parse_file(&dir.path().join("ausente.pdf"));
        assert!(matches!(missing, Err(NfseError::Io(_))));

        let corrupt = dir.path().join("quebrado.pdf");
        fs::write(&corrupt, b"not a pdf").unwrap();
        assert!(matches!(parser.parse_file(&corrupt), Err(NfseError::Pdf(_))));
    }

    #[test]
    fn test_unrecognized_tax_ids_are_not_found() {
        let text = "CNPJ/CPF 11.111.111/0001-11\nCNPJ/CPF 22.222.222/0001-22";
        let result = NfseParser::new().parse(text, "x.pdf");

        assert_eq!(result.record.provider_tax_id, FieldValue::NotFound);
        assert_eq!(result.record.client_tax_id, FieldValue::NotFound);
        assert_eq!(result.warnings.len(), 2);
    }

    #[test]
    fn test_custom_prefixes() {
        let text = "CNPJ/CPF 11.111.111/0001-11\nCNPJ/CPF 22.222.222/0001-22";
        let record = NfseParser::new()
            .with_provider_prefix("22.222")
            .with_client_prefixes(["11.111"])
            .extract(text, "x.pdf");

        assert_eq!(record.provider_tax_id.as_found(), Some("22.222.222/0001-22"));
        assert_eq!(record.client_tax_id.as_found(), Some("11.111.111/0001-11"));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let parser = NfseParser::new();
        let first = parser.extract(SAMPLE, "nota.pdf");
        let second = parser.extract(SAMPLE, "nota.pdf");

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_partial_invoice() {
        let text = "Número da NFS-e: 77\nValor dos Serviços R$ 250,00";
        let result = NfseParser::new().parse(text, "x.pdf");

        assert_eq!(result.record.invoice_number.as_found(), Some("77"));
        assert_eq!(result.record.services_value.as_found(), Some("250,00"));
        assert_eq!(result.record.emission_date, FieldValue::NotFound);
        assert_eq!(result.missing_fields.len(), Field::ALL.len() - 2);
    }
}
