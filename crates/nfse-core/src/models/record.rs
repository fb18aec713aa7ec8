//! NFS-e record model and the fixed output column order.

use serde::{Deserialize, Serialize};

/// A field extracted from the NFS-e text layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Invoice number (Número da NFS-e).
    InvoiceNumber,
    /// Municipality where the service was rendered.
    Municipality,
    /// Two-letter state code of the municipality.
    StateCode,
    /// Service provider CNPJ (prestador).
    ProviderTaxId,
    /// Service client CNPJ (tomador).
    ClientTaxId,
    /// Verification code printed on the invoice.
    VerificationCode,
    /// PIS withholding.
    Pis,
    /// COFINS withholding.
    Cofins,
    /// Income tax (IR) withholding.
    IncomeTax,
    /// INSS withholding.
    Inss,
    /// CSLL withholding.
    Csll,
    /// Withheld ISS.
    IssWithheld,
    /// Total value of services.
    ServicesValue,
    /// Emission date, as printed.
    EmissionDate,
    /// Emission time, as printed.
    EmissionTime,
}

impl Field {
    /// Every field, in record order.
    pub const ALL: [Field; 15] = [
        Field::InvoiceNumber,
        Field::Municipality,
        Field::StateCode,
        Field::ProviderTaxId,
        Field::ClientTaxId,
        Field::VerificationCode,
        Field::Pis,
        Field::Cofins,
        Field::IncomeTax,
        Field::Inss,
        Field::Csll,
        Field::IssWithheld,
        Field::ServicesValue,
        Field::EmissionDate,
        Field::EmissionTime,
    ];

    /// Column header used in the exported spreadsheet.
    pub fn header(&self) -> &'static str {
        match self {
            Field::InvoiceNumber => "NF",
            Field::Municipality => "Município",
            Field::StateCode => "UF",
            Field::ProviderTaxId => "CNPJ Prestador",
            Field::ClientTaxId => "CNPJ Tomador",
            Field::VerificationCode => "Código de Verificação",
            Field::Pis => "PIS",
            Field::Cofins => "COFINS",
            Field::IncomeTax => "IR(R$)",
            Field::Inss => "INSS(R$)",
            Field::Csll => "CSLL(R$)",
            Field::IssWithheld => "(-) ISS Retido",
            Field::ServicesValue => "Valor dos Serviços R$",
            Field::EmissionDate => "Data da Emissão",
            Field::EmissionTime => "Hora da Emissão",
        }
    }
}

/// Outcome of extracting a single field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    /// The pattern matched and the selection rule accepted a value.
    Found(String),
    /// No usable match.
    #[default]
    NotFound,
}

impl FieldValue {
    /// Build a found value, trimming surrounding whitespace.
    pub fn found(value: &str) -> Self {
        FieldValue::Found(value.trim().to_string())
    }

    /// The extracted value, if any.
    pub fn as_found(&self) -> Option<&str> {
        match self {
            FieldValue::Found(value) => Some(value),
            FieldValue::NotFound => None,
        }
    }

    /// Whether a value was extracted.
    pub fn is_found(&self) -> bool {
        matches!(self, FieldValue::Found(_))
    }

    /// The extracted value, or `marker` when nothing was found.
    pub fn or_marker<'a>(&'a self, marker: &'a str) -> &'a str {
        self.as_found().unwrap_or(marker)
    }
}

impl From<Option<&str>> for FieldValue {
    fn from(value: Option<&str>) -> Self {
        value.map(FieldValue::found).unwrap_or_default()
    }
}

/// Cost center derived from the client CNPJ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCenter {
    /// Recognized client entity and branch code.
    Defined(u32),
    /// Client CNPJ missing, unrecognized, or malformed.
    Undefined,
}

impl CostCenter {
    /// The numeric code, if defined.
    pub fn code(&self) -> Option<u32> {
        match self {
            CostCenter::Defined(code) => Some(*code),
            CostCenter::Undefined => None,
        }
    }
}

/// One extracted NFS-e document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NfseRecord {
    /// Display name of the source file.
    pub source_name: String,

    pub invoice_number: FieldValue,
    pub municipality: FieldValue,
    pub state_code: FieldValue,
    pub provider_tax_id: FieldValue,
    pub client_tax_id: FieldValue,
    pub verification_code: FieldValue,
    pub pis: FieldValue,
    pub cofins: FieldValue,
    pub income_tax: FieldValue,
    pub inss: FieldValue,
    pub csll: FieldValue,
    pub iss_withheld: FieldValue,
    pub services_value: FieldValue,
    pub emission_date: FieldValue,
    pub emission_time: FieldValue,

    /// Set by the cost center pass once all records are collected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_center: Option<CostCenter>,
}

impl NfseRecord {
    /// Create a record with every field not found.
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            invoice_number: FieldValue::NotFound,
            municipality: FieldValue::NotFound,
            state_code: FieldValue::NotFound,
            provider_tax_id: FieldValue::NotFound,
            client_tax_id: FieldValue::NotFound,
            verification_code: FieldValue::NotFound,
            pis: FieldValue::NotFound,
            cofins: FieldValue::NotFound,
            income_tax: FieldValue::NotFound,
            inss: FieldValue::NotFound,
            csll: FieldValue::NotFound,
            iss_withheld: FieldValue::NotFound,
            services_value: FieldValue::NotFound,
            emission_date: FieldValue::NotFound,
            emission_time: FieldValue::NotFound,
            cost_center: None,
        }
    }

    /// Value of a field.
    pub fn get(&self, field: Field) -> &FieldValue {
        match field {
            Field::InvoiceNumber => &self.invoice_number,
            Field::Municipality => &self.municipality,
            Field::StateCode => &self.state_code,
            Field::ProviderTaxId => &self.provider_tax_id,
            Field::ClientTaxId => &self.client_tax_id,
            Field::VerificationCode => &self.verification_code,
            Field::Pis => &self.pis,
            Field::Cofins => &self.cofins,
            Field::IncomeTax => &self.income_tax,
            Field::Inss => &self.inss,
            Field::Csll => &self.csll,
            Field::IssWithheld => &self.iss_withheld,
            Field::ServicesValue => &self.services_value,
            Field::EmissionDate => &self.emission_date,
            Field::EmissionTime => &self.emission_time,
        }
    }

    /// Replace the value of a field.
    pub fn set(&mut self, field: Field, value: FieldValue) {
        let slot = match field {
            Field::InvoiceNumber => &mut self.invoice_number,
            Field::Municipality => &mut self.municipality,
            Field::StateCode => &mut self.state_code,
            Field::ProviderTaxId => &mut self.provider_tax_id,
            Field::ClientTaxId => &mut self.client_tax_id,
            Field::VerificationCode => &mut self.verification_code,
            Field::Pis => &mut self.pis,
            Field::Cofins => &mut self.cofins,
            Field::IncomeTax => &mut self.income_tax,
            Field::Inss => &mut self.inss,
            Field::Csll => &mut self.csll,
            Field::IssWithheld => &mut self.iss_withheld,
            Field::ServicesValue => &mut self.services_value,
            Field::EmissionDate => &mut self.emission_date,
            Field::EmissionTime => &mut self.emission_time,
        };
        *slot = value;
    }

    /// Fields that were not found, in record order.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| !self.get(*field).is_found())
            .collect()
    }
}

/// A column of the exported spreadsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Source file name (Arquivo).
    SourceName,
    /// Derived cost center (Centro de Custo).
    CostCenter,
    /// An extracted field.
    Field(Field),
}

impl Column {
    /// Header text for this column.
    pub fn header(&self) -> &'static str {
        match self {
            Column::SourceName => "Arquivo",
            Column::CostCenter => "Centro de Custo",
            Column::Field(field) => field.header(),
        }
    }
}

/// Output column order of the exported spreadsheet.
pub const COLUMNS: [Column; 17] = [
    Column::SourceName,
    Column::Field(Field::InvoiceNumber),
    Column::CostCenter,
    Column::Field(Field::Municipality),
    Column::Field(Field::StateCode),
    Column::Field(Field::ProviderTaxId),
    Column::Field(Field::ClientTaxId),
    Column::Field(Field::VerificationCode),
    Column::Field(Field::Pis),
    Column::Field(Field::Cofins),
    Column::Field(Field::IncomeTax),
    Column::Field(Field::Inss),
    Column::Field(Field::Csll),
    Column::Field(Field::IssWithheld),
    Column::Field(Field::ServicesValue),
    Column::Field(Field::EmissionDate),
    Column::Field(Field::EmissionTime),
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_record_is_all_not_found() {
        let record = NfseRecord::new("nota.pdf");
        assert_eq!(record.source_name, "nota.pdf");
        assert_eq!(record.missing_fields(), Field::ALL.to_vec());
        assert_eq!(record.cost_center, None);
    }

    #[test]
    fn test_set_and_get() {
        let mut record = NfseRecord::new("nota.pdf");
        record.set(Field::Csll, FieldValue::found(" 12,50 "));
        assert_eq!(record.get(Field::Csll), &FieldValue::Found("12,50".to_string()));
        assert_eq!(record.csll.as_found(), Some("12,50"));
        assert!(!record.missing_fields().contains(&Field::Csll));
    }

    #[test]
    fn test_column_headers_in_order() {
        let headers: Vec<&str> = COLUMNS.iter().map(Column::header).collect();
        assert_eq!(
            headers,
            vec![
                "Arquivo",
                "NF",
                "Centro de Custo",
                "Município",
                "UF",
                "CNPJ Prestador",
                "CNPJ Tomador",
                "Código de Verificação",
                "PIS",
                "COFINS",
                "IR(R$)",
                "INSS(R$)",
                "CSLL(R$)",
                "(-) ISS Retido",
                "Valor dos Serviços R$",
                "Data da Emissão",
                "Hora da Emissão",
            ]
        );
    }

    #[test]
    fn test_every_field_has_a_column() {
        for field in Field::ALL {
            assert!(COLUMNS.contains(&Column::Field(field)), "{field:?} missing");
        }
    }

    #[test]
    fn test_or_marker() {
        assert_eq!(FieldValue::NotFound.or_marker("Não encontrado"), "Não encontrado");
        assert_eq!(FieldValue::found("123").or_marker("Não encontrado"), "123");
        assert_eq!(FieldValue::from(None), FieldValue::NotFound);
    }
}
