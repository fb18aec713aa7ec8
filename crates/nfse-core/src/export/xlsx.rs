//! XLSX writer for the extracted record table.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::{debug, info};

use super::CellValue;
use crate::error::ExportError;
use crate::models::config::OutputConfig;
use crate::models::record::{Column, CostCenter, NfseRecord, COLUMNS};

/// Maximum rows in one worksheet, header included.
const MAX_ROWS: usize = 1_048_576;

/// Writes records into a single-sheet XLSX table.
///
/// Columns follow [`COLUMNS`]. Not-found fields and undefined cost centers are
/// written as their marker strings; a defined cost center is a number. Records
/// that were never classified are written as undefined.
pub struct XlsxExporter {
    sheet_name: String,
    not_found_marker: String,
    undefined_marker: String,
}

impl XlsxExporter {
    /// Create an exporter with the default sheet name and markers.
    pub fn new() -> Self {
        Self::from_config(&OutputConfig::default())
    }

    /// Create an exporter from configuration.
    pub fn from_config(config: &OutputConfig) -> Self {
        Self {
            sheet_name: config.sheet_name.clone(),
            not_found_marker: config.not_found_marker.clone(),
            undefined_marker: config.undefined_marker.clone(),
        }
    }

    /// Cell values of one record, in column order.
    pub fn record_row(&self, record: &NfseRecord) -> Vec<CellValue> {
        COLUMNS
            .iter()
            .map(|column| match column {
                Column::SourceName => CellValue::Text(record.source_name.clone()),
                Column::CostCenter => match record.cost_center.unwrap_or(CostCenter::Undefined) {
                    CostCenter::Defined(code) => CellValue::Number(f64::from(code)),
                    CostCenter::Undefined => CellValue::Text(self.undefined_marker.clone()),
                },
                Column::Field(field) => CellValue::Text(
                    record.get(*field).or_marker(&self.not_found_marker).to_string(),
                ),
            })
            .collect()
    }

    /// Write the records to `path`, replacing any existing file.
    pub fn write(&self, records: &[NfseRecord], path: &Path) -> Result<(), ExportError> {
        let mut workbook = self.build(records)?;
        workbook.save(path)?;

        info!("Wrote {} records to {}", records.len(), path.display());
        Ok(())
    }

    /// Render the records as XLSX bytes.
    pub fn to_buffer(&self, records: &[NfseRecord]) -> Result<Vec<u8>, ExportError> {
        let mut workbook = self.build(records)?;
        Ok(workbook.save_to_buffer()?)
    }

    fn build(&self, records: &[NfseRecord]) -> Result<Workbook, ExportError> {
        if records.is_empty() {
            return Err(ExportError::NoRecords);
        }
        if records.len() >= MAX_ROWS {
            return Err(ExportError::TooManyRows(records.len()));
        }

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        self.write_header(worksheet)?;

        for (index, record) in records.iter().enumerate() {
            let row = (index + 1) as u32;
            for (col, cell) in self.record_row(record).iter().enumerate() {
                let col = col as u16;
                match cell {
                    CellValue::Text(text) => worksheet.write_string(row, col, text)?,
                    CellValue::Number(number) => worksheet.write_number(row, col, *number)?,
                };
            }
        }

        worksheet.autofit();
        debug!("Built worksheet {:?} with {} rows", self.sheet_name, records.len());

        Ok(workbook)
    }

    fn write_header(&self, worksheet: &mut Worksheet) -> Result<(), ExportError> {
        let bold = Format::new().set_bold();
        for (col, column) in COLUMNS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, column.header(), &bold)?;
        }
        worksheet.set_freeze_panes(1, 0)?;
        Ok(())
    }
}

impl Default for XlsxExporter {
    fn default() -> Self {
        Self::new()
    }
}
