//! Spreadsheet export of extracted records.

mod xlsx;

pub use xlsx::XlsxExporter;

/// Value of one output cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Written as a string cell.
    Text(String),
    /// Written as a numeric cell.
    Number(f64),
}

impl CellValue {
    /// The text of a string cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            CellValue::Number(_) => None,
        }
    }
}
