//! Entry points that open a receipt export and reconcile it.

use std::path::Path;

use tapcheck_recon::{reconcile, HeaderNames, ReconError, Report};

use crate::csv::CsvSource;
use crate::xlsx::XlsxSource;

/// Export formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Xlsx,
    Csv,
}

impl FileKind {
    /// Extension match is case-insensitive. Anything else is rejected with
    /// the extension as given (including the dot, empty when there is none).
    pub fn from_path(path: &Path) -> Result<Self, ReconError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext.to_lowercase().as_str() {
            "xlsx" => Ok(FileKind::Xlsx),
            "csv" => Ok(FileKind::Csv),
            _ if ext.is_empty() => Err(ReconError::UnsupportedFileType(String::new())),
            _ => Err(ReconError::UnsupportedFileType(format!(".{}", ext))),
        }
    }
}

pub fn process_file(path: &Path) -> Result<Report, ReconError> {
    process_file_with(path, &HeaderNames::default())
}

pub fn process_file_with(path: &Path, names: &HeaderNames) -> Result<Report, ReconError> {
    match FileKind::from_path(path)? {
        FileKind::Xlsx => process_xlsx_with(path, names),
        FileKind::Csv => process_csv_with(path, names),
    }
}

pub fn process_csv(path: &Path) -> Result<Report, ReconError> {
    process_csv_with(path, &HeaderNames::default())
}

pub fn process_csv_with(path: &Path, names: &HeaderNames) -> Result<Report, ReconError> {
    reconcile(CsvSource::open(path)?, names)
}

pub fn process_xlsx(path: &Path) -> Result<Report, ReconError> {
    process_xlsx_with(path, &HeaderNames::default())
}

pub fn process_xlsx_with(path: &Path, names: &HeaderNames) -> Result<Report, ReconError> {
    reconcile(XlsxSource::open(path)?, names)
}
