//! Two-column `DATE` / `EVENT` spreadsheets.
//!
//! `EVENT` is either the literal `Conference` or `<ProgramName> - <EventName>`.
//! Rows are read from `.xlsx`-family workbooks or CSV files and written back
//! as a styled `.xlsx` workbook or a plain CSV file.

use std::path::Path;

use serde::Serialize;

use crate::dates::{self, Instant};
use crate::error::{InvalidDateError, TimelineError, TimelineResult};
use crate::model::Model;

pub mod delimited;
pub mod export;
pub mod import;
pub mod workbook;

pub use export::{ExportRow, ExportSheet, export_model};
pub use import::{SpreadsheetImport, import_rows};

pub const DATE_COLUMN: &str = "DATE";
pub const EVENT_COLUMN: &str = "EVENT";

/// Raw content of a `DATE` cell.
#[derive(Debug, Clone, PartialEq)]
pub enum DateCell {
    Text(String),
    /// Spreadsheet serial day number.
    Serial(f64),
    Instant(Instant),
}

impl DateCell {
    pub fn to_instant(&self) -> Result<Instant, InvalidDateError> {
        match self {
            DateCell::Text(text) => dates::parse_date(text),
            DateCell::Serial(serial) => dates::excel_serial_to_instant(*serial),
            DateCell::Instant(instant) => Ok(*instant),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DateCell::Text(text) => text.clone(),
            DateCell::Serial(serial) => serial.to_string(),
            DateCell::Instant(instant) => instant.to_string(),
        }
    }
}

/// One data row; `None` marks an absent or empty cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetRow {
    pub date: Option<DateCell>,
    pub event: Option<String>,
}

impl SheetRow {
    /// Builds a row from cell text, treating empty strings as missing cells.
    pub fn from_text(date: &str, event: &str) -> Self {
        Self {
            date: non_empty(date).map(DateCell::Text),
            event: non_empty(event),
        }
    }
}

/// A row dropped from an import because a required cell was missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowWarning {
    /// Spreadsheet row number, counting the header as row 1.
    pub row: usize,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Workbook,
    Csv,
}

impl SheetFormat {
    pub fn from_path(path: &Path) -> TimelineResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Ok(SheetFormat::Workbook),
            Some("csv") => Ok(SheetFormat::Csv),
            _ => Err(TimelineError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

pub fn read_rows_from_file<P: AsRef<Path>>(path: P) -> TimelineResult<Vec<SheetRow>> {
    let path = path.as_ref();
    match SheetFormat::from_path(path)? {
        SheetFormat::Workbook => workbook::read_rows(path),
        SheetFormat::Csv => delimited::read_rows(path),
    }
}

pub fn import_spreadsheet_file<P: AsRef<Path>>(path: P) -> TimelineResult<SpreadsheetImport> {
    let rows = read_rows_from_file(path)?;
    import_rows(&rows)
}

pub fn export_spreadsheet_file<P: AsRef<Path>>(model: &Model, path: P) -> TimelineResult<()> {
    let path = path.as_ref();
    let format = SheetFormat::from_path(path)?;
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    if format == SheetFormat::Workbook && !extension.eq_ignore_ascii_case("xlsx") {
        return Err(TimelineError::UnsupportedFormat(path.to_path_buf()));
    }

    let sheet = export_model(model);
    match format {
        SheetFormat::Workbook => workbook::write_workbook(&sheet, path),
        SheetFormat::Csv => delimited::write_rows_to_file(&sheet, path),
    }
}

pub(crate) fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Lowercases a program name and joins its words with `-`.
pub fn program_slug(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
