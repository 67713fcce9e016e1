//! `.xlsx`-family workbooks: calamine on the way in, rust_xlsxwriter on the way out.
//!
//! Only the first worksheet is read. The written workbook is a presentation
//! artifact: styling carries no meaning when the file is imported again.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, XlsxError};

use super::{DATE_COLUMN, DateCell, EVENT_COLUMN, ExportSheet, SheetRow};
use crate::error::{TimelineError, TimelineResult};

const SHEET_NAME: &str = "Timeline";
const DATE_COLUMN_WIDTH: f64 = 20.0;
const EVENT_COLUMN_WIDTH: f64 = 50.0;
const HEADER_FILL: u32 = 0x2C3E50;
const HEADER_BORDER: u32 = 0x000000;
const CELL_BORDER: u32 = 0xCCCCCC;

pub fn read_rows<P: AsRef<Path>>(path: P) -> TimelineResult<Vec<SheetRow>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| TimelineError::validation("Workbook contains no worksheets"))??;

    let mut lines = range.rows();
    let Some(header) = lines.next() else {
        return Ok(Vec::new());
    };
    let date_idx = column_index(header, DATE_COLUMN);
    let event_idx = column_index(header, EVENT_COLUMN);

    let mut rows = Vec::new();
    for line in lines {
        if line.iter().all(is_blank) {
            continue;
        }
        rows.push(SheetRow {
            date: date_idx.and_then(|idx| line.get(idx)).and_then(date_cell),
            event: event_idx.and_then(|idx| line.get(idx)).and_then(text_cell),
        });
    }
    tracing::debug!(rows = rows.len(), "read workbook rows");
    Ok(rows)
}

fn column_index(header: &[Data], name: &str) -> Option<usize> {
    header
        .iter()
        .position(|cell| matches!(cell, Data::String(s) if s.trim() == name))
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.is_empty(),
        _ => false,
    }
}

fn date_cell(cell: &Data) -> Option<DateCell> {
    match cell {
        Data::Empty => None,
        Data::String(s) | Data::DateTimeIso(s) => super::non_empty(s).map(DateCell::Text),
        Data::Float(serial) => Some(DateCell::Serial(*serial)),
        Data::Int(serial) => Some(DateCell::Serial(*serial as f64)),
        Data::DateTime(value) => Some(DateCell::Serial(value.as_f64())),
        other => Some(DateCell::Text(other.to_string())),
    }
}

fn text_cell(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => super::non_empty(s),
        other => super::non_empty(&other.to_string()),
    }
}

fn build_workbook(sheet: &ExportSheet) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;
    worksheet.set_column_width(0, DATE_COLUMN_WIDTH)?;
    worksheet.set_column_width(1, EVENT_COLUMN_WIDTH)?;

    let header = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(HEADER_BORDER));
    for (col, title) in ExportSheet::HEADER.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header)?;
    }

    for (idx, (row, [date, event])) in sheet.rows().iter().zip(sheet.records()).enumerate() {
        let cell = Format::new()
            .set_font_color(Color::RGB(row.color.value()))
            .set_align(FormatAlign::Left)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin)
            .set_border_color(Color::RGB(CELL_BORDER));
        let row_num = (idx + 1) as u32;
        worksheet.write_string_with_format(row_num, 0, date, &cell)?;
        worksheet.write_string_with_format(row_num, 1, event, &cell)?;
    }

    Ok(workbook)
}

pub fn write_workbook<P: AsRef<Path>>(sheet: &ExportSheet, path: P) -> TimelineResult<()> {
    let mut workbook = build_workbook(sheet)?;
    workbook.save(path.as_ref())?;
    Ok(())
}

pub fn workbook_bytes(sheet: &ExportSheet) -> TimelineResult<Vec<u8>> {
    let mut workbook = build_workbook(sheet)?;
    Ok(workbook.save_to_buffer()?)
}
