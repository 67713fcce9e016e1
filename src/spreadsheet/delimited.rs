use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use super::{DATE_COLUMN, DateCell, EVENT_COLUMN, ExportSheet, SheetRow};
use crate::error::TimelineResult;

pub fn read_rows<P: AsRef<Path>>(path: P) -> TimelineResult<Vec<SheetRow>> {
    let file = File::open(path)?;
    read_rows_from_reader(file)
}

pub fn read_rows_from_reader<R: Read>(input: R) -> TimelineResult<Vec<SheetRow>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let headers = reader.headers()?.clone();
    let date_idx = headers.iter().position(|h| h.trim() == DATE_COLUMN);
    let event_idx = headers.iter().position(|h| h.trim() == EVENT_COLUMN);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(SheetRow {
            date: date_idx
                .and_then(|idx| record.get(idx))
                .and_then(super::non_empty)
                .map(DateCell::Text),
            event: event_idx
                .and_then(|idx| record.get(idx))
                .and_then(super::non_empty),
        });
    }
    Ok(rows)
}

pub fn write_rows<W: Write>(sheet: &ExportSheet, output: W) -> TimelineResult<()> {
    let mut writer = csv::Writer::from_writer(output);
    writer.write_record(ExportSheet::HEADER)?;
    for record in sheet.records() {
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_rows_to_file<P: AsRef<Path>>(sheet: &ExportSheet, path: P) -> TimelineResult<()> {
    let file = File::create(path)?;
    write_rows(sheet, file)
}
