use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::json;
use tempfile::Builder;
use timeline_tool::spreadsheet::{delimited, workbook};
use timeline_tool::{
    CONFERENCE_COLOR, Model, TimelineError, color_for, export_model, export_spreadsheet_file,
    import_spreadsheet_file, load_config,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn two_program_model() -> Model {
    let doc = json!({
        "programs": [
            {
                "id": "neurips",
                "name": "NeurIPS",
                "timePoints": [
                    { "id": "abs", "name": "Abstract", "date": "2025-05-01" },
                    { "id": "full", "name": "Full Paper", "date": "2025-05-15" }
                ],
                "conference": { "name": "NeurIPS 2025", "date": "2025-12-02" }
            },
            {
                "id": "iclr",
                "name": "ICLR",
                "timePoints": [{ "id": "abs", "name": "Abstract", "date": "2025-09-20" }]
            }
        ]
    });
    load_config(&doc).unwrap()
}

fn out_of_order_model() -> Model {
    let doc = json!({
        "programs": [
            {
                "id": "aaai",
                "name": "AAAI",
                "timePoints": [
                    { "id": "full", "name": "Full Paper", "date": "2025-08-15" },
                    { "id": "abs", "name": "Abstract", "date": "2025-08-01" },
                    { "id": "rebuttal", "name": "Rebuttal - Phase 1", "date": "2025-10-02" }
                ]
            },
            {
                "id": "cvpr",
                "name": "CVPR",
                "timePoints": [
                    { "id": "reg", "name": "Registration", "date": "2025-11-07" },
                    { "id": "sub", "name": "Submission", "date": "2025-11-01" }
                ],
                "conference": { "name": "CVPR 2026", "date": "2026-06-03" }
            }
        ]
    });
    load_config(&doc).unwrap()
}

fn event_triples(model: &Model) -> BTreeSet<(String, String, NaiveDateTime)> {
    model
        .programs()
        .iter()
        .flat_map(|program| {
            program
                .time_points()
                .iter()
                .map(|tp| (program.name().to_string(), tp.name.clone(), tp.date))
        })
        .collect()
}

#[test]
fn flattens_programs_in_order_with_trailing_conference() {
    let sheet = export_model(&two_program_model());
    let records: Vec<_> = sheet.records().collect();
    assert_eq!(
        records,
        vec![
            ["May 1, 2025".to_string(), "NeurIPS - Abstract".to_string()],
            ["May 15, 2025".to_string(), "NeurIPS - Full Paper".to_string()],
            ["September 20, 2025".to_string(), "ICLR - Abstract".to_string()],
            ["October 20, 2025".to_string(), "Conference".to_string()],
        ]
    );
}

#[test]
fn rows_carry_program_and_conference_colors() {
    let sheet = export_model(&two_program_model());
    let colors: Vec<_> = sheet.rows().iter().map(|r| r.color).collect();
    assert_eq!(
        colors,
        vec![color_for(0), color_for(0), color_for(1), CONFERENCE_COLOR]
    );
}

#[test]
fn only_the_last_programs_conference_is_written() {
    let sheet = export_model(&two_program_model());
    let conferences: Vec<_> = sheet
        .rows()
        .iter()
        .filter(|r| r.event == "Conference")
        .collect();
    assert_eq!(conferences.len(), 1);
    assert_eq!(conferences[0].date, d(2025, 10, 20));
}

#[test]
fn empty_model_exports_no_rows() {
    let sheet = export_model(&Model::default());
    assert!(sheet.rows().is_empty());
}

#[test]
fn csv_output_starts_with_header() {
    let sheet = export_model(&two_program_model());
    let mut buffer = Vec::new();
    delimited::write_rows(&sheet, &mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("DATE,EVENT"));
    assert_eq!(lines.next(), Some("\"May 1, 2025\",NeurIPS - Abstract"));
}

#[test]
fn csv_export_imports_back_with_same_dates() {
    let model = two_program_model();
    let tmp = Builder::new().suffix(".csv").tempfile().unwrap();
    export_spreadsheet_file(&model, tmp.path()).unwrap();

    let reimported = import_spreadsheet_file(tmp.path()).unwrap().model;
    let names: Vec<_> = reimported.programs().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["NeurIPS", "ICLR"]);
    let iclr = reimported.program("iclr").unwrap();
    assert_eq!(iclr.time_points()[0].date, d(2025, 9, 20));
    assert_eq!(iclr.conference().unwrap().date, d(2025, 10, 20));
}

#[test]
fn xlsx_export_imports_back_with_same_rows() {
    let model = two_program_model();
    let tmp = Builder::new().suffix(".xlsx").tempfile().unwrap();
    export_spreadsheet_file(&model, tmp.path()).unwrap();

    let rows = workbook::read_rows(tmp.path()).unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[3].event.as_deref(), Some("Conference"));

    let reimported = import_spreadsheet_file(tmp.path()).unwrap().model;
    let neurips = reimported.program("neurips").unwrap();
    let dates: Vec<_> = neurips.time_points().iter().map(|tp| tp.date).collect();
    assert_eq!(dates, vec![d(2025, 5, 1), d(2025, 5, 15)]);
}

#[test]
fn workbook_bytes_are_a_zip_container() {
    let sheet = export_model(&two_program_model());
    let bytes = workbook::workbook_bytes(&sheet).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn legacy_workbook_extensions_cannot_be_written() {
    let tmp = Builder::new().suffix(".xls").tempfile().unwrap();
    let err = export_spreadsheet_file(&two_program_model(), tmp.path()).unwrap_err();
    assert!(matches!(err, TimelineError::UnsupportedFormat(_)));
}

#[test]
fn round_trip_preserves_every_event_triple() {
    let model = out_of_order_model();
    for suffix in [".xlsx", ".csv"] {
        let tmp = Builder::new().suffix(suffix).tempfile().unwrap();
        export_spreadsheet_file(&model, tmp.path()).unwrap();
        let reimported = import_spreadsheet_file(tmp.path()).unwrap().model;

        assert_eq!(event_triples(&reimported), event_triples(&model), "{suffix}");
        assert_eq!(
            reimported.last_program().unwrap().conference().unwrap().date,
            d(2026, 6, 3),
            "{suffix}"
        );
    }
}
