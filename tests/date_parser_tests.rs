use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use timeline_tool::{DateInput, format_long_date, parse_date};

fn d(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

#[test]
fn parses_iso_and_long_form_dates() {
    assert_eq!(parse_date("2025-01-01").unwrap(), d(2025, 1, 1));
    assert_eq!(parse_date("January 5, 2025").unwrap(), d(2025, 1, 5));
    assert_eq!(parse_date("Jan 5, 2025").unwrap(), d(2025, 1, 5));
    assert_eq!(parse_date("2025/03/09").unwrap(), d(2025, 3, 9));
    assert_eq!(parse_date("03/09/2025").unwrap(), d(2025, 3, 9));
    assert_eq!(parse_date("  2025-12-31  ").unwrap(), d(2025, 12, 31));
}

#[test]
fn keeps_time_of_day_for_naive_date_times() {
    let parsed = parse_date("2025-05-15T23:59:00").unwrap();
    assert_eq!(
        parsed,
        NaiveDate::from_ymd_opt(2025, 5, 15)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap()
    );
    let spaced = parse_date("2025-05-15 08:30").unwrap();
    assert_eq!(spaced.format("%H:%M").to_string(), "08:30");
}

#[test]
fn offset_dates_are_read_in_local_time() {
    let parsed = parse_date("2025-05-15T12:00:00Z").unwrap();
    let expected = DateTime::parse_from_rfc3339("2025-05-15T12:00:00Z")
        .unwrap()
        .with_timezone(&Local)
        .naive_local();
    assert_eq!(parsed, expected);
}

#[test]
fn timestamps_are_epoch_milliseconds() {
    let millis = 1_735_689_600_000.0; // 2025-01-01T00:00:00Z
    let expected = DateTime::from_timestamp_millis(1_735_689_600_000)
        .unwrap()
        .with_timezone(&Local)
        .naive_local();
    assert_eq!(
        parse_date(DateInput::TimestampMillis(millis)).unwrap(),
        expected
    );
}

#[test]
fn pre_parsed_instants_pass_through() {
    let instant = d(2024, 2, 29);
    assert_eq!(parse_date(instant).unwrap(), instant);
}

#[test]
fn rejects_unparseable_input() {
    for bad in ["", "   ", "not a date", "2025-13-01", "2025-02-30", "Smarch 3, 2025"] {
        let err = parse_date(bad).unwrap_err();
        assert_eq!(err.input, bad);
    }
    assert!(parse_date(DateInput::TimestampMillis(f64::NAN)).is_err());
    assert!(parse_date(DateInput::TimestampMillis(f64::INFINITY)).is_err());
    assert!(parse_date(DateInput::TimestampMillis(1e20)).is_err());
}

#[test]
fn long_form_output_parses_back_to_the_same_day() {
    let instant = d(2025, 1, 5);
    let text = format_long_date(instant);
    assert_eq!(text, "January 5, 2025");
    assert_eq!(parse_date(text.as_str()).unwrap(), instant);
}
