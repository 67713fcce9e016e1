//! Parsing of the loosely-typed date values found in config documents and
//! spreadsheet cells.
//!
//! Every accepted input becomes an [`Instant`]: a wall-clock date and time in
//! the local interpretation of the machine, with no attached time zone.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime};

use crate::error::InvalidDateError;

pub type Instant = NaiveDateTime;

/// Largest epoch offset (in milliseconds) a timestamp input may carry.
const MAX_TIMESTAMP_MILLIS: f64 = 8.64e15;

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
];

const LONG_DATE_FORMAT: &str = "%B %-d, %Y";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DateInput<'a> {
    Text(&'a str),
    /// Milliseconds since the Unix epoch.
    TimestampMillis(f64),
    Instant(Instant),
}

impl<'a> From<&'a str> for DateInput<'a> {
    fn from(value: &'a str) -> Self {
        DateInput::Text(value)
    }
}

impl<'a> From<&'a String> for DateInput<'a> {
    fn from(value: &'a String) -> Self {
        DateInput::Text(value.as_str())
    }
}

impl From<Instant> for DateInput<'_> {
    fn from(value: Instant) -> Self {
        DateInput::Instant(value)
    }
}

impl From<NaiveDate> for DateInput<'_> {
    fn from(value: NaiveDate) -> Self {
        DateInput::Instant(start_of_day(value))
    }
}

pub fn parse_date<'a>(input: impl Into<DateInput<'a>>) -> Result<Instant, InvalidDateError> {
    match input.into() {
        DateInput::Text(text) => parse_text(text),
        DateInput::TimestampMillis(millis) => parse_timestamp_millis(millis),
        DateInput::Instant(instant) => Ok(instant),
    }
}

fn parse_text(text: &str) -> Result<Instant, InvalidDateError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InvalidDateError::new(text));
    }

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(with_offset.with_timezone(&Local).naive_local());
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(instant) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(instant);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(start_of_day(date));
        }
    }

    Err(InvalidDateError::new(text))
}

fn parse_timestamp_millis(millis: f64) -> Result<Instant, InvalidDateError> {
    if !millis.is_finite() || millis.abs() > MAX_TIMESTAMP_MILLIS {
        return Err(InvalidDateError::new(millis.to_string()));
    }
    DateTime::from_timestamp_millis(millis.trunc() as i64)
        .map(|utc| utc.with_timezone(&Local).naive_local())
        .ok_or_else(|| InvalidDateError::new(millis.to_string()))
}

/// Converts a spreadsheet serial day number (1900 date system) into an instant.
pub fn excel_serial_to_instant(serial: f64) -> Result<Instant, InvalidDateError> {
    if !serial.is_finite() || serial < 0.0 {
        return Err(InvalidDateError::new(serial.to_string()));
    }
    let millis = (serial * 86_400_000.0).round() as i64;
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .map(start_of_day)
        .zip(Duration::try_milliseconds(millis))
        .and_then(|(epoch, delta)| epoch.checked_add_signed(delta))
        .ok_or_else(|| InvalidDateError::new(serial.to_string()))
}

/// Shifts an instant by whole calendar days; `None` when the result is out of range.
pub fn add_days(instant: Instant, days: i64) -> Option<Instant> {
    Duration::try_days(days).and_then(|delta| instant.checked_add_signed(delta))
}

/// Formats an instant as `Month D, YYYY`, the form written to exported sheets.
pub fn format_long_date(instant: Instant) -> String {
    instant.format(LONG_DATE_FORMAT).to_string()
}

fn start_of_day(date: NaiveDate) -> Instant {
    date.and_time(chrono::NaiveTime::MIN)
}
