//! Validation and conversion of the JSON timeline configuration.
//!
//! ```json
//! { "ddlGapDays": 30,
//!   "programs": [ { "id": "p1", "name": "P1",
//!                   "timePoints": [ { "id": "t1", "name": "T1", "date": "2025-01-01" } ],
//!                   "conference": { "name": "Conf", "date": "2025-03-01" } } ] }
//! ```
//!
//! Loading stops at the first violation; no partial model is ever returned.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::dates::{self, DateInput, Instant};
use crate::deadline::DEFAULT_DDL_GAP_DAYS;
use crate::error::{InvalidDateError, TimelineResult, ValidationError};
use crate::model::{ConferenceNode, Model, Program, TimePoint};

pub fn load_config(doc: &Value) -> Result<Model, ValidationError> {
    let Some(doc) = doc.as_object() else {
        return Err(ValidationError::new(
            "Invalid config file format: not a valid JSON object",
        ));
    };

    let Some(programs) = doc.get("programs").and_then(Value::as_array) else {
        return Err(ValidationError::new(
            "Invalid config file format: missing 'programs' array",
        ));
    };
    if programs.is_empty() {
        return Err(ValidationError::new(
            "Invalid config file format: 'programs' array is empty",
        ));
    }

    let mut drafts = Vec::with_capacity(programs.len());
    for (index, program) in programs.iter().enumerate() {
        drafts.push(read_program(index, program)?);
    }

    let gap_days = ddl_gap_days(doc)?;
    let loaded = drafts
        .into_iter()
        .map(|draft| draft.assemble(gap_days))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        programs = loaded.len(),
        gap_days,
        "loaded timeline configuration"
    );
    Ok(Model::new(loaded))
}

pub fn load_config_str(input: &str) -> TimelineResult<Model> {
    let doc: Value = serde_json::from_str(input)?;
    Ok(load_config(&doc)?)
}

pub fn load_config_file<P: AsRef<Path>>(path: P) -> TimelineResult<Model> {
    let contents = fs::read_to_string(path)?;
    load_config_str(&contents)
}

fn ddl_gap_days(doc: &Map<String, Value>) -> Result<i64, ValidationError> {
    let value = match doc.get("ddlGapDays") {
        None | Some(Value::Null) => return Ok(DEFAULT_DDL_GAP_DAYS),
        Some(value) => value,
    };
    let days = value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|days| days.is_finite() && days.fract() == 0.0)
            .filter(|days| days.abs() <= i64::MAX as f64)
            .map(|days| days as i64)
    });
    match days {
        Some(0) => Ok(DEFAULT_DDL_GAP_DAYS),
        Some(days) => Ok(days),
        None => Err(ValidationError::new(format!(
            "Invalid config file format: 'ddlGapDays' must be an integer, got {value}"
        ))),
    }
}

/// A program that passed validation and waits for the document-wide gap.
struct ProgramDraft<'a> {
    id: &'a str,
    name: &'a str,
    time_points: Vec<TimePoint>,
    conference: Option<ConferenceNode>,
}

impl ProgramDraft<'_> {
    fn assemble(self, gap_days: i64) -> Result<Program, ValidationError> {
        Program::assemble(
            self.id,
            self.name,
            self.time_points,
            self.conference,
            gap_days,
        )
    }
}

fn read_program(index: usize, program: &Value) -> Result<ProgramDraft<'_>, ValidationError> {
    let Some(id) = non_empty_str(program.get("id")) else {
        return Err(ValidationError::new(format!(
            "Program {} is missing a valid id field",
            index + 1
        )));
    };
    let Some(name) = non_empty_str(program.get("name")) else {
        return Err(ValidationError::new(format!(
            "Program \"{id}\" is missing a valid name field"
        )));
    };
    let Some(raw_points) = program.get("timePoints").and_then(Value::as_array) else {
        return Err(ValidationError::new(format!(
            "Program \"{name}\" is missing the timePoints array"
        )));
    };
    if raw_points.is_empty() {
        return Err(ValidationError::new(format!(
            "Program \"{name}\" has an empty timePoints array"
        )));
    }

    let mut time_points = Vec::with_capacity(raw_points.len());
    for (tp_index, raw) in raw_points.iter().enumerate() {
        time_points.push(load_time_point(name, tp_index, raw)?);
    }

    let conference = match present(program.get("conference")) {
        None => None,
        Some(raw) => Some(load_conference(id, name, raw)?),
    };

    Ok(ProgramDraft {
        id,
        name,
        time_points,
        conference,
    })
}

fn load_time_point(
    program_name: &str,
    index: usize,
    raw: &Value,
) -> Result<TimePoint, ValidationError> {
    let Some(id) = non_empty_str(raw.get("id")) else {
        return Err(ValidationError::new(format!(
            "Program \"{program_name}\" TimePoint {} is missing a valid id field",
            index + 1
        )));
    };
    let Some(name) = non_empty_str(raw.get("name")) else {
        return Err(ValidationError::new(format!(
            "Program \"{program_name}\" TimePoint \"{id}\" is missing a valid name field"
        )));
    };
    let Some(date_value) = present(raw.get("date")) else {
        return Err(ValidationError::new(format!(
            "Program \"{program_name}\" TimePoint \"{name}\" is missing the date field"
        )));
    };
    let date = parse_json_date(date_value).map_err(|_| {
        ValidationError::new(format!(
            "Program \"{program_name}\" TimePoint \"{name}\" has invalid date format: {}",
            quoted(date_value)
        ))
    })?;

    Ok(TimePoint::new(id, name, date))
}

fn load_conference(
    program_id: &str,
    program_name: &str,
    raw: &Value,
) -> Result<ConferenceNode, ValidationError> {
    let Some(name) = non_empty_str(raw.get("name")) else {
        return Err(ValidationError::new(format!(
            "Program \"{program_name}\" conference is missing a valid name field"
        )));
    };
    let Some(date_value) = present(raw.get("date")) else {
        return Err(ValidationError::new(format!(
            "Program \"{program_name}\" conference is missing the date field"
        )));
    };
    let date = parse_json_date(date_value).map_err(|_| {
        ValidationError::new(format!(
            "Program \"{program_name}\" conference has invalid date format: {}",
            quoted(date_value)
        ))
    })?;

    Ok(ConferenceNode::new(
        ConferenceNode::id_for(program_id),
        name,
        date,
    ))
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Filters out the values a document uses to mean "not set".
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| match v {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64() != Some(0.0),
        _ => true,
    })
}

fn parse_json_date(value: &Value) -> Result<Instant, InvalidDateError> {
    match value {
        Value::String(text) => dates::parse_date(text.as_str()),
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| InvalidDateError::new(number.to_string()))
            .and_then(|millis| dates::parse_date(DateInput::TimestampMillis(millis))),
        other => Err(InvalidDateError::new(other.to_string())),
    }
}

fn quoted(value: &Value) -> String {
    match value {
        Value::String(text) => format!("\"{text}\""),
        other => other.to_string(),
    }
}
