use std::collections::HashMap;

use super::{RowWarning, SheetRow, program_slug};
use crate::deadline::DEFAULT_DDL_GAP_DAYS;
use crate::error::{TimelineError, TimelineResult};
use crate::model::{CONFERENCE_NAME, ConferenceNode, Model, Program, TimePoint};

const EVENT_SEPARATOR: &str = " - ";

#[derive(Debug, Clone)]
pub struct SpreadsheetImport {
    pub model: Model,
    pub warnings: Vec<RowWarning>,
}

struct ProgramAccumulator {
    name: String,
    events: Vec<TimePoint>,
    conference: Option<ConferenceNode>,
}

/// Programs keyed by name, iterated in first-seen order.
#[derive(Default)]
struct ProgramGroups {
    groups: Vec<ProgramAccumulator>,
    positions: HashMap<String, usize>,
}

impl ProgramGroups {
    fn entry(&mut self, name: &str) -> &mut ProgramAccumulator {
        let position = match self.positions.get(name) {
            Some(position) => *position,
            None => {
                self.groups.push(ProgramAccumulator {
                    name: name.to_string(),
                    events: Vec::new(),
                    conference: None,
                });
                let position = self.groups.len() - 1;
                self.positions.insert(name.to_string(), position);
                position
            }
        };
        &mut self.groups[position]
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut ProgramAccumulator> {
        let position = *self.positions.get(name)?;
        self.groups.get_mut(position)
    }

    fn into_programs(self) -> TimelineResult<Vec<Program>> {
        let mut programs = Vec::with_capacity(self.groups.len());
        for mut group in self.groups {
            group.events.sort_by_key(|tp| tp.date);
            let program = Program::assemble(
                program_slug(&group.name),
                group.name,
                group.events,
                group.conference,
                DEFAULT_DDL_GAP_DAYS,
            )?;
            programs.push(program);
        }
        Ok(programs)
    }
}

/// Rebuilds the model from flat spreadsheet rows.
///
/// A `Conference` row belongs to the program of the most recent
/// `<Program> - <Event>` row. Rows with a missing cell are skipped and
/// reported as warnings; any other malformed row aborts the import.
pub fn import_rows(rows: &[SheetRow]) -> TimelineResult<SpreadsheetImport> {
    let Some(first) = rows.first() else {
        return Err(TimelineError::validation(
            "Spreadsheet is empty or has invalid format",
        ));
    };
    if first.date.is_none() || first.event.is_none() {
        return Err(TimelineError::validation(
            "Spreadsheet must contain DATE and EVENT columns",
        ));
    }

    let mut groups = ProgramGroups::default();
    let mut current_program: Option<String> = None;
    let mut warnings = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        let row_number = index + 2;
        let (Some(date_cell), Some(event)) = (&row.date, &row.event) else {
            tracing::warn!(row = row_number, "skipping row: missing required fields");
            warnings.push(RowWarning {
                row: row_number,
                message: format!("Skipping row {row_number}: missing required fields"),
            });
            continue;
        };

        let date = date_cell.to_instant().map_err(|_| {
            TimelineError::validation(format!(
                "Invalid date format on row {row_number}: \"{}\"",
                date_cell.describe()
            ))
        })?;

        if event.trim() == CONFERENCE_NAME {
            let Some(program_name) = current_program.as_deref() else {
                return Err(TimelineError::validation(format!(
                    "Row {row_number} is Conference but has no corresponding Program"
                )));
            };
            if let Some(group) = groups.get_mut(program_name) {
                group.conference = Some(ConferenceNode::new(
                    ConferenceNode::id_for(&program_slug(program_name)),
                    CONFERENCE_NAME,
                    date,
                ));
            }
            continue;
        }

        let (program_name, event_name) = split_event(event).ok_or_else(|| {
            TimelineError::validation(format!(
                "Invalid EVENT format on row {row_number}; expected \"ProgramName - EventName\" or \"Conference\""
            ))
        })?;

        let id = format!("{}-{index}", program_slug(&program_name));
        groups
            .entry(&program_name)
            .events
            .push(TimePoint::new(id, event_name, date));
        current_program = Some(program_name);
    }

    let programs = groups.into_programs()?;
    tracing::debug!(
        rows = rows.len(),
        programs = programs.len(),
        skipped = warnings.len(),
        "imported spreadsheet rows"
    );
    Ok(SpreadsheetImport {
        model: Model::new(programs),
        warnings,
    })
}

/// Splits `<Program> - <Event>`; the event part may itself contain the separator.
fn split_event(event: &str) -> Option<(String, String)> {
    let (program, rest) = event.split_once(EVENT_SEPARATOR)?;
    let program = program.trim();
    if program.is_empty() {
        return None;
    }
    Some((program.to_string(), rest.trim().to_string()))
}
