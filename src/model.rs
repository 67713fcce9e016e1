use serde::{Deserialize, Serialize};

use crate::dates::Instant;
use crate::deadline::{self, Dated};
use crate::error::{EditError, ValidationError};

pub const CONFERENCE_NAME: &str = "Conference";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePoint {
    pub id: String,
    pub name: String,
    pub date: Instant,
}

impl TimePoint {
    pub fn new(id: impl Into<String>, name: impl Into<String>, date: Instant) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date,
        }
    }
}

impl Dated for TimePoint {
    fn date(&self) -> Instant {
        self.date
    }
}

/// Terminal milestone of a program, either declared or derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConferenceNode {
    pub id: String,
    pub name: String,
    pub date: Instant,
}

impl ConferenceNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>, date: Instant) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date,
        }
    }

    pub fn id_for(program_id: &str) -> String {
        format!("{program_id}-conference")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    id: String,
    name: String,
    time_points: Vec<TimePoint>,
    conference: Option<ConferenceNode>,
    ddl: Option<Instant>,
}

impl Program {
    /// Builds a program, deriving a synthetic `Conference` node from the last
    /// time point when no explicit conference is given.
    pub fn assemble(
        id: impl Into<String>,
        name: impl Into<String>,
        time_points: Vec<TimePoint>,
        explicit: Option<ConferenceNode>,
        gap_days: i64,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        let name = name.into();
        if time_points.is_empty() {
            return Err(ValidationError::new(format!(
                "Program \"{name}\" has no time points"
            )));
        }

        let ddl = deadline::derive_deadline(
            &time_points,
            explicit.as_ref().map(|conference| conference.date),
            gap_days,
        )
        .ok_or_else(|| {
            ValidationError::new(format!(
                "Program \"{name}\" deadline is out of range with a gap of {gap_days} days"
            ))
        })?;

        let conference = explicit.unwrap_or_else(|| {
            ConferenceNode::new(ConferenceNode::id_for(&id), CONFERENCE_NAME, ddl)
        });

        Ok(Self {
            id,
            name,
            time_points,
            conference: Some(conference),
            ddl: Some(ddl),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn time_points(&self) -> &[TimePoint] {
        &self.time_points
    }

    pub fn conference(&self) -> Option<&ConferenceNode> {
        self.conference.as_ref()
    }

    pub fn ddl(&self) -> Option<Instant> {
        self.ddl
    }

    pub fn time_point(&self, time_point_id: &str) -> Option<&TimePoint> {
        self.time_points.iter().find(|tp| tp.id == time_point_id)
    }

    fn with_time_point_date(&self, time_point_id: &str, date: Instant) -> Option<Program> {
        let position = self
            .time_points
            .iter()
            .position(|tp| tp.id == time_point_id)?;
        let mut time_points = self.time_points.clone();
        time_points[position].date = date;
        Some(Program {
            time_points,
            ..self.clone()
        })
    }
}

/// The canonical, ordered collection of programs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Model {
    programs: Vec<Program>,
}

impl Model {
    pub fn new(programs: Vec<Program>) -> Self {
        Self { programs }
    }

    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    pub fn program(&self, program_id: &str) -> Option<&Program> {
        self.programs.iter().find(|p| p.id == program_id)
    }

    pub fn last_program(&self) -> Option<&Program> {
        self.programs.last()
    }

    /// Returns a copy of the model in which one time point carries `date`.
    ///
    /// The program's conference and ddl are left as they were.
    pub fn with_time_point_date(
        &self,
        program_id: &str,
        time_point_id: &str,
        date: Instant,
    ) -> Result<Model, EditError> {
        let position = self
            .programs
            .iter()
            .position(|p| p.id == program_id)
            .ok_or_else(|| EditError::UnknownProgram(program_id.to_string()))?;
        let updated = self.programs[position]
            .with_time_point_date(time_point_id, date)
            .ok_or_else(|| EditError::UnknownTimePoint {
                program_id: program_id.to_string(),
                time_point_id: time_point_id.to_string(),
            })?;

        let mut programs = self.programs.clone();
        programs[position] = updated;
        Ok(Model { programs })
    }
}

impl<'a> IntoIterator for &'a Model {
    type Item = &'a Program;
    type IntoIter = std::slice::Iter<'a, Program>;

    fn into_iter(self) -> Self::IntoIter {
        self.programs.iter()
    }
}
