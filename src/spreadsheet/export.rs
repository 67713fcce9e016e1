use serde::Serialize;

use super::{DATE_COLUMN, EVENT_COLUMN};
use crate::dates::{self, Instant};
use crate::model::{CONFERENCE_NAME, Model};
use crate::palette::{self, CONFERENCE_COLOR, Rgb};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub date: Instant,
    pub event: String,
    pub color: Rgb,
}

impl ExportRow {
    pub fn date_text(&self) -> String {
        dates::format_long_date(self.date)
    }
}

/// Flattened, color-tagged rows ready to be written under the `DATE`/`EVENT` header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportSheet {
    rows: Vec<ExportRow>,
}

impl ExportSheet {
    pub const HEADER: [&'static str; 2] = [DATE_COLUMN, EVENT_COLUMN];

    pub fn rows(&self) -> &[ExportRow] {
        &self.rows
    }

    /// Cell text of every data row, header excluded.
    pub fn records(&self) -> impl Iterator<Item = [String; 2]> + '_ {
        self.rows
            .iter()
            .map(|row| [row.date_text(), row.event.clone()])
    }
}

/// Flattens the model in program order without re-sorting time points.
///
/// Only the last program's conference is written, as a single trailing
/// black `Conference` row.
pub fn export_model(model: &Model) -> ExportSheet {
    let mut rows = Vec::new();
    for (index, program) in model.programs().iter().enumerate() {
        let color = palette::color_for(index);
        for time_point in program.time_points() {
            rows.push(ExportRow {
                date: time_point.date,
                event: format!("{} - {}", program.name(), time_point.name),
                color,
            });
        }
    }

    if let Some(conference) = model.last_program().and_then(|p| p.conference()) {
        rows.push(ExportRow {
            date: conference.date,
            event: CONFERENCE_NAME.to_string(),
            color: CONFERENCE_COLOR,
        });
    }

    tracing::debug!(rows = rows.len(), "flattened model for export");
    ExportSheet { rows }
}
