use serde::Serialize;

use crate::model::{Model, Program};
use crate::palette::{self, Rgb};

/// What the timeline renderer receives for each program.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramView<'a> {
    pub program: &'a Program,
    pub color: Rgb,
    /// Only the last program's conference is drawn.
    pub is_last: bool,
}

pub fn timeline_view(model: &Model) -> Vec<ProgramView<'_>> {
    let count = model.len();
    model
        .programs()
        .iter()
        .enumerate()
        .map(|(index, program)| ProgramView {
            program,
            color: palette::color_for(index),
            is_last: index + 1 == count,
        })
        .collect()
}
