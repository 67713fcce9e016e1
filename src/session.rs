//! The single current model and the events that replace it.
//!
//! Imports build a complete model before it is installed, so a failed import
//! leaves the previous model in place and only records a message for the user.

use std::path::{Path, PathBuf};

use crate::config_loader;
use crate::dates::Instant;
use crate::error::{EditError, TimelineError, TimelineResult};
use crate::model::{Model, Program};
use crate::spreadsheet::{self, ExportSheet, RowWarning, SheetRow, SpreadsheetImport};

pub const LOAD_FAILED: &str = "Load failed";
pub const IMPORT_FAILED: &str = "Spreadsheet import failed";
pub const EXPORT_FAILED: &str = "Export failed";

#[derive(Debug, Clone, Default)]
pub struct TimelineSession {
    model: Model,
    config_path: PathBuf,
    last_error: Option<String>,
}

impl TimelineSession {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            model: Model::default(),
            config_path: config_path.into(),
            last_error: None,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Message of the last failed operation, cleared by the next successful import.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn install(&mut self, model: Model) {
        tracing::info!(programs = model.len(), "installed timeline model");
        self.model = model;
        self.last_error = None;
    }

    fn record_failure(&mut self, context: &str, err: &TimelineError) {
        tracing::error!(error = %err, "{context}");
        self.last_error = Some(format!("{context}: {err}"));
    }

    /// Reloads the default configuration file ("restore to initial state").
    pub fn load_default(&mut self) -> TimelineResult<()> {
        let path = self.config_path.clone();
        self.load_config_file(path)
    }

    pub fn load_config_file<P: AsRef<Path>>(&mut self, path: P) -> TimelineResult<()> {
        let result = config_loader::load_config_file(path);
        self.apply_loaded(result)
    }

    pub fn load_config_value(&mut self, doc: &serde_json::Value) -> TimelineResult<()> {
        let result = config_loader::load_config(doc).map_err(TimelineError::from);
        self.apply_loaded(result)
    }

    pub fn import_spreadsheet_file<P: AsRef<Path>>(
        &mut self,
        path: P,
    ) -> TimelineResult<Vec<RowWarning>> {
        let result = spreadsheet::import_spreadsheet_file(path);
        self.apply_import(result)
    }

    pub fn import_rows(&mut self, rows: &[SheetRow]) -> TimelineResult<Vec<RowWarning>> {
        let result = spreadsheet::import_rows(rows);
        self.apply_import(result)
    }

    /// Installs a config load that was run outside the session, e.g. before
    /// taking a write lock on a shared session.
    pub fn apply_loaded(&mut self, result: TimelineResult<Model>) -> TimelineResult<()> {
        match result {
            Ok(model) => {
                self.install(model);
                Ok(())
            }
            Err(err) => {
                self.record_failure(LOAD_FAILED, &err);
                Err(err)
            }
        }
    }

    /// Spreadsheet counterpart of [`TimelineSession::apply_loaded`].
    pub fn apply_import(
        &mut self,
        result: TimelineResult<SpreadsheetImport>,
    ) -> TimelineResult<Vec<RowWarning>> {
        match result {
            Ok(SpreadsheetImport { model, warnings }) => {
                self.install(model);
                Ok(warnings)
            }
            Err(err) => {
                self.record_failure(IMPORT_FAILED, &err);
                Err(err)
            }
        }
    }

    pub fn export_sheet(&self) -> ExportSheet {
        spreadsheet::export_model(&self.model)
    }

    pub fn export_spreadsheet_file<P: AsRef<Path>>(&mut self, path: P) -> TimelineResult<()> {
        let result = spreadsheet::export_spreadsheet_file(&self.model, path);
        if let Err(err) = &result {
            self.record_failure(EXPORT_FAILED, err);
        }
        result
    }

    pub fn edit_time_point_date(
        &mut self,
        program_id: &str,
        time_point_id: &str,
        date: Instant,
    ) -> Result<&Program, EditError> {
        self.model = self
            .model
            .with_time_point_date(program_id, time_point_id, date)?;
        self.model
            .program(program_id)
            .ok_or_else(|| EditError::UnknownProgram(program_id.to_string()))
    }
}
