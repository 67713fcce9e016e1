use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::spreadsheet::{self, RowWarning, delimited, workbook};
use crate::{
    EditError, InvalidDateError, Program, ProgramView, TimelineError, TimelineSession, config_loader,
    parse_date, timeline_view,
};

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const EXPORT_DISPOSITION: &str = "attachment; filename=\"timeline-export.xlsx\"";

#[derive(Clone)]
pub struct AppState {
    session: Arc<RwLock<TimelineSession>>,
}

impl AppState {
    pub fn new(session: TimelineSession) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
        }
    }

    pub fn with_shared(session: Arc<RwLock<TimelineSession>>) -> Self {
        Self { session }
    }

    fn session(&self) -> Arc<RwLock<TimelineSession>> {
        self.session.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Invalid(String),
    Internal(String),
}

#[derive(Debug, Deserialize)]
struct DateEditPayload {
    date: String,
}

impl ApiError {
    fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl From<TimelineError> for ApiError {
    fn from(value: TimelineError) -> Self {
        if value.is_validation() {
            ApiError::Invalid(value.to_string())
        } else {
            ApiError::Internal(value.to_string())
        }
    }
}

impl From<EditError> for ApiError {
    fn from(value: EditError) -> Self {
        ApiError::NotFound(value.to_string())
    }
}

impl From<InvalidDateError> for ApiError {
    fn from(value: InvalidDateError) -> Self {
        ApiError::Invalid(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message),
            ApiError::Invalid(message) => (StatusCode::BAD_REQUEST, "invalid_request", message),
            ApiError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
            }
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/timeline", get(get_timeline))
        .route("/config", post(load_config))
        .route("/spreadsheet", post(import_spreadsheet))
        .route("/export", get(export_workbook))
        .route("/restore", post(restore))
        .route(
            "/programs/:program_id/time_points/:time_point_id/date",
            put(edit_time_point_date),
        )
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, session: TimelineSession) -> std::io::Result<()> {
    let state = AppState::new(session);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Serialize)]
struct TimelineBody<'a> {
    programs: Vec<ProgramView<'a>>,
    error: Option<&'a str>,
}

fn timeline_body(session: &TimelineSession) -> Result<Value, ApiError> {
    let body = TimelineBody {
        programs: timeline_view(session.model()),
        error: session.last_error(),
    };
    serde_json::to_value(&body).map_err(|err| ApiError::internal(err.to_string()))
}

async fn get_timeline(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let shared = state.session();
    let body = {
        let guard = shared.read();
        timeline_body(&guard)?
    };
    Ok(Json(body))
}

async fn load_config(
    State(state): State<AppState>,
    Json(doc): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let result = config_loader::load_config(&doc).map_err(TimelineError::from);
    let shared = state.session();
    let mut guard = shared.write();
    guard.apply_loaded(result)?;
    Ok(Json(timeline_body(&guard)?))
}

#[derive(Debug, Serialize)]
struct ImportBody {
    timeline: Value,
    warnings: Vec<RowWarning>,
}

async fn import_spreadsheet(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ImportBody>, ApiError> {
    let result = delimited::read_rows_from_reader(body.as_ref())
        .and_then(|rows| spreadsheet::import_rows(&rows));
    let shared = state.session();
    let mut guard = shared.write();
    let warnings = guard.apply_import(result)?;
    Ok(Json(ImportBody {
        timeline: timeline_body(&guard)?,
        warnings,
    }))
}

async fn export_workbook(State(state): State<AppState>) -> Result<Response, ApiError> {
    let shared = state.session();
    let sheet = {
        let guard = shared.read();
        guard.export_sheet()
    };
    let bytes = workbook::workbook_bytes(&sheet)?;
    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE),
            (header::CONTENT_DISPOSITION, EXPORT_DISPOSITION),
        ],
        bytes,
    )
        .into_response())
}

async fn restore(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let shared = state.session();
    let config_path = {
        let guard = shared.read();
        guard.config_path().to_path_buf()
    };
    let result = config_loader::load_config_file(&config_path);
    let mut guard = shared.write();
    guard.apply_loaded(result)?;
    Ok(Json(timeline_body(&guard)?))
}

async fn edit_time_point_date(
    State(state): State<AppState>,
    Path((program_id, time_point_id)): Path<(String, String)>,
    Json(payload): Json<DateEditPayload>,
) -> Result<Json<Program>, ApiError> {
    let date = parse_date(payload.date.as_str())?;
    let shared = state.session();
    let updated = {
        let mut guard = shared.write();
        guard
            .edit_time_point_date(&program_id, &time_point_id, date)?
            .clone()
    };
    Ok(Json(updated))
}
