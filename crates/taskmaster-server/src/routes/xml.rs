//! XML routes — export the store as a document, import a document back.

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use serde_json::Value;
use taskmaster_xml::{export_tasks, import_tasks};

use crate::DEFAULT_USER_ID;
use crate::errors::ApiError;
use crate::response;
use crate::server::AppState;

/// `GET /api/export` — the full `<taskmaster>` document.
pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let conn = state.conn()?;
    let xml = export_tasks(&conn, DEFAULT_USER_ID)
        .map_err(|e| ApiError::from_xml(&state.config, e))?;
    Ok((
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        xml,
    ))
}

/// `POST /api/import` — raw XML body, all-or-nothing.
pub async fn import(
    State(state): State<AppState>,
    body: String,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if body.trim().is_empty() {
        return Err(ApiError::BadRequest("No XML content provided".into()));
    }

    let mut conn = state.conn()?;
    let summary = import_tasks(&mut conn, DEFAULT_USER_ID, &body)
        .map_err(|e| ApiError::from_xml(&state.config, e))?;

    Ok(response::success(
        &format!(
            "Import complete: {} tasks imported, {} skipped",
            summary.imported, summary.skipped
        ),
        summary,
    ))
}
