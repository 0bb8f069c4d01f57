//! History query endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Serialize;

use super::FilePathParams;
use crate::api::state::AppState;
use crate::error::{EditError, EditResult};
use crate::types::{EditEvent, HistoryState};

fn params(query: Result<Query<FilePathParams>, QueryRejection>) -> EditResult<String> {
    query
        .map_err(|rejection| EditError::validation(rejection.body_text()))?
        .0
        .require()
}

/// GET /api/history-state?filePath=... - Undo/redo availability
pub async fn history_state(
    State(state): State<Arc<AppState>>,
    query: Result<Query<FilePathParams>, QueryRejection>,
) -> EditResult<Json<HistoryState>> {
    let file_path = params(query)?;
    Ok(Json(state.engine.history_state(&file_path)?))
}

/// Response for the event log of one file
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub file_path: String,
    pub events: Vec<EditEvent>,
    #[serde(flatten)]
    pub state: HistoryState,
}

/// GET /api/history?filePath=... - Event log in append order
pub async fn history(
    State(state): State<Arc<AppState>>,
    query: Result<Query<FilePathParams>, QueryRejection>,
) -> EditResult<Json<HistoryResponse>> {
    let file_path = params(query)?;
    let events = state.engine.history(&file_path)?;
    let history_state = state.engine.history_state(&file_path)?;

    Ok(Json(HistoryResponse {
        file_path,
        events,
        state: history_state,
    }))
}
