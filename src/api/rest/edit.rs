//! Apply, undo, and redo endpoints

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;

use super::FilePathParams;
use crate::api::state::AppState;
use crate::editor::{ApplyRequest, EditOutcome};
use crate::error::{EditError, EditResult};

/// Body of `POST /api/apply`; every field is optional so that a missing one
/// is reported as a validation error rather than a deserialization failure
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyBody {
    pub file_path: Option<String>,
    pub start_line: Option<usize>,
    pub end_line: Option<usize>,
    pub modified: Option<String>,
}

impl ApplyBody {
    fn into_request(self) -> EditResult<ApplyRequest> {
        let file_path = FilePathParams {
            file_path: self.file_path,
        }
        .require()?;

        Ok(ApplyRequest {
            file_path,
            start_line: self
                .start_line
                .ok_or_else(|| EditError::validation("startLine is required"))?,
            end_line: self
                .end_line
                .ok_or_else(|| EditError::validation("endLine is required"))?,
            modified: self
                .modified
                .ok_or_else(|| EditError::validation("modified is required"))?,
        })
    }
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> EditResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| EditError::validation(rejection.body_text()))
}

/// POST /api/apply - Replace a line range
pub async fn apply(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ApplyBody>, JsonRejection>,
) -> EditResult<Json<EditOutcome>> {
    let request = body(payload)?.into_request()?;
    let outcome = state.engine.apply(request).await?;
    Ok(Json(outcome))
}

/// POST /api/undo - Revert the last effective edit
pub async fn undo(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FilePathParams>, JsonRejection>,
) -> EditResult<Json<EditOutcome>> {
    let file_path = body(payload)?.require()?;
    let outcome = state.engine.undo(&file_path).await?;
    Ok(Json(outcome))
}

/// POST /api/redo - Re-apply the last undone edit
pub async fn redo(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FilePathParams>, JsonRejection>,
) -> EditResult<Json<EditOutcome>> {
    let file_path = body(payload)?.require()?;
    let outcome = state.engine.redo(&file_path).await?;
    Ok(Json(outcome))
}
