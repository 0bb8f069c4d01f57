//! Error type shared by the editor and the HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::rest::ApiError;

/// Result type for edit operations
pub type EditResult<T> = Result<T, EditError>;

/// Errors that can occur while applying, undoing, or redoing an edit.
///
/// Every variant except `Io` is raised before the file is touched.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    /// Missing or malformed request fields
    #[error("{0}")]
    Validation(String),

    /// The target file does not exist
    #[error("File not found: {0}")]
    NotFound(String),

    /// No undo or redo candidate in the log
    #[error("{0}")]
    EmptyHistory(&'static str),

    /// The file on disk no longer matches what the history expects
    #[error("File {path} was modified outside the edit history")]
    Conflict {
        path: String,
        expected: String,
        actual: String,
    },

    /// The log references an event that is not in it
    #[error("History corrupted: {0}")]
    HistoryCorrupted(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EditError {
    pub const NOTHING_TO_UNDO: &'static str = "Nothing to undo";
    pub const NOTHING_TO_REDO: &'static str = "Nothing to redo";

    pub fn validation(message: impl Into<String>) -> Self {
        EditError::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            EditError::Validation(_) | EditError::EmptyHistory(_) => StatusCode::BAD_REQUEST,
            EditError::NotFound(_) => StatusCode::NOT_FOUND,
            EditError::Conflict { .. } => StatusCode::CONFLICT,
            EditError::HistoryCorrupted(_) | EditError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for EditError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        let body = match self {
            EditError::Validation(_) | EditError::EmptyHistory(_) => ApiError::bad_request(message),
            EditError::NotFound(_) => ApiError::not_found(message),
            EditError::Conflict {
                expected, actual, ..
            } => ApiError::conflict(message, expected, actual),
            EditError::HistoryCorrupted(_) | EditError::Io(_) => ApiError::internal(message),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(EditError::validation("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            EditError::EmptyHistory(EditError::NOTHING_TO_UNDO).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(EditError::NotFound("a.txt".into()).status(), StatusCode::NOT_FOUND);
        let conflict = EditError::Conflict {
            path: "a.txt".into(),
            expected: "aa".into(),
            actual: "bb".into(),
        };
        assert_eq!(conflict.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_empty_history_message_is_bare() {
        let err = EditError::EmptyHistory(EditError::NOTHING_TO_REDO);
        assert_eq!(err.to_string(), "Nothing to redo");
    }
}
