//! REST API module for HTTP endpoints
//!
//! Provides the edit protocol over JSON:
//! - `POST /api/apply` - Replace a line range
//! - `POST /api/undo` - Revert the last effective edit
//! - `POST /api/redo` - Re-apply the last undone edit
//! - `GET /api/history-state` - Undo/redo availability
//! - `GET /api/history` - Raw event log for a file

pub mod edit;
pub mod history;

use serde::{Deserialize, Serialize};

use crate::error::EditError;

/// Query/body carrying just a file path
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilePathParams {
    #[serde(default)]
    pub file_path: Option<String>,
}

impl FilePathParams {
    /// The file path, or a validation error if it was not supplied
    pub fn require(self) -> Result<String, EditError> {
        self.file_path
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| EditError::validation("filePath is required"))
    }
}

/// API error response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_hash: Option<String>,
}

impl ApiError {
    fn with_code(message: impl Into<String>, code: &str) -> Self {
        Self {
            error: message.into(),
            code: code.to_string(),
            expected_hash: None,
            actual_hash: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_code(message, "NOT_FOUND")
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_code(message, "BAD_REQUEST")
    }

    /// Hash mismatch; carries both hashes so the client can tell what moved
    pub fn conflict(message: impl Into<String>, expected: String, actual: String) -> Self {
        Self {
            expected_hash: Some(expected),
            actual_hash: Some(actual),
            ..Self::with_code(message, "CONFLICT")
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_code(message, "INTERNAL_ERROR")
    }
}
