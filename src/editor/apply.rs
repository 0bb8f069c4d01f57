//! Apply: replace a line range with new text

use serde::Deserialize;

use super::lines::{scroll_hint, split_block};
use super::{normalize_file_path, EditEngine, EditOutcome};
use crate::error::{EditError, EditResult};
use crate::types::NewEditEvent;

/// Replace lines `start_line..=end_line` of `file_path` with `modified`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub file_path: String,
    pub start_line: usize,
    pub end_line: usize,
    pub modified: String,
}

impl EditEngine {
    /// Apply a line-range replacement and record it.
    ///
    /// No conflict check: an apply always targets the file as it is now.
    pub async fn apply(&self, request: ApplyRequest) -> EditResult<EditOutcome> {
        let key = normalize_file_path(&request.file_path)?;
        let (start, end) = (request.start_line, request.end_line);
        if start == 0 {
            return Err(EditError::validation("startLine must be at least 1"));
        }
        if start > end {
            return Err(EditError::validation(format!(
                "startLine ({start}) must not exceed endLine ({end})"
            )));
        }

        let lock = self.file_lock(&key);
        let _guard = lock.lock().await;

        let mut file = self.open(&key).await?;
        let line_count = file.buffer.len();
        if end > line_count {
            return Err(EditError::validation(format!(
                "endLine ({end}) is past the end of {key} ({line_count} lines)"
            )));
        }

        let mut replacement = split_block(&request.modified);
        if replacement.is_empty() && start == 1 && end == line_count {
            // Clearing the whole file leaves the single empty line of an empty file
            replacement.push(String::new());
        }

        let original_line_count = end - start + 1;
        let original = file.buffer.range_text(start, original_line_count);
        let modified = replacement.join("\n");
        let modified_line_count = replacement.len();
        let hint = scroll_hint(&replacement);

        let hash_before = file.hash.clone();
        file.buffer.splice(start, original_line_count, replacement);
        let hash_after = self.commit(&file).await?;

        let event = self.store.append_event(
            &key,
            NewEditEvent {
                start_line: start,
                end_line: end,
                original,
                modified,
                original_line_count,
                modified_line_count,
                hash_before,
                hash_after,
                meta: None,
            },
        );

        tracing::info!(
            file = %key,
            seq = event.seq,
            start_line = start,
            end_line = end,
            lines_in = modified_line_count,
            "applied edit"
        );

        Ok(self.outcome(&key, &event, hint))
    }
}
