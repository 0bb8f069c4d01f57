//! Redo: re-apply the edit reverted by the most recent live undo

use super::lines::scroll_hint;
use super::{normalize_file_path, recorded_lines, EditEngine, EditOutcome};
use crate::error::{EditError, EditResult};
use crate::history::{compute_ineffective_seqs, find_last_undone};
use crate::types::{EventMeta, NewEditEvent};

impl EditEngine {
    /// Re-apply whatever the last live undo on `file_path` reverted.
    ///
    /// A new apply after the undo changes the file hash, so the stale undo
    /// fails the hash check here and redo reports a conflict.
    pub async fn redo(&self, file_path: &str) -> EditResult<EditOutcome> {
        let key = normalize_file_path(file_path)?;

        let lock = self.file_lock(&key);
        let _guard = lock.lock().await;

        let events = self.store.get_events(&key);
        let ineffective = compute_ineffective_seqs(&events);
        let undo = find_last_undone(&events, &ineffective)
            .ok_or(EditError::EmptyHistory(EditError::NOTHING_TO_REDO))?;
        let undo_target = undo.undo_target().unwrap_or_default();
        let undone = self
            .store
            .find_event(&key, undo_target)
            .ok_or_else(|| {
                EditError::HistoryCorrupted(format!(
                    "undo {} refers to event {undo_target}, which is not in the log of {key}",
                    undo.seq
                ))
            })?;

        let mut file = self.open(&key).await?;
        let reapplied = recorded_lines(&undone, &undone.modified, undone.modified_line_count)?;
        let hint = scroll_hint(&reapplied);

        let hash_after = self
            .rewrite_recorded_range(
                &key,
                &mut file,
                &undo.hash_after,
                (undo.start_line, undo.modified_line_count),
                reapplied,
            )
            .await?;

        if hash_after != undone.hash_after {
            tracing::warn!(
                file = %key,
                seq = undone.seq,
                "redo did not reproduce the post-edit hash"
            );
        }

        let event = self.store.append_event(
            &key,
            NewEditEvent {
                start_line: undo.start_line,
                end_line: undo.result_end_line(),
                original: undo.modified.clone(),
                modified: undone.modified.clone(),
                original_line_count: undo.modified_line_count,
                modified_line_count: undone.modified_line_count,
                hash_before: undo.hash_after.clone(),
                hash_after,
                meta: Some(EventMeta::redo(undo.seq)),
            },
        );

        tracing::info!(file = %key, seq = event.seq, redone = undo.seq, "redid edit");

        Ok(self.outcome(&key, &event, hint))
    }
}
