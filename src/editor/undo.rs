//! Undo: revert the most recent effective edit

use super::lines::scroll_hint;
use super::{normalize_file_path, recorded_lines, EditEngine, EditOutcome};
use crate::error::{EditError, EditResult};
use crate::history::{compute_ineffective_seqs, find_last_effective};
use crate::types::{EventMeta, NewEditEvent};

impl EditEngine {
    /// Revert the last effective apply or redo on `file_path`.
    ///
    /// The file must hash to exactly what that event left behind; otherwise
    /// the undo is refused with a conflict and nothing is written.
    pub async fn undo(&self, file_path: &str) -> EditResult<EditOutcome> {
        let key = normalize_file_path(file_path)?;

        let lock = self.file_lock(&key);
        let _guard = lock.lock().await;

        let events = self.store.get_events(&key);
        let ineffective = compute_ineffective_seqs(&events);
        let target = find_last_effective(&events, &ineffective)
            .ok_or(EditError::EmptyHistory(EditError::NOTHING_TO_UNDO))?
            .clone();

        let mut file = self.open(&key).await?;
        let restored = recorded_lines(&target, &target.original, target.original_line_count)?;
        let hint = scroll_hint(&restored);

        let hash_after = self
            .rewrite_recorded_range(
                &key,
                &mut file,
                &target.hash_after,
                (target.start_line, target.modified_line_count),
                restored,
            )
            .await?;

        if hash_after != target.hash_before {
            tracing::warn!(
                file = %key,
                seq = target.seq,
                "undo did not restore the pre-edit hash"
            );
        }

        let event = self.store.append_event(
            &key,
            NewEditEvent {
                start_line: target.start_line,
                end_line: target.result_end_line(),
                original: target.modified.clone(),
                modified: target.original.clone(),
                original_line_count: target.modified_line_count,
                modified_line_count: target.original_line_count,
                hash_before: target.hash_after.clone(),
                hash_after,
                meta: Some(EventMeta::undo(target.seq)),
            },
        );

        tracing::info!(file = %key, seq = event.seq, undone = target.seq, "undid edit");

        Ok(self.outcome(&key, &event, hint))
    }
}
