//! Pure queries over a single file's edit log
//!
//! The undo/redo position is never stored. It is derived on every request by
//! folding over the log and treating every event referenced by a later undo or
//! redo as cancelled.

use std::collections::HashSet;

use crate::types::EditEvent;

/// Seqs of every event that a later undo or redo in the log refers to
pub fn compute_ineffective_seqs(events: &[EditEvent]) -> HashSet<u64> {
    events
        .iter()
        .filter_map(|event| event.meta.map(|meta| meta.target()))
        .collect()
}

/// The most recent live edit: the next thing `undo` would revert
pub fn find_last_effective<'a>(
    events: &'a [EditEvent],
    ineffective: &HashSet<u64>,
) -> Option<&'a EditEvent> {
    events
        .iter()
        .rev()
        .find(|event| !ineffective.contains(&event.seq) && !event.is_undo())
}

/// The most recent live undo: the next thing `redo` would re-apply
pub fn find_last_undone<'a>(
    events: &'a [EditEvent],
    ineffective: &HashSet<u64>,
) -> Option<&'a EditEvent> {
    events
        .iter()
        .rev()
        .find(|event| !ineffective.contains(&event.seq) && event.is_undo())
}
