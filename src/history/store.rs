//! History Store - in-memory append-only edit logs
//!
//! The HistoryStore owns one log per file and the process-wide sequence
//! counter. Logs are created lazily on first append and live until `reset`.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::query::{compute_ineffective_seqs, find_last_effective, find_last_undone};
use crate::types::{EditEvent, HistoryState, NewEditEvent};

struct Inner {
    /// Next seq to assign
    next_seq: u64,
    logs: HashMap<String, Vec<EditEvent>>,
}

impl Inner {
    fn empty() -> Self {
        Self {
            next_seq: 1,
            logs: HashMap::new(),
        }
    }
}

/// The HistoryStore manages the per-file edit logs
pub struct HistoryStore {
    inner: RwLock<Inner>,
}

impl HistoryStore {
    /// Create an empty store; the first event gets seq 1
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::empty()),
        }
    }

    /// Drop every log and restart the sequence counter
    pub fn reset(&self) {
        *self.inner.write() = Inner::empty();
        tracing::debug!("history store reset");
    }

    /// Sequence an event and append it to `file_path`'s log.
    ///
    /// The seq is assigned under the same lock as the push, so a log is always
    /// ordered by seq. Timestamps never go backwards within a log.
    pub fn append_event(&self, file_path: &str, event: NewEditEvent) -> EditEvent {
        let mut inner = self.inner.write();

        let seq = inner.next_seq;
        inner.next_seq += 1;

        let log = inner.logs.entry(file_path.to_string()).or_default();
        let now = crate::utils::current_timestamp_ms();
        let timestamp = log.last().map_or(now, |last| last.timestamp.max(now));

        let stored = EditEvent::from_new(seq, file_path.to_string(), timestamp, event);
        log.push(stored.clone());

        tracing::debug!(file = file_path, seq, "appended edit event");
        stored
    }

    /// The file's log in append order (empty if the file has no history)
    pub fn get_events(&self, file_path: &str) -> Vec<EditEvent> {
        self.inner
            .read()
            .logs
            .get(file_path)
            .cloned()
            .unwrap_or_default()
    }

    /// Look up a single event in a file's log
    pub fn find_event(&self, file_path: &str, seq: u64) -> Option<EditEvent> {
        self.inner
            .read()
            .logs
            .get(file_path)
            .and_then(|log| log.iter().find(|event| event.seq == seq).cloned())
    }

    pub fn can_undo(&self, file_path: &str) -> bool {
        self.history_state(file_path).can_undo
    }

    pub fn can_redo(&self, file_path: &str) -> bool {
        self.history_state(file_path).can_redo
    }

    /// Undo/redo availability, derived from a single read of the log
    pub fn history_state(&self, file_path: &str) -> HistoryState {
        let inner = self.inner.read();
        let Some(log) = inner.logs.get(file_path) else {
            return HistoryState::default();
        };

        let ineffective = compute_ineffective_seqs(log);
        HistoryState {
            can_undo: find_last_effective(log, &ineffective).is_some(),
            can_redo: find_last_undone(log, &ineffective).is_some(),
        }
    }

    /// Files that have at least one event, sorted
    pub fn tracked_files(&self) -> Vec<String> {
        let mut files: Vec<String> = self.inner.read().logs.keys().cloned().collect();
        files.sort();
        files
    }

    /// Total number of events across all logs
    pub fn event_count(&self) -> usize {
        self.inner.read().logs.values().map(Vec::len).sum()
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventMeta;

    fn plain(hash_before: &str, hash_after: &str) -> NewEditEvent {
        NewEditEvent {
            start_line: 1,
            end_line: 1,
            original: "old".to_string(),
            modified: "new".to_string(),
            original_line_count: 1,
            modified_line_count: 1,
            hash_before: hash_before.to_string(),
            hash_after: hash_after.to_string(),
            meta: None,
        }
    }

    #[test]
    fn test_append_assigns_global_seq() {
        let store = HistoryStore::new();

        let a = store.append_event("a.txt", plain("h0", "h1"));
        let b = store.append_event("b.txt", plain("g0", "g1"));
        let c = store.append_event("a.txt", plain("h1", "h2"));

        assert_eq!((a.seq, b.seq, c.seq), (1, 2, 3));
        assert_eq!(a.file_path, "a.txt");

        let log: Vec<u64> = store.get_events("a.txt").iter().map(|e| e.seq).collect();
        assert_eq!(log, vec![1, 3]);
        assert_eq!(store.tracked_files(), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_get_events_unknown_file_is_empty() {
        let store = HistoryStore::new();
        assert!(store.get_events("missing.txt").is_empty());
        assert!(store.tracked_files().is_empty());
    }

    #[test]
    fn test_timestamps_never_decrease() {
        let store = HistoryStore::new();
        for _ in 0..20 {
            store.append_event("a.txt", plain("x", "y"));
        }

        let log = store.get_events("a.txt");
        assert!(log.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_history_state_transitions() {
        let store = HistoryStore::new();
        assert_eq!(store.history_state("a.txt"), HistoryState::default());

        let apply = store.append_event("a.txt", plain("h0", "h1"));
        assert!(store.can_undo("a.txt"));
        assert!(!store.can_redo("a.txt"));

        let mut undo = plain("h1", "h0");
        undo.meta = Some(EventMeta::undo(apply.seq));
        store.append_event("a.txt", undo);

        assert!(!store.can_undo("a.txt"));
        assert!(store.can_redo("a.txt"));
        // Other files are unaffected
        assert!(!store.can_undo("b.txt"));
    }

    #[test]
    fn test_find_event() {
        let store = HistoryStore::new();
        let first = store.append_event("a.txt", plain("h0", "h1"));

        assert_eq!(store.find_event("a.txt", first.seq), Some(first.clone()));
        assert!(store.find_event("b.txt", first.seq).is_none());
        assert!(store.find_event("a.txt", 99).is_none());
    }

    #[test]
    fn test_reset_restarts_sequence() {
        let store = HistoryStore::new();
        store.append_event("a.txt", plain("h0", "h1"));
        store.append_event("b.txt", plain("h0", "h1"));
        assert_eq!(store.event_count(), 2);

        store.reset();

        assert_eq!(store.event_count(), 0);
        assert!(store.get_events("a.txt").is_empty());
        assert_eq!(store.append_event("c.txt", plain("h0", "h1")).seq, 1);
    }
}
