//! Edit Engine - apply, undo, and redo against files on disk
//!
//! Each operation rebuilds the file's undo/redo position from the history
//! log, reads the file, and checks its hash against what the log expects
//! before writing anything. Operations on the same file are serialized with a
//! per-file async mutex covering the whole read, check, write, and append.

mod apply;
pub mod lines;
mod redo;
mod undo;

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::error::{EditError, EditResult};
use crate::history::{hash_content, HistoryStore};
use crate::types::{EditEvent, HistoryState};
use crate::utils::atomic_write;
use lines::{block_lines, LineBuffer};

pub use apply::ApplyRequest;

/// Result of a successful apply, undo, or redo
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditOutcome {
    pub success: bool,
    /// Seq of the event recorded for this operation
    pub seq: u64,
    /// First line of the range now holding the new content
    pub start_line: usize,
    /// Last line of that range; `start_line - 1` if the range is now empty
    pub end_line: usize,
    pub scroll_hint: Option<String>,
    pub can_undo: bool,
    pub can_redo: bool,
}

/// A file opened for an edit, with the content read at the start of the operation
struct OpenFile {
    path: PathBuf,
    buffer: LineBuffer,
    hash: String,
}

/// Applies line-range edits under a root directory and records them
pub struct EditEngine {
    root: PathBuf,
    store: HistoryStore,
    locks: parking_lot::Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl EditEngine {
    /// Create an engine editing files under `root`, with an empty history
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            store: HistoryStore::new(),
            locks: parking_lot::Mutex::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    /// Forget all history
    pub fn reset(&self) {
        self.store.reset();
    }

    /// Undo/redo availability for a file. Does not touch the file.
    pub fn history_state(&self, file_path: &str) -> EditResult<HistoryState> {
        let key = normalize_file_path(file_path)?;
        Ok(self.store.history_state(&key))
    }

    /// The file's full event log
    pub fn history(&self, file_path: &str) -> EditResult<Vec<EditEvent>> {
        let key = normalize_file_path(file_path)?;
        Ok(self.store.get_events(&key))
    }

    /// Mutex serializing operations on one file
    fn file_lock(&self, key: &str) -> Arc<tokio::sync::Mutex<()>> {
        self.locks
            .lock()
            .entry(key.to_string())
            .or_default()
            .clone()
    }

    /// Resolve `key` to the real file it names, following symlinks.
    ///
    /// The resolved path must still lie under the (resolved) root.
    async fn resolve(&self, key: &str) -> EditResult<PathBuf> {
        let path = match tokio::fs::canonicalize(self.root.join(key)).await {
            Ok(path) => path,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(EditError::NotFound(key.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        let root = tokio::fs::canonicalize(&self.root).await?;
        if !path.starts_with(&root) {
            return Err(EditError::validation(format!(
                "{key} resolves outside the root directory"
            )));
        }
        Ok(path)
    }

    async fn open(&self, key: &str) -> EditResult<OpenFile> {
        let path = self.resolve(key).await?;

        let metadata = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(EditError::NotFound(key.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        if !metadata.is_file() {
            return Err(EditError::NotFound(key.to_string()));
        }

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(EditError::NotFound(key.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(EditError::validation(format!("{key} is not valid UTF-8")))
            }
            Err(e) => return Err(e.into()),
        };

        Ok(OpenFile {
            path,
            hash: hash_content(&content),
            buffer: LineBuffer::parse(&content),
        })
    }

    /// Write the buffer back and return the new whole-file hash
    async fn commit(&self, file: &OpenFile) -> EditResult<String> {
        let content = file.buffer.render();
        atomic_write(&file.path, &content).await?;
        Ok(hash_content(&content))
    }

    /// Replace the range an earlier event produced with `replacement`.
    ///
    /// Fails with a conflict, before touching the file, unless the file hash is
    /// `expected_hash`. Returns the new whole-file hash.
    async fn rewrite_recorded_range(
        &self,
        key: &str,
        file: &mut OpenFile,
        expected_hash: &str,
        range: (usize, usize),
        replacement: Vec<String>,
    ) -> EditResult<String> {
        if file.hash != expected_hash {
            tracing::warn!(
                file = %key,
                expected = %expected_hash,
                actual = %file.hash,
                "file changed outside the edit history"
            );
            return Err(EditError::Conflict {
                path: key.to_string(),
                expected: expected_hash.to_string(),
                actual: file.hash.clone(),
            });
        }

        let (start, count) = range;
        if !file.buffer.contains_range(start, count) {
            return Err(EditError::HistoryCorrupted(format!(
                "recorded range {start}+{count} lies outside {key}"
            )));
        }

        file.buffer.splice(start, count, replacement);
        self.commit(file).await
    }

    fn outcome(&self, key: &str, event: &EditEvent, scroll_hint: Option<String>) -> EditOutcome {
        let state = self.store.history_state(key);
        EditOutcome {
            success: true,
            seq: event.seq,
            start_line: event.start_line,
            end_line: event.result_end_line(),
            scroll_hint,
            can_undo: state.can_undo,
            can_redo: state.can_redo,
        }
    }
}

/// Lines of a block recorded in `event`, or a corruption error if its
/// text and line count disagree
fn recorded_lines(event: &EditEvent, text: &str, line_count: usize) -> EditResult<Vec<String>> {
    block_lines(text, line_count).ok_or_else(|| {
        EditError::HistoryCorrupted(format!(
            "event {} records {line_count} lines that do not match its text",
            event.seq
        ))
    })
}

/// Validate a root-relative path and turn it into the history key.
///
/// Rejects empty, absolute, and `..` paths so edits cannot leave the root.
pub fn normalize_file_path(file_path: &str) -> EditResult<String> {
    let trimmed = file_path.trim();
    if trimmed.is_empty() {
        return Err(EditError::validation("filePath is required"));
    }

    let mut parts = Vec::new();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(EditError::validation(format!(
                    "filePath must be relative to the root directory: {file_path}"
                )))
            }
        }
    }

    if parts.is_empty() {
        return Err(EditError::validation(format!("filePath names no file: {file_path}")));
    }
    Ok(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_file_path() {
        assert_eq!(normalize_file_path("notes/a.md").unwrap(), "notes/a.md");
        assert_eq!(normalize_file_path("./notes//a.md").unwrap(), "notes/a.md");
        assert_eq!(normalize_file_path("  a.txt ").unwrap(), "a.txt");
    }

    #[test]
    fn test_normalize_rejects_escapes() {
        for bad in ["", "   ", "/etc/passwd", "../secret", "a/../../b", "."] {
            assert!(
                matches!(normalize_file_path(bad), Err(EditError::Validation(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_history_state_needs_no_file() {
        let engine = EditEngine::new("/nonexistent-root");
        let state = engine.history_state("never/created.txt").unwrap();
        assert_eq!(state, HistoryState::default());
    }

    #[test]
    fn test_file_lock_is_shared_per_key() {
        let engine = EditEngine::new(".");
        let a = engine.file_lock("a.txt");
        let b = engine.file_lock("a.txt");
        let c = engine.file_lock("c.txt");
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
    }
}
