//! Edit event types
//!
//! Every successful apply, undo, or redo is recorded as one immutable
//! [`EditEvent`] in the per-file log. Undo and redo events point back at the
//! event they cancel through [`EventMeta`].

use serde::{Deserialize, Serialize};

/// Marks an event as a control operation rather than a plain edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventMeta {
    /// This event reverted the event with seq `undo_target`
    Undo {
        #[serde(rename = "isUndo", with = "always_true")]
        is_undo: (),
        #[serde(rename = "undoTarget")]
        undo_target: u64,
    },
    /// This event re-applied what the undo event `redo_target` reverted
    Redo {
        #[serde(rename = "isRedo", with = "always_true")]
        is_redo: (),
        #[serde(rename = "redoTarget")]
        redo_target: u64,
    },
}

impl EventMeta {
    pub fn undo(target: u64) -> Self {
        EventMeta::Undo {
            is_undo: (),
            undo_target: target,
        }
    }

    pub fn redo(target: u64) -> Self {
        EventMeta::Redo {
            is_redo: (),
            redo_target: target,
        }
    }

    /// The seq this control event cancels
    pub fn target(&self) -> u64 {
        match self {
            EventMeta::Undo { undo_target, .. } => *undo_target,
            EventMeta::Redo { redo_target, .. } => *redo_target,
        }
    }
}

/// Serializes `()` as `true` and only accepts `true` back.
mod always_true {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(_: &(), serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(true)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<(), D::Error> {
        if bool::deserialize(deserializer)? {
            Ok(())
        } else {
            Err(de::Error::custom("expected true"))
        }
    }
}

/// An event as handed to the history store, before it is sequenced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEditEvent {
    pub start_line: usize,
    pub end_line: usize,
    pub original: String,
    pub modified: String,
    pub original_line_count: usize,
    pub modified_line_count: usize,
    pub hash_before: String,
    pub hash_after: String,
    pub meta: Option<EventMeta>,
}

/// An immutable record in a file's edit log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditEvent {
    /// Process-wide, strictly increasing sequence number
    pub seq: u64,
    /// Relative path of the file this event belongs to
    pub file_path: String,
    /// First line of the mutated range, 1-based, in the file before the mutation
    pub start_line: usize,
    /// Last line of the mutated range (inclusive)
    pub end_line: usize,
    /// Text of the range before the mutation
    pub original: String,
    /// Text that replaced it
    pub modified: String,
    pub original_line_count: usize,
    pub modified_line_count: usize,
    /// Content hash of the whole file before the mutation
    pub hash_before: String,
    /// Content hash of the whole file after the mutation
    pub hash_after: String,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<EventMeta>,
}

impl EditEvent {
    /// Sequence a new event
    pub fn from_new(seq: u64, file_path: String, timestamp: i64, new: NewEditEvent) -> Self {
        Self {
            seq,
            file_path,
            start_line: new.start_line,
            end_line: new.end_line,
            original: new.original,
            modified: new.modified,
            original_line_count: new.original_line_count,
            modified_line_count: new.modified_line_count,
            hash_before: new.hash_before,
            hash_after: new.hash_after,
            timestamp,
            meta: new.meta,
        }
    }

    pub fn is_undo(&self) -> bool {
        matches!(self.meta, Some(EventMeta::Undo { .. }))
    }

    /// Seq of the event this one undid, if it is an undo
    pub fn undo_target(&self) -> Option<u64> {
        match self.meta {
            Some(EventMeta::Undo { undo_target, .. }) => Some(undo_target),
            _ => None,
        }
    }

    /// Seq of the undo event this one redid, if it is a redo
    pub fn redo_target(&self) -> Option<u64> {
        match self.meta {
            Some(EventMeta::Redo { redo_target, .. }) => Some(redo_target),
            _ => None,
        }
    }

    /// Last line occupied by `modified` once this event's mutation is applied.
    ///
    /// Equals `start_line - 1` when the event deleted its range.
    pub fn result_end_line(&self) -> usize {
        (self.start_line + self.modified_line_count).saturating_sub(1)
    }
}
