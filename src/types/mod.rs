//! Data types for the edit history server
//!
//! This module contains the event records and the small value types returned
//! by history queries.

mod event;

pub use event::{EditEvent, EventMeta, NewEditEvent};

use serde::{Deserialize, Serialize};

/// Whether a file currently has something to undo or redo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryState {
    pub can_undo: bool,
    pub can_redo: bool,
}
