//! History Store Module
//!
//! This module owns the edit logs and the queries that derive undo/redo
//! position from them:
//! - `HistoryStore`: per-file append-only logs and the global seq counter
//! - `query`: pure folds that find the next undo and redo candidates
//! - `hash_content`: whole-file digest used to stamp events and detect conflicts
//!
//! # Architecture
//!
//! ```text
//! seq:   1        2          3          4
//!      apply A  apply B   undo(2)    redo(3)
//!
//! ineffective = {2, 3}      (targets of undo/redo events)
//! last effective = 4        (next undo reverts the redo)
//! last undone    = none     (undo 3 was redone)
//! ```

mod hash;
mod query;
mod store;

pub use hash::hash_content;
pub use query::{compute_ineffective_seqs, find_last_effective, find_last_undone};
pub use store::HistoryStore;
