//! Edit History Server
//!
//! Applies line-range text edits to files on disk and undoes or redoes them
//! safely, even when the files change outside the server between requests.
//!
//! # Features
//!
//! - **Append-only history**: every apply, undo, and redo is an immutable event
//! - **Derived stack**: undo/redo position is recomputed from the log, never stored
//! - **Conflict detection**: whole-file SHA-256 gates every undo and redo
//! - **Per-file serialization**: one operation in flight per file
//!
//! # Modules
//!
//! - `types`: Edit events and history state
//! - `history`: History store, log queries, and content hashing
//! - `editor`: Apply/undo/redo protocol against the filesystem
//! - `api`: Axum router and REST handlers
//! - `config`: Environment configuration
//! - `error`: Error type and HTTP mapping
//! - `utils`: Timestamps and atomic file rewrites
//!
//! # Example
//!
//! ```no_run
//! use edit_history::{ApplyRequest, EditEngine};
//!
//! # async fn run() -> edit_history::EditResult<()> {
//! let engine = EditEngine::new("/srv/docs");
//! engine
//!     .apply(ApplyRequest {
//!         file_path: "notes.md".to_string(),
//!         start_line: 2,
//!         end_line: 2,
//!         modified: "MODIFIED".to_string(),
//!     })
//!     .await?;
//! engine.undo("notes.md").await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod editor;
pub mod error;
pub mod history;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::ServerConfig;
pub use editor::{ApplyRequest, EditEngine, EditOutcome};
pub use error::{EditError, EditResult};
pub use history::{hash_content, HistoryStore};
pub use types::{EditEvent, EventMeta, HistoryState, NewEditEvent};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
