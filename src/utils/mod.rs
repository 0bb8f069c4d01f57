//! Utility functions and helpers
//!
//! This module contains timestamp helpers and atomic file rewrites.

pub mod atomic;
pub mod time;

pub use atomic::{atomic_write, cleanup_temp_files};
pub use time::current_timestamp_ms;
