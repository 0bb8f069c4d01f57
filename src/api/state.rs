//! Shared application state for HTTP handlers

use crate::config::ServerConfig;
use crate::editor::EditEngine;

/// State shared by every request
pub struct AppState {
    /// The edit engine and its history
    pub engine: EditEngine,
}

impl AppState {
    pub fn new(engine: EditEngine) -> Self {
        Self { engine }
    }

    /// Build the engine for the configured root directory
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(EditEngine::new(config.root_dir.clone()))
    }
}
