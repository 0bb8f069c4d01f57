//! API module for HTTP endpoints
//!
//! This module exposes the edit engine to editor clients over JSON/HTTP.

pub mod http;
pub mod rest;
pub mod state;
