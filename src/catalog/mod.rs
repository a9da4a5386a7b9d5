//! Catalog Domain Module
//!
//! This module contains all catalog business logic, including:
//! - Domain models (product documents, request inputs, wire constants)
//! - Merge and enrichment helpers (disjoint-catalog reconciliation)
//! - Application state management
//! - REST API handlers

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod state;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use state::{AppState, MediaUrls, SharedState};
