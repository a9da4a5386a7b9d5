//! MCP Toolbox Client Module
//!
//! This module implements the HTTP client for the remotely hosted MCP
//! Toolbox server, including:
//! - Tool name constants fixed by the toolbox deployment
//! - Manifest loading with an in-process cache
//! - Tool invocation and result decoding helpers

pub mod client;
pub mod models;

// Re-export commonly used types for convenience
pub use client::{decode_payload, first_row, rows, ToolboxClient};
