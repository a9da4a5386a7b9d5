//! Toolbox Protocol Models and Constants
//!
//! This module contains the data structures and tool names used when talking
//! to the MCP Toolbox server. The tool names are fixed by the toolbox
//! deployment's `tools.yaml` and must match it exactly.

use serde::Deserialize;
use std::collections::HashMap;

// =============================================================================
// Tool Names
// =============================================================================

/// Fetches the transactional row for a single product from the core catalog.
pub const GET_PRODUCT_CORE_DATA: &str = "get_product_core_data";
/// Fetches the flexible detail document for a single product.
pub const GET_PRODUCT_DETAILS: &str = "get_product_details";
/// Lists every product row in the core catalog.
pub const LIST_PRODUCTS_CORE: &str = "list_products_core";
/// Lists every detail document in the document catalog.
pub const LIST_ALL_PRODUCT_DETAILS: &str = "list_all_product_details";
/// Aggregates per-category inventory statistics in the document store.
pub const GET_PRODUCT_STATS_BY_CATEGORY: &str = "get_product_stats_by_category";
/// Inserts a user-interaction event into the document store.
pub const INSERT_USER_INTERACTION: &str = "insert_user_interaction";
/// Aggregates interaction counts per product for the ETL pass.
pub const GET_TOTAL_INTERACTIONS_COUNT: &str = "get_total_interactions_count";
/// Merges an interaction summary into the analytics warehouse.
pub const EXECUTE_SQL_TOOL: &str = "execute_sql_tool";
/// Returns the five most viewed products from the warehouse.
pub const GET_TOP_5_VIEWS: &str = "get_top_5_views";

/// Every tool the gateway invokes, used to warm the manifest cache at
/// startup.
pub const ALL_TOOLS: &[&str] = &[
    GET_PRODUCT_CORE_DATA,
    GET_PRODUCT_DETAILS,
    LIST_PRODUCTS_CORE,
    LIST_ALL_PRODUCT_DETAILS,
    GET_PRODUCT_STATS_BY_CATEGORY,
    INSERT_USER_INTERACTION,
    GET_TOTAL_INTERACTIONS_COUNT,
    EXECUTE_SQL_TOOL,
    GET_TOP_5_VIEWS,
];

// =============================================================================
// Manifest Models
// =============================================================================

/// Manifest returned by `GET /api/tool/{name}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolManifest {
    /// Version string advertised by the toolbox server.
    #[serde(rename = "serverVersion", default)]
    pub server_version: String,

    /// Tool definitions keyed by tool name.
    #[serde(default)]
    pub tools: HashMap<String, ToolSpec>,
}

/// A single tool definition inside a manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolSpec {
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub parameters: Vec<ToolParameter>,
}

/// One declared parameter of a tool.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolParameter {
    pub name: String,

    /// Parameter type as declared by the toolbox (`string`, `integer`, ...).
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub description: String,
}
