//! Catalog Domain Models
//!
//! Products are schemaless at the edges: the two catalogs return JSON
//! documents with differing field sets, so the gateway works on JSON objects
//! and only types the envelopes it owns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Wire Constants
// =============================================================================

/// Source label attached to rows from the transactional core catalog.
pub const SOURCE_CORE: &str = "AlloyDB (Core)";
/// Source label attached to rows from the flexible document catalog.
pub const SOURCE_DETAILS: &str = "MongoDB (Details)";
/// Note attached when a core row has no matching detail document.
pub const PARTIAL_NOTE: &str = "PARTIAL MODE: MongoDB details missing.";
/// Note attached when core fields were synthesized from a detail document.
pub const FALLBACK_NOTE: &str = "FALLBACK MODE: Core data synthesized from MongoDB details.";

/// Price assigned to synthesized core rows and detail-only listings.
pub const SYNTHESIZED_PRICE: f64 = 39.99;
/// Stock level assigned to synthesized core rows.
pub const SYNTHESIZED_STOCK: u64 = 999;
/// SKU assigned when a detail document carries none.
pub const SYNTHESIZED_SKU: &str = "SYNTH-001";

/// Fixed description recorded with every view event.
pub const VIEW_EVENT_DETAILS: &str = "User viewed this product.";

// =============================================================================
// Catalog Domain Models
// =============================================================================

/// A product as it travels through the gateway: a plain JSON object.
pub type ProductDoc = Map<String, Value>;

/// Input for the product lookup endpoint.
#[derive(Debug, Deserialize)]
pub struct ProductLookupInput {
    /// Optional caller identity (unused by the lookup itself).
    #[allow(dead_code)]
    pub user_id: Option<String>,

    pub product_id: Option<String>,
}

/// Input for the view tracking endpoint.
#[derive(Debug, Deserialize)]
pub struct TrackViewInput {
    /// Optional caller identity; an anonymous one is assigned when absent.
    pub user_id: Option<String>,

    pub product_id: Option<String>,
}

/// A user-interaction event as written to the document store.
#[derive(Debug, Serialize)]
pub struct InteractionEvent {
    pub user_id: String,
    pub product_id: String,
    pub details: String,
    pub timestamp: DateTime<Utc>,
}
