//! Catalog Business Logic Helpers
//!
//! This module contains the pure merge and enrichment functions that
//! reconcile the two disjoint catalogs into a single product document.

use super::models::{
    ProductDoc, FALLBACK_NOTE, PARTIAL_NOTE, SOURCE_DETAILS, SYNTHESIZED_PRICE, SYNTHESIZED_SKU,
    SYNTHESIZED_STOCK,
};
use super::state::MediaUrls;
use serde_json::{json, Value};
use uuid::Uuid;

/// Returns the provided `user_id` or creates a new UUID string when `None`.
///
/// This guarantees that every tracked interaction carries a non-empty
/// identity.
pub fn get_or_assign_user_id(user_id: Option<String>) -> String {
    user_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().simple().to_string())
}

/// Reconciles a core row and a detail document into one product.
///
/// # Behaviour
///
/// * Core hit: detail fields are overlaid on the core row, detail values
///   winning on collision. A missing detail document adds a partial-mode
///   `source_note` instead.
/// * Core miss with a detail hit: core fields are synthesized from the
///   detail document and a fallback-mode `source_note` is attached.
/// * Both missing (empty documents count as missing): `None`; the HTTP
///   layer renders this as not-found.
pub fn merge_product(core: Option<ProductDoc>, details: Option<ProductDoc>) -> Option<ProductDoc> {
    let core = core.filter(|doc| !doc.is_empty());
    let details = details.filter(|doc| !doc.is_empty());

    match (core, details) {
        (Some(mut product), Some(details)) => {
            overlay(&mut product, details);
            Some(product)
        }
        (Some(mut product), None) => {
            product.insert("source_note".to_string(), json!(PARTIAL_NOTE));
            Some(product)
        }
        (None, Some(details)) => {
            let mut product = synthesize_core(&details);
            overlay(&mut product, details);
            Some(product)
        }
        (None, None) => None,
    }
}

/// Copies every field of `incoming` into `target`, replacing existing keys.
fn overlay(target: &mut ProductDoc, incoming: ProductDoc) {
    for (key, value) in incoming {
        target.insert(key, value);
    }
}

/// Builds substitute core fields from a detail document.
///
/// Used when only the document catalog knows a product: the transactional
/// fields are filled with fixed placeholder values so downstream consumers
/// always see a complete row.
pub fn synthesize_core(details: &ProductDoc) -> ProductDoc {
    let category = details
        .get("category")
        .and_then(Value::as_str)
        .unwrap_or("Generic");

    let mut product = ProductDoc::new();
    product.insert(
        "product_id".to_string(),
        details.get("product_id").cloned().unwrap_or(Value::Null),
    );
    product.insert(
        "name".to_string(),
        json!(format!("MongoDB Product: {category}")),
    );
    product.insert("price".to_string(), json!(SYNTHESIZED_PRICE));
    product.insert(
        "sku".to_string(),
        details
            .get("sku")
            .filter(|value| !value.is_null())
            .cloned()
            .unwrap_or_else(|| json!(SYNTHESIZED_SKU)),
    );
    product.insert("stock".to_string(), json!(SYNTHESIZED_STOCK));
    product.insert("source_note".to_string(), json!(FALLBACK_NOTE));
    product
}

/// Reads a usable SKU from a product document.
///
/// Missing, empty, and `"N/A"` SKUs all count as unusable.
pub fn usable_sku(product: &ProductDoc) -> Option<&str> {
    product
        .get("sku")
        .and_then(Value::as_str)
        .filter(|sku| !sku.is_empty() && *sku != "N/A")
}

/// Attaches `image_url` and `fallback_url` to a product document.
///
/// A usable SKU yields a bucket-derived image URL; otherwise the configured
/// fallback image is used. The fallback URL is always attached so clients
/// can recover from broken bucket objects.
pub fn enrich_with_images(product: &mut ProductDoc, media: &MediaUrls) {
    let image_url = match usable_sku(product) {
        Some(sku) => json!(media.image_url(sku)),
        None => media.fallback_value(),
    };

    product.insert("image_url".to_string(), image_url);
    product.insert("fallback_url".to_string(), media.fallback_value());
}

/// Applies the listing defaults for rows coming from the document catalog:
/// the category doubles as the display name, the price is the fixed
/// detail-catalog price, and the source label is attached.
pub fn label_detail_listing(row: &mut ProductDoc) {
    let name = row.get("category").cloned().unwrap_or(Value::Null);
    row.insert("name".to_string(), name);
    row.insert("price".to_string(), json!(SYNTHESIZED_PRICE));
    row.insert("source".to_string(), json!(SOURCE_DETAILS));
}
