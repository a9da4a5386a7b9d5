//! REST API handlers for the catalog gateway
//!
//! Every endpoint delegates data access to the toolbox server. Failures of a
//! single data source degrade that source to "absent" instead of failing the
//! whole request; endpoint-level failures map to fixed JSON error bodies.

use super::{helpers::*, models::*, state::*};
use crate::toolbox::{self, decode_payload, first_row, rows};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use futures_util::future;
use serde_json::{json, Value};

/// Creates routes for catalog operations and the static pages
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(index_page))
        .route("/virtual-tryon", get(virtual_tryon_page))
        .route("/products", get(list_products))
        .route("/products/:product_id", get(get_product))
        .route("/product_by_id", post(product_by_id))
        .route("/inventory/:category", get(category_inventory))
        .route("/track/view", post(track_view))
        .route("/etl/run", post(run_etl))
        .route("/analytics/top5", get(top_five_products))
}

// =============================================================================
// Static Pages
// =============================================================================

/// Endpoint: GET /
/// Serves the main product catalog page.
async fn index_page(State(state): State<SharedState>) -> Response {
    match state.load_page("index").await {
        Ok(html) => Html(html).into_response(),
        Err(status) => status.into_response(),
    }
}

/// Endpoint: GET /virtual-tryon
/// Serves the virtual try-on page.
async fn virtual_tryon_page(State(state): State<SharedState>) -> Response {
    match state.load_page("virtual-tryon").await {
        Ok(html) => Html(html).into_response(),
        Err(status) => status.into_response(),
    }
}

// =============================================================================
// Product Retrieval
// =============================================================================

/// Endpoint: GET /products/{product_id}
/// Retrieves a complete product by combining the core row and the detail
/// document, with fallback synthesis when only one catalog knows the id.
async fn get_product(
    State(state): State<SharedState>,
    Path(product_id): Path<String>,
) -> Response {
    fetch_merged_product(&state, &product_id).await
}

/// Endpoint: POST /product_by_id
/// Same merge flow as the GET variant, with the id taken from the body.
async fn product_by_id(
    State(state): State<SharedState>,
    body: Result<Json<ProductLookupInput>, JsonRejection>,
) -> Response {
    let input = match body {
        Ok(Json(input)) => input,
        Err(rejection) => return invalid_body(rejection),
    };

    let Some(product_id) = input.product_id.filter(|id| !id.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "product_id is required." })),
        )
            .into_response();
    };

    fetch_merged_product(&state, &product_id).await
}

/// Fetches both catalog halves concurrently, merges them, and enriches the
/// result with media URLs.
async fn fetch_merged_product(state: &AppState, product_id: &str) -> Response {
    let params = json!({ "product_id": product_id });
    let (core_result, details_result) = future::join(
        state
            .toolbox
            .invoke(toolbox::models::GET_PRODUCT_CORE_DATA, params.clone()),
        state
            .toolbox
            .invoke(toolbox::models::GET_PRODUCT_DETAILS, params),
    )
    .await;

    let core = match core_result {
        Ok(payload) => first_row(decode_payload(payload)),
        Err(err) => {
            tracing::warn!(product_id, error = %err, "core catalog fetch failed");
            None
        }
    };

    let details = match details_result {
        Ok(payload) => first_row(decode_payload(payload)),
        Err(err) => {
            tracing::warn!(product_id, error = %err, "detail catalog fetch failed");
            None
        }
    };

    let Some(mut product) = merge_product(core, details) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "message": format!("Product ID {product_id} not found in any data store.")
            })),
        )
            .into_response();
    };

    enrich_with_images(&mut product, &state.media);
    Json(Value::Object(product)).into_response()
}

/// Endpoint: GET /products
/// Concatenates the two disjoint catalogs, labeling and enriching each row
/// independently. A failed source contributes nothing.
async fn list_products(State(state): State<SharedState>) -> Response {
    let mut catalog: Vec<Value> = Vec::new();

    match state
        .toolbox
        .invoke(toolbox::models::LIST_PRODUCTS_CORE, json!({}))
        .await
    {
        Ok(payload) => {
            for mut row in rows(decode_payload(payload)) {
                row.insert("source".to_string(), json!(SOURCE_CORE));
                enrich_with_images(&mut row, &state.media);
                catalog.push(Value::Object(row));
            }
        }
        Err(err) => tracing::warn!(error = %err, "core catalog listing failed"),
    }

    match state
        .toolbox
        .invoke(toolbox::models::LIST_ALL_PRODUCT_DETAILS, json!({}))
        .await
    {
        Ok(payload) => {
            for mut row in rows(decode_payload(payload)) {
                label_detail_listing(&mut row);
                enrich_with_images(&mut row, &state.media);
                catalog.push(Value::Object(row));
            }
        }
        Err(err) => tracing::warn!(error = %err, "detail catalog listing failed"),
    }

    if catalog.is_empty() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "No products loaded from any source." })),
        )
            .into_response();
    }

    Json(catalog).into_response()
}

// =============================================================================
// Inventory & Tracking
// =============================================================================

/// Endpoint: GET /inventory/{category}
/// Runs the per-category aggregation in the document store and returns the
/// raw statistics payload.
async fn category_inventory(
    State(state): State<SharedState>,
    Path(category): Path<String>,
) -> Response {
    match state
        .toolbox
        .invoke(
            toolbox::models::GET_PRODUCT_STATS_BY_CATEGORY,
            json!({ "category": category }),
        )
        .await
    {
        Ok(statistics) => Json(json!({
            "message": "Product statistics successfully aggregated from MongoDB.",
            "statistics": statistics,
        }))
        .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Failed to run category aggregation tool.",
                "details": err.to_string(),
            })),
        )
            .into_response(),
    }
}

/// Endpoint: POST /track/view
/// Records a product view event through the document-store insertion tool.
/// This is a high-volume write path.
async fn track_view(
    State(state): State<SharedState>,
    body: Result<Json<TrackViewInput>, JsonRejection>,
) -> Response {
    let input = match body {
        Ok(Json(input)) => input,
        Err(rejection) => return invalid_body(rejection),
    };

    let Some(product_id) = input.product_id.filter(|id| !id.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "product_id is required for tracking." })),
        )
            .into_response();
    };

    let event = InteractionEvent {
        user_id: get_or_assign_user_id(input.user_id),
        product_id,
        details: VIEW_EVENT_DETAILS.to_string(),
        timestamp: Utc::now(),
    };

    // The insertion tool takes the event pre-serialized as a JSON string.
    let data = match serde_json::to_string(&event) {
        Ok(data) => data,
        Err(err) => return tracking_failure(err.to_string()),
    };

    match state
        .toolbox
        .invoke(toolbox::models::INSERT_USER_INTERACTION, json!({ "data": data }))
        .await
    {
        Ok(inserted_id) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Interaction tracked successfully (via MongoDB).",
                "inserted_id": inserted_id,
            })),
        )
            .into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "recording user interaction failed");
            tracking_failure(err.to_string())
        }
    }
}

fn tracking_failure(details: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Failed to record user interaction.",
            "details": details,
        })),
    )
        .into_response()
}

// =============================================================================
// Analytics
// =============================================================================

/// Endpoint: POST /etl/run
/// Orchestrates the application-driven ETL pass: read the aggregated
/// interaction summary from the document store, then merge it into the
/// analytics warehouse.
async fn run_etl(State(state): State<SharedState>) -> Response {
    let summary = match state
        .toolbox
        .invoke(
            toolbox::models::GET_TOTAL_INTERACTIONS_COUNT,
            json!({ "product_id": "" }),
        )
        .await
    {
        Ok(payload) => rows(decode_payload(payload)),
        Err(err) => return etl_failure(err.to_string()),
    };

    if summary.is_empty() {
        return Json(json!({ "message": "No interaction data to transfer." })).into_response();
    }

    let products_processed = summary.len();
    match state
        .toolbox
        .invoke(
            toolbox::models::EXECUTE_SQL_TOOL,
            json!({ "product_summaries": summary }),
        )
        .await
    {
        Ok(_) => Json(json!({
            "message": "Application-Driven ETL complete. MongoDB summary merged into BigQuery.",
            "products_processed": products_processed,
            "bigquery_response": "success",
        }))
        .into_response(),
        Err(err) => etl_failure(err.to_string()),
    }
}

fn etl_failure(details: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "ETL orchestration failed.",
            "details": details,
        })),
    )
        .into_response()
}

/// Endpoint: GET /analytics/top5
/// Ranks products by warehouse view counts, then enriches each ranked id
/// with its core row and a thumbnail URL. Rows whose core data cannot be
/// fetched are skipped.
async fn top_five_products(State(state): State<SharedState>) -> Response {
    let ranking = match state
        .toolbox
        .invoke(toolbox::models::GET_TOP_5_VIEWS, json!({}))
        .await
    {
        Ok(payload) => rows(decode_payload(payload)),
        Err(err) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "BigQuery Analytics query failed.",
                    "details": err.to_string(),
                })),
            )
                .into_response()
        }
    };

    if ranking.is_empty() {
        return Json(json!({ "message": "No views recorded in BigQuery for ranking." }))
            .into_response();
    }

    let lookups = ranking.iter().filter_map(|entry| {
        let product_id = ranked_product_id(entry)?;
        let score = entry.get("interaction_score").cloned().unwrap_or(Value::Null);
        Some(enrich_ranked_product(&state, product_id, score))
    });

    let top_products: Vec<Value> = future::join_all(lookups)
        .await
        .into_iter()
        .flatten()
        .collect();

    Json(top_products).into_response()
}

/// Reads the product id of a ranking row, accepting string or numeric ids.
fn ranked_product_id(entry: &ProductDoc) -> Option<String> {
    match entry.get("product_id") {
        Some(Value::String(id)) => Some(id.clone()),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => {
            tracing::warn!("ranking row without product_id skipped");
            None
        }
    }
}

/// Fetches the core row for a ranked product and attaches the view count and
/// thumbnail URL. Returns `None` when the core catalog does not know the id.
async fn enrich_ranked_product(
    state: &AppState,
    product_id: String,
    score: Value,
) -> Option<Value> {
    let payload = match state
        .toolbox
        .invoke(
            toolbox::models::GET_PRODUCT_CORE_DATA,
            json!({ "product_id": product_id }),
        )
        .await
    {
        Ok(payload) => payload,
        Err(err) => {
            tracing::warn!(%product_id, error = %err, "core data fetch for ranked product failed");
            return None;
        }
    };

    let Some(mut product) = first_row(decode_payload(payload)) else {
        tracing::warn!(%product_id, "no core data found for ranked product");
        return None;
    };

    product.insert("total_views".to_string(), score);
    let thumbnail = match usable_sku(&product) {
        Some(sku) => json!(state.media.thumbnail_url(sku)),
        None => state.media.fallback_value(),
    };
    product.insert("image_url".to_string(), thumbnail);

    Some(Value::Object(product))
}

// =============================================================================
// Shared Responses
// =============================================================================

/// Renders a malformed JSON body as a 400 with the rejection detail.
fn invalid_body(rejection: JsonRejection) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "Invalid JSON body.",
            "details": rejection.body_text(),
        })),
    )
        .into_response()
}
