//! HTTP client for the MCP Toolbox server.
//!
//! Tools are invoked with `POST {base}/api/tool/{name}/invoke`; a successful
//! response carries the tool output under a `result` key. Manifests loaded
//! via `GET {base}/api/tool/{name}` are cached per process so repeated
//! lookups of the same tool never re-fetch.

use super::models::ToolManifest;
use crate::error::{GatewayError, Result};
use dashmap::DashMap;
use serde_json::{Map, Value};

/// Client for a single toolbox deployment.
pub struct ToolboxClient {
    http: reqwest::Client,
    base_url: String,

    /// Manifests already fetched from the server, keyed by tool name.
    manifests: DashMap<String, ToolManifest>,
}

impl ToolboxClient {
    /// Creates a client for the toolbox at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            manifests: DashMap::new(),
        }
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Loads the manifest for `name`, fetching it at most once per process.
    pub async fn load_tool(&self, name: &str) -> Result<ToolManifest> {
        if let Some(found) = self.manifests.get(name) {
            return Ok(found.value().clone());
        }

        let url = format!("{}/api/tool/{}", self.base_url, name);
        tracing::debug!(tool = name, %url, "loading tool manifest");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(GatewayError::ToolFailed {
                tool: name.to_string(),
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        let manifest: ToolManifest = serde_json::from_str(&text)?;
        self.manifests.insert(name.to_string(), manifest.clone());
        Ok(manifest)
    }

    /// Invokes `name` with a JSON object of parameters and returns the raw
    /// `result` payload.
    pub async fn invoke(&self, name: &str, params: Value) -> Result<Value> {
        let url = format!("{}/api/tool/{}/invoke", self.base_url, name);
        tracing::debug!(tool = name, "invoking tool");

        let response = self.http.post(&url).json(&params).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(GatewayError::ToolFailed {
                tool: name.to_string(),
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        let body: Value = serde_json::from_str(&text)?;
        match body.get("result") {
            Some(result) => Ok(result.clone()),
            None => Err(GatewayError::Envelope {
                tool: name.to_string(),
                message: "missing `result` field".to_string(),
            }),
        }
    }
}

/// Extracts a human-readable message from an error response body.
fn error_message(text: &str) -> String {
    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|body| {
            body.get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| text.trim().to_string())
}

// =============================================================================
// Result Decoding Helpers
// =============================================================================

/// Normalizes a tool result into structured JSON.
///
/// Tools frequently return their payload as a JSON-encoded *string* rather
/// than structured JSON. String payloads are parsed transparently; a string
/// that is not valid JSON is logged and treated as absent, as is `null`.
pub fn decode_payload(payload: Value) -> Option<Value> {
    match payload {
        Value::String(text) => match serde_json::from_str(&text) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                tracing::warn!(error = %err, "discarding tool payload that is not valid JSON");
                None
            }
        },
        Value::Null => None,
        other => Some(other),
    }
}

/// Coerces a decoded payload into a list of JSON objects.
///
/// Anything that is not a list yields an empty vector; non-object list
/// entries are dropped.
pub fn rows(payload: Option<Value>) -> Vec<Map<String, Value>> {
    match payload {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Returns the first object of a decoded list payload, if any.
///
/// Single-row tools return their row wrapped in a one-element list.
pub fn first_row(payload: Option<Value>) -> Option<Map<String, Value>> {
    rows(payload).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_parses_string_payloads() {
        let decoded = decode_payload(json!("[{\"sku\": \"SKU-1\"}]")).unwrap();
        assert_eq!(decoded, json!([{ "sku": "SKU-1" }]));
    }

    #[test]
    fn decode_passes_structured_payloads_through() {
        let decoded = decode_payload(json!([{ "sku": "SKU-1" }])).unwrap();
        assert_eq!(decoded, json!([{ "sku": "SKU-1" }]));
    }

    #[test]
    fn decode_discards_invalid_strings_and_null() {
        assert!(decode_payload(json!("definitely not json {{{")).is_none());
        assert!(decode_payload(Value::Null).is_none());
    }

    #[test]
    fn rows_coerce_non_lists_to_empty() {
        assert!(rows(Some(json!({ "sku": "SKU-1" }))).is_empty());
        assert!(rows(None).is_empty());
    }

    #[test]
    fn rows_drop_non_object_entries() {
        let items = rows(Some(json!([{ "sku": "SKU-1" }, 42, "noise"])));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["sku"], "SKU-1");
    }

    #[test]
    fn first_row_unwraps_single_row_results() {
        let row = first_row(Some(json!([{ "product_id": "p-1" }]))).unwrap();
        assert_eq!(row["product_id"], "p-1");
        assert!(first_row(Some(json!([]))).is_none());
    }
}
