//! Catalog Gateway State Management
//!
//! This module manages the shared application state: the toolbox client,
//! the media URL configuration, and the static page assets.

use crate::config::Config;
use crate::toolbox::ToolboxClient;
use serde_json::Value;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

// =============================================================================
// Media URLs
// =============================================================================

/// Builds object-storage URLs for product media.
#[derive(Debug, Clone)]
pub struct MediaUrls {
    base_url: String,
    fallback: Option<String>,
}

impl MediaUrls {
    pub fn new(base_url: String, fallback: Option<String>) -> Self {
        Self { base_url, fallback }
    }

    /// Catalog image for a SKU.
    pub fn image_url(&self, sku: &str) -> String {
        format!("{}/{}.jpg", self.base_url, sku)
    }

    /// Analytics thumbnail for a SKU.
    pub fn thumbnail_url(&self, sku: &str) -> String {
        format!("{}/thumbnails/{}.jpg", self.base_url, sku)
    }

    /// The configured fallback image as a JSON value (`null` when unset).
    pub fn fallback_value(&self) -> Value {
        match &self.fallback {
            Some(url) => Value::String(url.clone()),
            None => Value::Null,
        }
    }
}

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state: the toolbox client, media configuration, and the
/// location of the static page assets.
pub struct AppState {
    /// Client for the remotely hosted MCP Toolbox server.
    pub toolbox: ToolboxClient,

    /// Object-storage URL builder for product media.
    pub media: MediaUrls,

    /// Path to the directory containing HTML assets.
    pub assets_dir: PathBuf,
}

impl AppState {
    /// Creates the application state from a loaded configuration.
    pub fn new(config: Config) -> Self {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let assets_dir = Self::locate_assets_directory(&current_dir);

        tracing::info!(assets_dir = %assets_dir.display(), "using assets directory");

        let media = MediaUrls::new(config.storage_base_url(), config.fallback_image_url.clone());

        Self {
            toolbox: ToolboxClient::new(&config.toolbox_url),
            media,
            assets_dir,
        }
    }

    /// Attempts to locate the assets directory using a multi-step strategy
    fn locate_assets_directory(current_dir: &Path) -> PathBuf {
        // Strategy to locate assets:
        // 1. ./assets
        // 2. ../assets (if running from a subdir)
        // 3. Fallback to "assets" relative path

        if current_dir.join("assets").exists() {
            return current_dir.join("assets");
        }

        if let Some(parent) = current_dir.parent() {
            if parent.join("assets").exists() {
                return parent.join("assets");
            }
        }

        PathBuf::from("assets") // Fallback
    }

    /// Reads `{page}.html` from the assets directory, or a fallback version.
    pub async fn load_page(&self, page: &str) -> Result<String, axum::http::StatusCode> {
        // First try the primary HTML file
        let primary_html_path = self.assets_dir.join(format!("{page}.html"));
        if primary_html_path.exists() {
            return tokio::fs::read_to_string(primary_html_path)
                .await
                .map_err(|_| axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        }

        // Search for fallbacks (e.g., index-123.html)
        let fallback_path = self.find_fallback_page(page).await?;

        tokio::fs::read_to_string(fallback_path)
            .await
            .map_err(|_| axum::http::StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Finds a versioned fallback file when the primary page is not available
    async fn find_fallback_page(&self, page: &str) -> Result<PathBuf, axum::http::StatusCode> {
        let mut entries = tokio::fs::read_dir(&self.assets_dir)
            .await
            .map_err(|_| axum::http::StatusCode::NOT_FOUND)?;

        let prefix = format!("{page}-");
        let mut fallbacks = Vec::new();
        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with(&prefix) && name.ends_with(".html") {
                    fallbacks.push(path);
                }
            }
        }

        // Use the lexicographically last fallback (likely the latest build)
        fallbacks.sort();
        fallbacks
            .last()
            .cloned()
            .ok_or(axum::http::StatusCode::NOT_FOUND)
    }
}
