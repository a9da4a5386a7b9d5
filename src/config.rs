//! Environment-driven configuration.
//!
//! The gateway reads everything it needs from the process environment at
//! startup. Only the toolbox server URL is mandatory; every other value has
//! a deployment-friendly default.

use crate::error::{GatewayError, Result};

/// Default listening port when `PORT` is unset or unparsable.
pub const DEFAULT_PORT: u16 = 8080;

/// Bucket name used when `GCS_PRODUCT_BUCKET` is unset.
pub const DEFAULT_BUCKET: &str = "placeholder-bucket";

/// Runtime configuration assembled from environment variables.
///
/// `MONGODB_CONNECTION_STRING` is deliberately absent: the document store is
/// reached exclusively through the toolbox server, which holds its own
/// credentials.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the MCP Toolbox server (`MCP_TOOLBOX_SERVER_URL`).
    pub toolbox_url: String,

    /// Object storage bucket holding product media (`GCS_PRODUCT_BUCKET`).
    pub gcs_bucket: String,

    /// Placeholder image served when no SKU-derived URL can be built
    /// (`FALLBACK_IMAGE_URL`).
    pub fallback_image_url: Option<String>,

    /// HTTP listening port (`PORT`).
    pub port: u16,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Assembles a configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let toolbox_url = lookup("MCP_TOOLBOX_SERVER_URL")
            .filter(|value| !value.is_empty())
            .ok_or(GatewayError::MissingEnv {
                name: "MCP_TOOLBOX_SERVER_URL",
            })?;

        let gcs_bucket = lookup("GCS_PRODUCT_BUCKET")
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BUCKET.to_string());

        let fallback_image_url = lookup("FALLBACK_IMAGE_URL").filter(|value| !value.is_empty());

        let port = lookup("PORT")
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Ok(Self {
            toolbox_url,
            gcs_bucket,
            fallback_image_url,
            port,
        })
    }

    /// Public base URL of the product media bucket.
    pub fn storage_base_url(&self) -> String {
        format!("https://storage.googleapis.com/{}", self.gcs_bucket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| map.get(name).map(|value| value.to_string())
    }

    #[test]
    fn toolbox_url_is_required() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("MCP_TOOLBOX_SERVER_URL"));
    }

    #[test]
    fn defaults_apply_when_optional_vars_are_unset() {
        let config =
            Config::from_lookup(lookup_from(&[("MCP_TOOLBOX_SERVER_URL", "http://localhost:5000")]))
                .unwrap();

        assert_eq!(config.toolbox_url, "http://localhost:5000");
        assert_eq!(config.gcs_bucket, DEFAULT_BUCKET);
        assert_eq!(config.fallback_image_url, None);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(
            config.storage_base_url(),
            "https://storage.googleapis.com/placeholder-bucket"
        );
    }

    #[test]
    fn explicit_values_win_and_bad_ports_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("MCP_TOOLBOX_SERVER_URL", "http://toolbox:5000"),
            ("GCS_PRODUCT_BUCKET", "shop-media"),
            ("FALLBACK_IMAGE_URL", "https://cdn.example.com/missing.jpg"),
            ("PORT", "not-a-port"),
        ]))
        .unwrap();

        assert_eq!(config.gcs_bucket, "shop-media");
        assert_eq!(
            config.fallback_image_url.as_deref(),
            Some("https://cdn.example.com/missing.jpg")
        );
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(
            config.storage_base_url(),
            "https://storage.googleapis.com/shop-media"
        );
    }

    #[test]
    fn empty_values_are_treated_as_unset() {
        let err = Config::from_lookup(lookup_from(&[("MCP_TOOLBOX_SERVER_URL", "")])).unwrap_err();
        assert!(matches!(err, GatewayError::MissingEnv { .. }));
    }
}
