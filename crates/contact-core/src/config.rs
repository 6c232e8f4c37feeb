//! Runtime configuration document.
//!
//! The configuration is a small JSON document served next to the site
//! (originally `/config/app-config.json`) and fetched once at startup.
//! Its only decision of consequence is whether the remote document store
//! is enabled:
//!
//! ```json
//! {
//!   "provider": {
//!     "remoteStore": {
//!       "enabled": true,
//!       "clientConfig": {
//!         "endpoint": "https://store.example.com/v1",
//!         "api_key": "AIza..."
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! # Degradation contract
//!
//! Loading is best-effort.  A missing document, a non-success HTTP status,
//! or malformed JSON all resolve to [`AppConfig::default()`] — the literal
//! disabled configuration — so dependents never observe an absent value.
//! That substitution happens in `contact-relay`'s config fetcher; this
//! module only defines the shape and the default.
//!
//! # Serde default values
//!
//! Every level of the document carries `#[serde(default)]` so that a
//! partial document (e.g. `{}` or `{"provider":{}}`) parses to the same
//! value as the disabled default rather than failing.  Only a structurally
//! malformed `clientConfig` rejects the whole document, which the loader
//! then treats as a load failure.

use serde::{Deserialize, Serialize};

/// Top-level runtime configuration.
///
/// Immutable after construction: the loader produces one value at startup
/// and hands it to whoever needs it.  There is no ambient global copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// The message-delivery provider section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Remote document store settings.  Disabled unless the document says
    /// otherwise.
    #[serde(default, rename = "remoteStore")]
    pub remote_store: RemoteStoreConfig,
}

/// Remote document store settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteStoreConfig {
    /// When `false` (the default), validated messages are handed to the
    /// user's mail client instead of being written to the store.
    #[serde(default)]
    pub enabled: bool,

    /// Connection parameters for the store's REST API.  May be absent even
    /// when `enabled` is `true`; that combination is a delivery-time error,
    /// not a parse error.
    #[serde(
        default,
        rename = "clientConfig",
        skip_serializing_if = "Option::is_none"
    )]
    pub client_config: Option<RemoteStoreClientConfig>,
}

/// Connection parameters for the remote document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteStoreClientConfig {
    /// Base URL of the document store REST API, without a trailing
    /// collection path (e.g. `https://store.example.com/v1`).
    pub endpoint: String,

    /// Optional API key, sent as a `key` query parameter on writes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl AppConfig {
    /// Parses a configuration document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error when the text is not valid
    /// JSON or a present field has the wrong shape.  Callers are expected
    /// to substitute [`AppConfig::default()`] on failure.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Returns `true` when the remote document store path is enabled.
    pub fn remote_store_enabled(&self) -> bool {
        self.provider.remote_store.enabled
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_remote_store_disabled() {
        let cfg = AppConfig::default();
        assert!(!cfg.remote_store_enabled());
        assert!(cfg.provider.remote_store.client_config.is_none());
    }

    #[test]
    fn test_default_equals_literal_disabled_document() {
        // The documented fallback document must parse to exactly the
        // default value.
        let cfg =
            AppConfig::from_json(r#"{"provider":{"remoteStore":{"enabled":false}}}"#).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_empty_document_parses_to_default() {
        let cfg = AppConfig::from_json("{}").unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_partial_document_parses_to_default() {
        let cfg = AppConfig::from_json(r#"{"provider":{}}"#).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_enabled_document_with_client_config_parses() {
        // Arrange
        let text = r#"{
            "provider": {
                "remoteStore": {
                    "enabled": true,
                    "clientConfig": {
                        "endpoint": "https://store.example.com/v1",
                        "api_key": "secret"
                    }
                }
            }
        }"#;

        // Act
        let cfg = AppConfig::from_json(text).unwrap();

        // Assert
        assert!(cfg.remote_store_enabled());
        let client = cfg.provider.remote_store.client_config.unwrap();
        assert_eq!(client.endpoint, "https://store.example.com/v1");
        assert_eq!(client.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_enabled_without_client_config_parses() {
        // enabled=true with no connection parameters is a valid document;
        // the delivery layer reports the missing config at write time.
        let cfg =
            AppConfig::from_json(r#"{"provider":{"remoteStore":{"enabled":true}}}"#).unwrap();
        assert!(cfg.remote_store_enabled());
        assert!(cfg.provider.remote_store.client_config.is_none());
    }

    #[test]
    fn test_malformed_json_returns_error() {
        assert!(AppConfig::from_json("{not json").is_err());
    }

    #[test]
    fn test_wrongly_shaped_client_config_returns_error() {
        // A clientConfig that is present but not an object rejects the
        // whole document, which the loader maps to the disabled default.
        let result =
            AppConfig::from_json(r#"{"provider":{"remoteStore":{"enabled":true,"clientConfig":7}}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let cfg = AppConfig {
            provider: ProviderConfig {
                remote_store: RemoteStoreConfig {
                    enabled: true,
                    client_config: Some(RemoteStoreClientConfig {
                        endpoint: "https://store.example.com".to_string(),
                        api_key: None,
                    }),
                },
            },
        };
        let text = serde_json::to_string(&cfg).unwrap();
        let restored = AppConfig::from_json(&text).unwrap();
        assert_eq!(cfg, restored);
    }

    #[test]
    fn test_serialized_document_uses_camel_case_wire_names() {
        let cfg = AppConfig::default();
        let text = serde_json::to_string(&cfg).unwrap();
        assert!(text.contains("remoteStore"), "wire name must be camelCase: {text}");
    }
}
