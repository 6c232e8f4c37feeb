//! Runtime configuration loader.
//!
//! Fetches the JSON configuration document once at startup.  The fetch
//! always bypasses intermediary caches (`Cache-Control: no-store`) so a
//! just-deployed config change takes effect on the next start rather than
//! whenever a cache expires.
//!
//! # Degradation
//!
//! Loading is fire-and-forget with respect to the rest of the process: any
//! failure — unreachable host, non-success status, malformed JSON — is
//! logged once at `warn!` and replaced by the disabled default, and the
//! process proceeds as if that were the real configuration.  No retry, no
//! blocking of dependent components.

use reqwest::header::{HeaderValue, CACHE_CONTROL, PRAGMA};
use thiserror::Error;
use tracing::{info, warn};

use contact_core::config::AppConfig;

/// Error type for configuration fetch operations.
#[derive(Debug, Error)]
pub enum ConfigFetchError {
    /// The HTTP request itself failed (DNS, connect, read).
    #[error("config request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("config endpoint returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// The response body was not a well-formed configuration document.
    #[error("malformed config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fetches and parses the configuration document at `url`.
///
/// Sends `Cache-Control: no-store` (plus `Pragma: no-cache` for HTTP/1.0
/// intermediaries) so the response is always the freshest copy.
///
/// # Errors
///
/// Returns [`ConfigFetchError`] for transport failures, non-2xx statuses,
/// and malformed JSON.  Callers normally go through
/// [`load_config_or_default`] instead of handling these individually.
pub async fn fetch_config(
    client: &reqwest::Client,
    url: &str,
) -> Result<AppConfig, ConfigFetchError> {
    let response = client
        .get(url)
        .header(CACHE_CONTROL, HeaderValue::from_static("no-store"))
        .header(PRAGMA, HeaderValue::from_static("no-cache"))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ConfigFetchError::Status(status));
    }

    let body = response.text().await?;
    Ok(AppConfig::from_json(&body)?)
}

/// Loads the configuration, substituting the disabled default on failure.
///
/// This is the startup entry point: the returned value is always usable,
/// and the failure (if any) has already been logged.
pub async fn load_config_or_default(client: &reqwest::Client, url: &str) -> AppConfig {
    match fetch_config(client, url).await {
        Ok(config) => {
            info!(
                remote_store_enabled = config.remote_store_enabled(),
                "runtime configuration loaded"
            );
            config
        }
        Err(e) => {
            warn!(%url, error = %e, "config not loaded; using disabled defaults");
            AppConfig::default()
        }
    }
}
