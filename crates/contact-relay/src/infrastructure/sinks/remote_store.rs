//! Remote document store sink.
//!
//! When the runtime configuration enables the store, validated messages
//! are written as JSON documents to its REST API:
//!
//! ```text
//! POST {endpoint}/{collection}[?key={api_key}]
//! Content-Type: application/json
//!
//! {"name":..., "email":..., "message":..., "createdAt":..., "ua":...}
//! ```
//!
//! Any 2xx answer is a successful write; a response body of the shape
//! `{"id": "..."}` surfaces the store-assigned document id, and anything
//! else is tolerated silently.  Failures are not retried — the submission
//! flow reports the manual fallback address instead.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use contact_core::config::RemoteStoreClientConfig;
use contact_core::contact::ContactMessage;

use super::{Delivery, MessageSink, SinkError};

/// The fixed collection contact messages are written to.
pub const CONTACT_COLLECTION: &str = "contactMessages";

/// Writes contact messages to a remote document store over HTTP.
pub struct RemoteStoreSink {
    http: reqwest::Client,
    client_config: Option<RemoteStoreClientConfig>,
    collection: String,
}

/// The store's write acknowledgement.  Only the optional document id is
/// of interest; unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct WriteAck {
    #[serde(default)]
    id: Option<String>,
}

impl RemoteStoreSink {
    /// Creates a sink for `collection`.
    ///
    /// `client_config` may be `None` when the configuration enabled the
    /// store without supplying connection parameters; the error is
    /// deferred to [`MessageSink::deliver`] so it reaches the user as a
    /// delivery failure with the manual fallback.
    pub fn new(
        http: reqwest::Client,
        client_config: Option<RemoteStoreClientConfig>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            http,
            client_config,
            collection: collection.into(),
        }
    }

    fn write_url(&self, config: &RemoteStoreClientConfig) -> String {
        format!(
            "{}/{}",
            config.endpoint.trim_end_matches('/'),
            self.collection
        )
    }
}

#[async_trait]
impl MessageSink for RemoteStoreSink {
    async fn deliver(&self, message: &ContactMessage) -> Result<Delivery, SinkError> {
        let config = self
            .client_config
            .as_ref()
            .ok_or(SinkError::MissingClientConfig)?;

        let mut request = self.http.post(self.write_url(config)).json(message);
        if let Some(key) = &config.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SinkError::Status(status));
        }

        // The ack body is informational only; a store that answers 2xx
        // with an empty or non-JSON body still counts as a write.
        let document_id = response
            .json::<WriteAck>()
            .await
            .ok()
            .and_then(|ack| ack.id);
        debug!(?document_id, collection = %self.collection, "document written");

        Ok(Delivery::Stored { document_id })
    }

    fn kind(&self) -> &'static str {
        "remote-store"
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
