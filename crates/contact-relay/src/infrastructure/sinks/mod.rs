//! Delivery sinks for validated contact messages.
//!
//! The original flow decided *at submit time* whether to open a mail
//! client or to import and call a remote store SDK.  Here the decision is
//! made once, from the loaded configuration, by [`select_sink`]; the
//! submission flow then only ever talks to the [`MessageSink`] trait.
//!
//! # Implementations
//!
//! | Sink              | Selected when        | Delivery                         |
//! |-------------------|----------------------|----------------------------------|
//! | [`MailtoSink`]    | store disabled       | `mailto:` URI for the mail client|
//! | [`RemoteStoreSink`] | store enabled      | REST document write              |
//! | [`RecordingSink`] | tests                | in-memory, configurable outcome  |
//!
//! The [`RecordingSink`] is always compiled (not guarded by `#[cfg]`) so
//! integration tests can exercise the submission flow without a network.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use contact_core::config::AppConfig;
use contact_core::contact::ContactMessage;

pub mod mailto;
pub mod remote_store;

pub use mailto::MailtoSink;
pub use remote_store::{RemoteStoreSink, CONTACT_COLLECTION};

/// Error type for delivery operations.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The store is enabled but the configuration carried no connection
    /// parameters.  Surfaced at delivery time so the user still gets the
    /// manual-fallback status rather than a startup crash.
    #[error("remote store is enabled but clientConfig is missing")]
    MissingClientConfig,

    /// The HTTP request to the store failed (DNS, connect, read).
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("store returned HTTP {0}")]
    Status(reqwest::StatusCode),
}

/// How a message left the system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// A `mailto:` URI was prepared for the user's mail client.
    MailHandoff { uri: String },

    /// The message was written to the remote store.  `document_id` is the
    /// store-assigned id when the write response carried one.
    Stored { document_id: Option<String> },
}

/// The delivery capability the submission flow depends on.
///
/// Implementors must be cheap to share behind an `Arc`; one sink instance
/// serves every submission of a process.
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Delivers one validated message.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] when the message could not be handed off.
    /// Implementations do not retry; the submission flow surfaces the
    /// manual fallback instead.
    async fn deliver(&self, message: &ContactMessage) -> Result<Delivery, SinkError>;

    /// Short sink name for log events (`"mailto"`, `"remote-store"`).
    fn kind(&self) -> &'static str;
}

/// Selects the delivery sink for the loaded configuration.
///
/// Remote store enabled → [`RemoteStoreSink`] (even when `clientConfig`
/// is absent — that failure belongs to delivery, not startup).  Otherwise,
/// and always when the config load fell back to the default, the
/// [`MailtoSink`] addressed at `recipient`.
pub fn select_sink(
    config: &AppConfig,
    http: reqwest::Client,
    recipient: &str,
    collection: &str,
) -> Arc<dyn MessageSink> {
    if config.remote_store_enabled() {
        Arc::new(RemoteStoreSink::new(
            http,
            config.provider.remote_store.client_config.clone(),
            collection,
        ))
    } else {
        Arc::new(MailtoSink::new(recipient))
    }
}

// ── Recording sink (always compiled for tests) ────────────────────────────────

/// An in-memory sink with a configurable outcome.
///
/// Records every delivered message so tests can assert on exactly what the
/// submission flow dispatched.  Makes no network calls.
///
/// # Example
///
/// ```ignore
/// let sink = Arc::new(RecordingSink::succeeding());
/// let svc = SubmissionService::new(Arc::clone(&sink), "ua", "fallback@example.org");
/// svc.submit(fields).await;
/// assert_eq!(sink.delivered().len(), 1);
/// ```
pub struct RecordingSink {
    delivered: std::sync::Mutex<Vec<ContactMessage>>,
    fail: bool,
}

impl RecordingSink {
    /// A sink whose every delivery succeeds with a fixed document id.
    pub fn succeeding() -> Self {
        Self {
            delivered: std::sync::Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// A sink whose every delivery fails with a synthetic 503.
    pub fn failing() -> Self {
        Self {
            delivered: std::sync::Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Messages the submission flow handed to this sink, in order.
    pub fn delivered(&self) -> Vec<ContactMessage> {
        self.delivered.lock().expect("recording sink poisoned").clone()
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn deliver(&self, message: &ContactMessage) -> Result<Delivery, SinkError> {
        if self.fail {
            return Err(SinkError::Status(
                reqwest::StatusCode::SERVICE_UNAVAILABLE,
            ));
        }
        self.delivered
            .lock()
            .expect("recording sink poisoned")
            .push(message.clone());
        Ok(Delivery::Stored {
            document_id: Some("recorded".to_string()),
        })
    }

    fn kind(&self) -> &'static str {
        "recording"
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use contact_core::config::{ProviderConfig, RemoteStoreConfig};

    #[tokio::test]
    async fn test_select_sink_defaults_to_mailto() {
        let sink = select_sink(
            &AppConfig::default(),
            reqwest::Client::new(),
            "hello@hafizfadzil.com",
            CONTACT_COLLECTION,
        );
        assert_eq!(sink.kind(), "mailto");
    }

    #[tokio::test]
    async fn test_select_sink_uses_remote_store_when_enabled() {
        let config = AppConfig {
            provider: ProviderConfig {
                remote_store: RemoteStoreConfig {
                    enabled: true,
                    client_config: None,
                },
            },
        };
        let sink = select_sink(
            &config,
            reqwest::Client::new(),
            "hello@hafizfadzil.com",
            CONTACT_COLLECTION,
        );
        assert_eq!(sink.kind(), "remote-store");
    }
}
