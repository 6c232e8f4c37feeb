//! Mail-client handoff sink.
//!
//! The default delivery path: build a `mailto:` URI with a prefilled
//! subject and body and return it for the caller to open.  Delivery here
//! means "the URI was prepared" — whether a mail client is installed and
//! registered for the scheme is unknowable from this side, which is why
//! the submission flow's status text always quotes the manual fallback
//! address alongside.

use async_trait::async_trait;

use contact_core::contact::{ContactMessage, ValidContact};
use contact_core::mailto::build_mailto_uri;

use super::{Delivery, MessageSink, SinkError};

/// Builds `mailto:` URIs addressed at a fixed recipient.
pub struct MailtoSink {
    recipient: String,
}

impl MailtoSink {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
        }
    }
}

#[async_trait]
impl MessageSink for MailtoSink {
    /// Never fails: URI construction is pure string assembly.
    async fn deliver(&self, message: &ContactMessage) -> Result<Delivery, SinkError> {
        let contact = ValidContact {
            name: message.name.clone(),
            email: message.email.clone(),
            message: message.message.clone(),
        };
        Ok(Delivery::MailHandoff {
            uri: build_mailto_uri(&self.recipient, &contact),
        })
    }

    fn kind(&self) -> &'static str {
        "mailto"
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
