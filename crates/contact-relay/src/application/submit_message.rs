//! The contact submission flow.
//!
//! One [`SubmissionService`] exists per form instance.  A submission moves
//! through Idle → Validating → Dispatching → Idle; the service itself only
//! tracks whether a dispatch is in flight (the busy guard), because every
//! other state is transient within a single `submit` call.
//!
//! # The busy guard
//!
//! At most one submission may be dispatching at any time.  The guard is a
//! plain `AtomicBool` — a reentrancy latch for one instance, not a lock
//! across instances or processes.  It is acquired with a compare-exchange
//! and released by an RAII drop guard, so every exit path (success,
//! validation failure, dispatch failure, panic) releases it.
//!
//! # Status text
//!
//! Each outcome carries the exact user-facing status line.  Delivery
//! failures and the mail handoff both quote the fallback address, because
//! neither path can confirm the message actually reached a human: a mail
//! client may not be registered for `mailto:`, and a failed store write
//! leaves manual email as the only recourse.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, error, info};
use uuid::Uuid;

use contact_core::contact::{validate, ContactFields, ContactMessage, ValidationError};

use crate::infrastructure::sinks::{Delivery, MessageSink};

/// Guidance shown when validation fails, mirroring the form's own wording.
const INVALID_FIELDS_STATUS: &str = "Please fill in your name, a valid email, and a message.";

/// Result of one `submit` call, with the user-visible status line.
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// A prior submission is still dispatching; this call was a no-op.
    Busy,

    /// Validation failed; nothing was dispatched.
    Invalid {
        reason: ValidationError,
        status: String,
    },

    /// The message was handed to a delivery path.
    Delivered {
        delivery: Delivery,
        status: String,
    },

    /// Dispatch failed; the status quotes the manual fallback address.
    Failed { status: String },
}

impl SubmissionOutcome {
    /// The user-visible status line, if this outcome produces one.
    ///
    /// `Busy` is the only silent outcome: a guarded-out call must not
    /// disturb whatever status the in-flight submission will report.
    pub fn status(&self) -> Option<&str> {
        match self {
            Self::Busy => None,
            Self::Invalid { status, .. }
            | Self::Delivered { status, .. }
            | Self::Failed { status } => Some(status),
        }
    }

    /// Whether the caller should clear its form fields.
    ///
    /// Only a confirmed store write clears the form; the mail handoff
    /// keeps the fields so the user can retry if no mail client opened.
    pub fn clears_form(&self) -> bool {
        matches!(
            self,
            Self::Delivered {
                delivery: Delivery::Stored { .. },
                ..
            }
        )
    }
}

/// Validates contact submissions and dispatches them through the
/// configured delivery sink.
///
/// The sink is injected at construction, after the configuration has
/// resolved — the service never reads configuration ambiently, so a
/// submission cannot race the config load.
pub struct SubmissionService {
    sink: Arc<dyn MessageSink>,
    busy: AtomicBool,
    user_agent: String,
    fallback_address: String,
}

impl SubmissionService {
    /// Creates a service delivering through `sink`.
    ///
    /// `user_agent` is stamped into every delivered document;
    /// `fallback_address` is quoted in handoff and failure status text.
    pub fn new(
        sink: Arc<dyn MessageSink>,
        user_agent: impl Into<String>,
        fallback_address: impl Into<String>,
    ) -> Self {
        Self {
            sink,
            busy: AtomicBool::new(false),
            user_agent: user_agent.into(),
            fallback_address: fallback_address.into(),
        }
    }

    /// Runs one submission: guard, validate, dispatch.
    ///
    /// Never returns an error — every failure mode is an outcome with
    /// user-facing status text, because nothing in this flow is fatal.
    pub async fn submit(&self, fields: ContactFields) -> SubmissionOutcome {
        // Acquire the busy guard.  A lost race means another submission is
        // dispatching; per the contract this call is a silent no-op.
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("submission ignored: a prior submission is still in flight");
            return SubmissionOutcome::Busy;
        }
        let _guard = BusyGuard(&self.busy);

        let submission_id = Uuid::new_v4();

        let contact = match validate(&fields) {
            Ok(contact) => contact,
            Err(reason) => {
                debug!(%submission_id, %reason, "submission rejected by validation");
                return SubmissionOutcome::Invalid {
                    reason,
                    status: INVALID_FIELDS_STATUS.to_string(),
                };
            }
        };

        let message = ContactMessage::new(contact, &self.user_agent);
        debug!(%submission_id, sink = self.sink.kind(), "dispatching contact message");

        match self.sink.deliver(&message).await {
            Ok(delivery @ Delivery::MailHandoff { .. }) => {
                info!(%submission_id, "mail client handoff prepared");
                SubmissionOutcome::Delivered {
                    delivery,
                    status: format!(
                        "Opened your email app. If not, please email {}",
                        self.fallback_address
                    ),
                }
            }
            Ok(delivery @ Delivery::Stored { .. }) => {
                info!(%submission_id, "contact message stored");
                SubmissionOutcome::Delivered {
                    delivery,
                    status: "Thanks! Your message has been sent.".to_string(),
                }
            }
            Err(e) => {
                // Logged for diagnostics; the user sees only the manual
                // recourse.  No automatic retry.
                error!(%submission_id, error = %e, "contact message delivery failed");
                SubmissionOutcome::Failed {
                    status: format!(
                        "Error sending. Please email {} instead.",
                        self.fallback_address
                    ),
                }
            }
        }
    }
}

/// Releases the busy flag when a submission leaves scope, whatever the
/// exit path.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
