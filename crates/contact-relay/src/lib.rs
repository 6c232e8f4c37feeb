//! # contact-relay
//!
//! Config-driven relay for contact-form messages.  At startup a runtime
//! JSON configuration is fetched over HTTP; it selects one of two delivery
//! paths for validated submissions:
//!
//! - **Mail handoff** (the default, and the fallback whenever the config
//!   cannot be loaded): build a `mailto:` URI with a prefilled subject and
//!   body and hand it to the user's mail client.
//! - **Remote store**: write the message as a JSON document to a remote
//!   document store's REST API.
//!
//! ```text
//! main()
//!  └─ load_config_or_default(url)      -- warn + disabled default on failure
//!  └─ select_sink(&config, ...)        -- MailtoSink | RemoteStoreSink
//!  └─ SubmissionService::submit(...)   -- validate, guard, dispatch
//! ```
//!
//! # Layering
//!
//! - **`application`** – The submission flow: validation, the per-instance
//!   busy guard, the user-visible status strings.  Knows delivery only
//!   through the [`infrastructure::sinks::MessageSink`] trait.
//! - **`infrastructure`** – The HTTP-facing adapters: the config fetcher
//!   and the concrete sinks.
//!
//! The delivery strategy is chosen once, from the loaded configuration,
//! before the service is constructed.  A submission therefore never races
//! the config load: whatever configuration the process started with is the
//! configuration every submission observes.

pub mod application;
pub mod infrastructure;

pub use application::submit_message::{SubmissionOutcome, SubmissionService};
pub use infrastructure::config_fetch::{fetch_config, load_config_or_default, ConfigFetchError};
pub use infrastructure::sinks::{select_sink, Delivery, MessageSink, SinkError};
