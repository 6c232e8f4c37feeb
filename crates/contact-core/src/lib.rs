//! # contact-core
//!
//! Shared library for contact-relay containing the runtime configuration
//! model, contact-field validation rules, the persisted message document,
//! and `mailto:` URI construction.
//!
//! This crate is pure: it performs no I/O, spawns no tasks, and has no
//! dependencies on HTTP clients or async runtimes.  Everything that talks
//! to the network lives in the `contact-relay` crate.
//!
//! # What lives where
//!
//! - **`config`** – The runtime configuration document fetched at startup.
//!   It decides whether validated messages are written to a remote document
//!   store or handed to the user's mail client.  Parsing failures always
//!   degrade to the disabled default; callers never operate without a
//!   configuration value.
//!
//! - **`contact`** – Raw form fields, the validation rules applied to them,
//!   and the [`ContactMessage`] document that is ultimately delivered.
//!
//! - **`mailto`** – Percent-encoding and assembly of the `mailto:` URI used
//!   on the fallback delivery path.

pub mod config;
pub mod contact;
pub mod mailto;

// Re-export the most-used types at the crate root so callers can write
// `contact_core::AppConfig` instead of `contact_core::config::AppConfig`.
pub use config::{AppConfig, ProviderConfig, RemoteStoreClientConfig, RemoteStoreConfig};
pub use contact::{validate, ContactFields, ContactMessage, ValidContact, ValidationError};
pub use mailto::{build_mailto_uri, percent_encode, FALLBACK_RECIPIENT};
