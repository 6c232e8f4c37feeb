//! Infrastructure layer: HTTP-facing adapters.
//!
//! Everything that touches the network lives here — the runtime config
//! fetcher and the concrete delivery sinks.  The application layer sees
//! only the `MessageSink` trait.

pub mod config_fetch;
pub mod sinks;
