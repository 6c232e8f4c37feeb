//! Application layer: the contact submission flow.
//!
//! Pure orchestration — validation, the busy guard, status text.  All I/O
//! happens behind the `MessageSink` trait injected from the
//! infrastructure layer.

pub mod submit_message;
