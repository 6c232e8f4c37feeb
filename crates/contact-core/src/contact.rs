//! Contact form fields, validation rules, and the delivered message document.
//!
//! # Validation contract
//!
//! Validation is a deliberately loose sanity check, not RFC 5322 email
//! verification.  After trimming surrounding whitespace:
//!
//! - `name` must be non-empty,
//! - `email` must be `local@domain.tld`-shaped (exactly one `@`, no
//!   whitespace, and a dot inside the domain with characters on both
//!   sides),
//! - `message` must be non-empty.
//!
//! Anything that passes is accepted; deliverability is the mail system's
//! problem, not ours.
//!
//! # The message document
//!
//! A validated submission becomes a [`ContactMessage`]: the three trimmed
//! fields plus a submit-time UTC timestamp and the submitting client's
//! identification string.  The document's wire names (`createdAt`, `ua`)
//! are fixed because the remote store collection is shared with other
//! writers of the same shape.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Validation ────────────────────────────────────────────────────────────────

/// Raw, untrimmed form fields as the user entered them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Reason a submission failed validation.
///
/// These are user-input problems, surfaced as guidance text rather than
/// logged — there is nothing for an operator to act on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// `name` was empty after trimming.
    #[error("name must not be empty")]
    EmptyName,

    /// `email` did not match the `local@domain.tld` shape.
    #[error("email address {0:?} is not valid")]
    InvalidEmail(String),

    /// `message` was empty after trimming.
    #[error("message must not be empty")]
    EmptyMessage,
}

/// A contact submission that has passed validation.
///
/// Fields are trimmed.  Constructed only by [`validate`], so holding a
/// `ValidContact` is proof the rules above were applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Applies the validation rules to raw form fields.
///
/// Returns the first failing rule in field order (name, email, message),
/// mirroring the order the form presents them.
///
/// # Errors
///
/// Returns a [`ValidationError`] naming the offending field.
pub fn validate(fields: &ContactFields) -> Result<ValidContact, ValidationError> {
    let name = fields.name.trim();
    let email = fields.email.trim();
    let message = fields.message.trim();

    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if !email_shape_ok(email) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }
    if message.is_empty() {
        return Err(ValidationError::EmptyMessage);
    }

    Ok(ValidContact {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    })
}

/// Checks the `local@domain.tld` shape.
///
/// Equivalent to the pattern `^[^\s@]+@[^\s@]+\.[^\s@]+$`: exactly one
/// `@`, a non-empty whitespace-free local part, and a domain containing an
/// interior dot.  A dedicated regex engine is not worth a dependency for a
/// single structural check.
fn email_shape_ok(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    // The character classes exclude whitespace and any further '@'.
    if email.chars().any(char::is_whitespace) || domain.contains('@') {
        return false;
    }
    // An interior dot: at least one character on each side.  Byte positions
    // are safe here because '.' is ASCII.
    let bytes = domain.as_bytes();
    bytes
        .iter()
        .enumerate()
        .any(|(i, &b)| b == b'.' && i > 0 && i < bytes.len() - 1)
}

// ── The message document ──────────────────────────────────────────────────────

/// The document delivered for one validated submission.
///
/// Transient: constructed at submit time, handed to exactly one delivery
/// path, never stored locally and never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
    /// Submit-time UTC timestamp, RFC 3339 with millisecond precision.
    #[serde(rename = "createdAt")]
    pub created_at: String,
    /// Identification string of the submitting client.
    #[serde(rename = "ua")]
    pub user_agent: String,
}

impl ContactMessage {
    /// Builds the document for `contact`, stamped with the current time.
    pub fn new(contact: ValidContact, user_agent: &str) -> Self {
        Self::with_timestamp(contact, user_agent, SystemTime::now())
    }

    /// Builds the document with an explicit timestamp (deterministic tests).
    pub fn with_timestamp(contact: ValidContact, user_agent: &str, at: SystemTime) -> Self {
        Self {
            name: contact.name,
            email: contact.email,
            message: contact.message,
            created_at: format_rfc3339_millis(at),
            user_agent: user_agent.to_string(),
        }
    }
}

// ── Timestamp formatting ──────────────────────────────────────────────────────

/// Formats a `SystemTime` as an RFC 3339 UTC timestamp with millisecond
/// precision, e.g. `2023-11-14T22:13:20.000Z`.
///
/// Times before the Unix epoch clamp to the epoch; the only caller stamps
/// submissions with the current wall clock.
///
/// # Why hand-rolled?
///
/// This is the crate's single use of calendar arithmetic, so a date/time
/// dependency is not pulled in for it.  The civil-date conversion below is
/// the standard days-to-Gregorian algorithm (era/year-of-era decomposition
/// over the 146097-day 400-year cycle), valid for any date this system
/// will ever stamp.
pub fn format_rfc3339_millis(at: SystemTime) -> String {
    let since_epoch = at.duration_since(UNIX_EPOCH).unwrap_or_default();
    let secs = since_epoch.as_secs();
    let millis = since_epoch.subsec_millis();

    let days = (secs / 86_400) as i64;
    let rem = secs % 86_400;
    let (hour, minute, second) = (rem / 3_600, (rem % 3_600) / 60, rem % 60);
    let (year, month, day) = civil_from_days(days);

    format!(
        "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}.{millis:03}Z"
    )
}

/// Converts days since 1970-01-01 to a Gregorian (year, month, day).
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    // Shift the epoch from 1970-01-01 to 0000-03-01 so leap days land at
    // the end of the cycle year.
    let z = days + 719_468;
    let era = (if z >= 0 { z } else { z - 146_096 }) / 146_097;
    let doe = (z - era * 146_097) as u64; // day of era   [0, 146096]
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365; // [0, 399]
    let year = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // day of year  [0, 365]
    let mp = (5 * doy + 2) / 153; // March-based month  [0, 11]
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32; // [1, 31]
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32; // [1, 12]
    (if month <= 2 { year + 1 } else { year }, month, day)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
