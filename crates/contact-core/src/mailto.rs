//! `mailto:` URI construction for the fallback delivery path.
//!
//! When the remote store is disabled (or the configuration never loaded),
//! a validated submission is handed to the user's mail client as a
//! `mailto:` URI with prefilled `subject` and `body` query parameters.
//! Whether a mail client is actually registered for the scheme cannot be
//! detected, which is why every status message on this path also names
//! [`FALLBACK_RECIPIENT`] for manual use.

use crate::contact::ValidContact;

/// The fixed recipient of contact messages, also quoted verbatim in
/// user-facing status text as the manual recourse.
pub const FALLBACK_RECIPIENT: &str = "hello@hafizfadzil.com";

/// Builds the complete `mailto:` URI for a validated contact.
///
/// Subject: `Consultation request from {name}`.
/// Body: the message followed by a `From: {name} <{email}>` sign-off.
/// Both are percent-encoded; the recipient address is left literal, as
/// mail clients expect.
pub fn build_mailto_uri(recipient: &str, contact: &ValidContact) -> String {
    let subject = format!("Consultation request from {}", contact.name);
    let body = format!(
        "{}\n\nFrom: {} <{}>",
        contact.message, contact.name, contact.email
    );
    format!(
        "mailto:{}?subject={}&body={}",
        recipient,
        percent_encode(&subject),
        percent_encode(&body)
    )
}

/// Percent-encodes a string for use in a URI query component.
///
/// Keeps the RFC 3986 §2.3 unreserved characters (`A–Z a–z 0–9 - _ . ~`)
/// literal and encodes every other byte of the UTF-8 representation as
/// `%XX`.  This is slightly stricter than a browser's
/// `encodeURIComponent` (which also leaves `!'()*` literal); encoding
/// those extra characters is always valid, so mail clients decode both
/// forms identically.
pub fn percent_encode(input: &str) -> String {
    // Worst case every byte expands to three characters.
    let mut out = String::with_capacity(input.len() * 3);
    for &byte in input.as_bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => {
                out.push('%');
                out.push(hex_digit(byte >> 4));
                out.push(hex_digit(byte & 0x0F));
            }
        }
    }
    out
}

/// Maps a nibble to its uppercase hex digit.
fn hex_digit(nibble: u8) -> char {
    match nibble {
        0..=9 => (b'0' + nibble) as char,
        _ => (b'A' + nibble - 10) as char,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::{validate, ContactFields};

    fn contact(name: &str, email: &str, message: &str) -> crate::contact::ValidContact {
        validate(&ContactFields {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
        .expect("test fixture must validate")
    }

    // ── percent_encode ────────────────────────────────────────────────────────

    #[test]
    fn test_percent_encode_keeps_unreserved_characters() {
        assert_eq!(
            percent_encode("AZaz09-_.~"),
            "AZaz09-_.~"
        );
    }

    #[test]
    fn test_percent_encode_space_and_at() {
        assert_eq!(percent_encode("a b@c"), "a%20b%40c");
    }

    #[test]
    fn test_percent_encode_newline() {
        assert_eq!(percent_encode("a\nb"), "a%0Ab");
    }

    #[test]
    fn test_percent_encode_multibyte_utf8() {
        // 'é' is 0xC3 0xA9 in UTF-8.
        assert_eq!(percent_encode("é"), "%C3%A9");
    }

    #[test]
    fn test_percent_encode_empty_string() {
        assert_eq!(percent_encode(""), "");
    }

    // ── build_mailto_uri ──────────────────────────────────────────────────────

    #[test]
    fn test_mailto_uri_contains_encoded_subject() {
        // Arrange
        let contact = contact("Jo", "jo@x.com", "Hi");

        // Act
        let uri = build_mailto_uri(FALLBACK_RECIPIENT, &contact);

        // Assert: subject names the sender.
        assert!(
            uri.contains("subject=Consultation%20request%20from%20Jo"),
            "subject missing from {uri}"
        );
    }

    #[test]
    fn test_mailto_uri_body_contains_message_and_sender_email() {
        let contact = contact("Jo", "jo@x.com", "Hi");
        let uri = build_mailto_uri(FALLBACK_RECIPIENT, &contact);

        let body = uri.split("body=").nth(1).expect("uri must have a body");
        assert!(body.starts_with("Hi"), "body must open with the message: {body}");
        assert!(body.contains("jo%40x.com"), "body must carry the sender email: {body}");
        assert!(body.contains("From%3A%20Jo"), "body must carry the sign-off: {body}");
    }

    #[test]
    fn test_mailto_uri_targets_recipient_literally() {
        let contact = contact("Jo", "jo@x.com", "Hi");
        let uri = build_mailto_uri("team@example.org", &contact);
        assert!(uri.starts_with("mailto:team@example.org?"), "got {uri}");
    }
}
