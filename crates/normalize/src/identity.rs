//! Public identifier decoding.
//!
//! LinkedIn usernames arrive percent-encoded (`jos%C3%A9-garc%C3%ADa`). The
//! decoded form is both the public identifier and the tail of the profile URL.
//! Decoding is strict: a stray `%` or a non-UTF-8 byte sequence is an error
//! for the record rather than a silently mangled identifier.
use percent_encoding::percent_decode_str;

use crate::error::NormalizeError;

/// Percent-decodes a username.
///
/// ```rust
/// use normalize::decode_identifier;
///
/// assert_eq!(decode_identifier("jos%C3%A9").unwrap(), "josé");
/// assert!(decode_identifier("100%").is_err());
/// ```
pub fn decode_identifier(username: &str) -> Result<String, NormalizeError> {
    let invalid = |reason: String| NormalizeError::InvalidIdentifier {
        value: username.to_string(),
        reason,
    };

    let bytes = username.as_bytes();
    for (at, _) in bytes.iter().enumerate().filter(|(_, b)| **b == b'%') {
        let escape = bytes.get(at + 1..at + 3);
        if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
            return Err(invalid(format!("malformed escape at byte {at}")));
        }
    }

    percent_decode_str(username)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| invalid(format!("decoded bytes are not UTF-8: {e}")))
}

/// Profile URL for a decoded identifier; `""` when there is no identifier.
pub fn profile_url(base: &str, identifier: &str) -> String {
    if identifier.is_empty() {
        String::new()
    } else {
        format!("{base}{identifier}")
    }
}
