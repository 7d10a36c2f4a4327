//! Error types produced by the normalize crate.
//!
//! Almost everything in a profile record is optional, so almost nothing can
//! fail: missing or malformed optional fields are defaulted where they are
//! read and never surface here. What remains are the few cases where the
//! record cannot be turned into an output at all.
//!
//! # Error Categories
//!
//! | Error | Category | Description |
//! |-------|----------|-------------|
//! | [`InvalidIdentifier`](NormalizeError::InvalidIdentifier) | Decode | `username` is not valid percent-encoding |
//! | [`MalformedRecord`](NormalizeError::MalformedRecord) | Structure | Top-level value is not a JSON object |
//!
//! # Examples
//!
//! ```rust
//! use chrono::Utc;
//! use normalize::{normalize, NormalizeConfig, NormalizeError};
//! use serde_json::json;
//!
//! let raw = json!({ "urn": "ACoAA1", "username": "bad%zzname" });
//!
//! match normalize(&raw, Utc::now(), &NormalizeConfig::default()) {
//!     Ok(record) => println!("normalized {}", record.urn),
//!     Err(NormalizeError::InvalidIdentifier { value, .. }) => {
//!         println!("cannot decode username {value}");
//!     }
//!     Err(e) => println!("Error: {e}"),
//! }
//! ```
use thiserror::Error;

/// Errors that can occur while normalizing a single profile record.
///
/// Errors are per-record: the caller decides whether one failing record
/// fails a whole batch or is only flagged.
///
/// The enum is marked `#[non_exhaustive]`; callers should always include a
/// catch-all arm when matching.
///
/// ```rust
/// use normalize::NormalizeError;
///
/// let err = NormalizeError::MalformedRecord("expected a JSON object".into());
/// assert!(err.to_string().contains("JSON object"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NormalizeError {
    /// The profile `username` contains invalid percent-encoding.
    ///
    /// Raised when a `%` is not followed by two hex digits, or when the
    /// decoded bytes are not UTF-8.
    #[error("invalid percent-encoded identifier {value:?}: {reason}")]
    InvalidIdentifier {
        /// The raw `username` as received.
        value: String,
        /// What made the decode fail.
        reason: String,
    },

    /// The record is not a JSON object and has no fields to normalize.
    #[error("malformed profile record: {0}")]
    MalformedRecord(String),
}

impl NormalizeError {
    /// Returns a suggested HTTP status code for this error.
    ///
    /// Both variants describe syntactically valid JSON that cannot be
    /// processed, so both map to 422.
    ///
    /// ```rust
    /// use normalize::NormalizeError;
    ///
    /// let err = NormalizeError::MalformedRecord("array".into());
    /// assert_eq!(err.http_status_code(), 422);
    /// ```
    pub fn http_status_code(&self) -> u16 {
        422
    }

    /// Short stable code for structured logs and API bodies.
    pub fn code(&self) -> &'static str {
        match self {
            NormalizeError::InvalidIdentifier { .. } => "INVALID_IDENTIFIER",
            NormalizeError::MalformedRecord(_) => "MALFORMED_RECORD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_identifier_message_names_value() {
        let err = NormalizeError::InvalidIdentifier {
            value: "a%zz".into(),
            reason: "bad escape".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("a%zz"));
        assert!(msg.contains("bad escape"));
        assert_eq!(err.code(), "INVALID_IDENTIFIER");
    }

    #[test]
    fn all_errors_are_unprocessable() {
        let errs = [
            NormalizeError::MalformedRecord("x".into()),
            NormalizeError::InvalidIdentifier {
                value: "%".into(),
                reason: "truncated".into(),
            },
        ];
        for err in errs {
            assert_eq!(err.http_status_code(), 422);
        }
    }
}
