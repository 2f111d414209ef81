//! Record identifier conversion.
//!
//! # Invariants
//! - Parsing never falls back to a zero/empty identifier; malformed input is
//!   always reported to the caller.
//! - Rendered identifiers are lowercase hex.

use mongodb::bson::oid::ObjectId;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Native store identifier (12 bytes, rendered as 24 hex chars).
pub type RecordId = ObjectId;

const MAX_ECHOED_ID_CHARS: usize = 64;

/// Returned when a caller-supplied identifier is not a valid ObjectId.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidIdError {
    value: String,
}

impl InvalidIdError {
    /// The rejected input, capped for safe logging.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Display for InvalidIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid identifier `{}`: expected 24 hex characters",
            self.value
        )
    }
}

impl Error for InvalidIdError {}

/// Parses a caller-supplied identifier string.
///
/// # Errors
/// - Returns `InvalidIdError` unless `value` is exactly 24 hex characters.
pub fn parse_record_id(value: &str) -> Result<RecordId, InvalidIdError> {
    ObjectId::parse_str(value).map_err(|_| InvalidIdError {
        value: value.chars().take(MAX_ECHOED_ID_CHARS).collect(),
    })
}

/// Renders an identifier in its API-facing form.
pub fn record_id_to_string(id: &RecordId) -> String {
    id.to_hex()
}

#[cfg(test)]
mod tests {
    use super::{parse_record_id, record_id_to_string, RecordId};

    #[test]
    fn parse_accepts_generated_ids() {
        let id = RecordId::new();
        let text = record_id_to_string(&id);
        assert_eq!(text.len(), 24);
        assert_eq!(parse_record_id(&text).unwrap(), id);
    }

    #[test]
    fn parse_accepts_uppercase_and_renders_lowercase() {
        let id = parse_record_id("65A1B2C3D4E5F60718293A4B").unwrap();
        assert_eq!(record_id_to_string(&id), "65a1b2c3d4e5f60718293a4b");
    }

    #[test]
    fn parse_rejects_malformed_values() {
        for value in [
            "",
            "not-an-id",
            "65a1b2c3d4e5f60718293a4",
            "65a1b2c3d4e5f60718293a4bb",
            "zza1b2c3d4e5f60718293a4b",
            " 65a1b2c3d4e5f60718293a4b",
        ] {
            let err = parse_record_id(value).unwrap_err();
            assert_eq!(err.value(), value);
            assert!(err.to_string().contains("24 hex characters"));
        }
    }

    #[test]
    fn parse_error_caps_echoed_input() {
        let long = "x".repeat(500);
        let err = parse_record_id(&long).unwrap_err();
        assert_eq!(err.value().len(), 64);
    }
}
