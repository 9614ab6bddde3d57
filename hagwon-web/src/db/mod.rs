//! Content repository query modules
//!
//! One module per record collection, each exposing the uniform contract:
//! list (newest first), filter, create with validation before any write,
//! full-replace update, hard delete.

pub mod lectures;
pub mod materials;
pub mod student_records;

use hagwon_common::{Error, Result};

/// Decode a JSON-array TEXT column into a tag/url list
///
/// Malformed stored values read as empty rather than failing the whole
/// listing; unknown tag values inside a well-formed array pass through.
pub(crate) fn decode_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

/// Encode a tag/url list for storage
pub(crate) fn encode_list(values: &[String]) -> Result<String> {
    serde_json::to_string(values)
        .map_err(|e| Error::Internal(format!("Failed to encode list column: {}", e)))
}

/// Reject tag values outside the grade catalog
pub(crate) fn validate_grades(grade: &[String]) -> Result<()> {
    for value in grade {
        if !hagwon_common::grades::is_known(value) {
            return Err(Error::Validation(format!("Unknown grade value: {}", value)));
        }
    }
    Ok(())
}
