//! Table text encoding.
//!
//! A table is persisted as a JSON array of objects with no header. Decoding
//! anything else is corruption of the persisted state and is escalated
//! rather than read as an empty table.

use crate::error::{CollectionError, CollectionResult};
use crate::record::Record;

/// Encodes a record sequence as table text.
///
/// # Errors
///
/// Returns an error if a record cannot be serialized.
pub fn encode_table(records: &[Record], pretty: bool) -> CollectionResult<String> {
    let text = if pretty {
        serde_json::to_string_pretty(records)?
    } else {
        serde_json::to_string(records)?
    };
    Ok(text)
}

/// Decodes table text into a record sequence.
///
/// # Errors
///
/// Returns [`CollectionError::CorruptedTable`] if `text` is not a JSON array
/// of objects.
pub fn decode_table(table: &str, text: &str) -> CollectionResult<Vec<Record>> {
    serde_json::from_str(text)
        .map_err(|e| CollectionError::corrupted_table(table, e.to_string()))
}
