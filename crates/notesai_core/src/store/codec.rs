//! Text encoding of the note collection.
//!
//! The record is a JSON array of camelCase note objects. Timestamps are
//! RFC 3339 strings with sub-second precision, so they round-trip exactly.

use super::{StoreError, StoreResult};
use crate::model::note::{normalize_tags, Note};
use std::collections::HashSet;

/// Serializes the collection in its canonical order.
pub fn encode_notes(notes: &[Note]) -> StoreResult<String> {
    serde_json::to_string(notes).map_err(StoreError::Encode)
}

/// Parses and validates a stored payload.
///
/// A blank payload decodes to an empty collection. Tags are normalized the
/// same way edits normalize them, so blank or repeated tags are dropped
/// rather than rejected. Any parse failure, invalid note, or repeated id is
/// reported as [`StoreError::Malformed`].
pub fn decode_notes(payload: &str) -> StoreResult<Vec<Note>> {
    if payload.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut notes: Vec<Note> = serde_json::from_str(payload)
        .map_err(|err| StoreError::Malformed(format!("parse failed: {err}")))?;

    let mut ids = HashSet::with_capacity(notes.len());
    for note in &mut notes {
        note.tags = normalize_tags(&note.tags);
        note.validate()
            .map_err(|err| StoreError::Malformed(err.to_string()))?;
        if !ids.insert(note.id) {
            return Err(StoreError::Malformed(format!("duplicate note id {}", note.id)));
        }
    }

    Ok(notes)
}
