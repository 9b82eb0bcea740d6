//! In-process store holding the serialized record in memory.

use super::codec::{decode_notes, encode_notes};
use super::{NoteStore, StoreResult};
use crate::model::note::Note;

/// Keeps the serialized collection in a string slot.
///
/// Goes through the same codec as the durable stores, so it behaves like
/// them apart from durability.
#[derive(Debug, Clone, Default)]
pub struct MemoryNoteStore {
    payload: Option<String>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the slot with a raw payload, as if written by an earlier session.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
        }
    }

    /// Raw payload currently held in the slot.
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

impl NoteStore for MemoryNoteStore {
    fn load(&self) -> StoreResult<Vec<Note>> {
        match self.payload.as_deref() {
            Some(payload) => decode_notes(payload),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, notes: &[Note]) -> StoreResult<()> {
        self.payload = Some(encode_notes(notes)?);
        Ok(())
    }
}
