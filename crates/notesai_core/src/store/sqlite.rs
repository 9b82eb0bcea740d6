//! SQLite-backed key-value store.
//!
//! # Invariants
//! - The collection lives in exactly one `kv_store` row.
//! - `save` is a single upsert, so readers see either the old or the new
//!   payload, never a mix.

use super::codec::{decode_notes, encode_notes};
use super::{NoteStore, StoreResult, NOTES_SLOT_KEY};
use crate::db::{open_db, open_db_in_memory};
use crate::model::note::Note;
use chrono::Utc;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Note store persisting the serialized collection in a SQLite slot.
pub struct SqliteNoteStore {
    conn: Connection,
    slot: String,
}

impl SqliteNoteStore {
    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens a private in-memory database.
    pub fn in_memory() -> StoreResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps a connection that already went through `db::open_db*`.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            slot: NOTES_SLOT_KEY.to_string(),
        }
    }

    /// Uses a different slot key in the same database.
    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = slot.into();
        self
    }

    /// Raw payload stored in the slot, if any.
    pub fn read_payload(&self) -> StoreResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [self.slot.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    /// Overwrites the slot with a raw payload.
    pub fn write_payload(&self, payload: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![self.slot.as_str(), payload, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Borrow the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl NoteStore for SqliteNoteStore {
    fn load(&self) -> StoreResult<Vec<Note>> {
        match self.read_payload()? {
            Some(payload) => {
                let notes = decode_notes(&payload)?;
                debug!(
                    "event=store_load module=store backend=sqlite status=ok count={} bytes={}",
                    notes.len(),
                    payload.len()
                );
                Ok(notes)
            }
            None => {
                debug!("event=store_load module=store backend=sqlite status=empty");
                Ok(Vec::new())
            }
        }
    }

    fn save(&mut self, notes: &[Note]) -> StoreResult<()> {
        let payload = encode_notes(notes)?;
        self.write_payload(&payload)?;
        debug!(
            "event=store_save module=store backend=sqlite status=ok count={} bytes={}",
            notes.len(),
            payload.len()
        );
        Ok(())
    }
}
