//! Persistence adapter for the whole note collection.
//!
//! # Responsibility
//! - Read and overwrite one serialized record holding every note.
//! - Report malformed payloads as [`StoreError::Malformed`] so callers can
//!   recover instead of failing hard.
//!
//! # Invariants
//! - `save` fully replaces prior state; there is no delta persistence.
//! - `load` after `save` reconstructs identical notes in identical order.
//! - A missing record loads as an empty collection.

use crate::db::DbError;
use crate::model::note::Note;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod codec;
pub mod file;
pub mod memory;
pub mod sqlite;

pub use codec::{decode_notes, encode_notes};
pub use file::FileNoteStore;
pub use memory::MemoryNoteStore;
pub use sqlite::SqliteNoteStore;

/// Name of the storage slot holding the serialized collection.
pub const NOTES_SLOT_KEY: &str = "notesai-notes";

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer error for reads, writes and payload decoding.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Io(std::io::Error),
    /// The collection could not be serialized.
    Encode(serde_json::Error),
    /// The stored payload failed to parse or reconstruct.
    Malformed(String),
}

impl StoreError {
    /// Returns whether this error describes unreadable stored data rather
    /// than a failing medium.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }

    /// Returns whether the medium itself is damaged (see [`DbError::is_corrupt`]).
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Db(err) if err.is_corrupt())
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "storage io: {err}"),
            Self::Encode(err) => write!(f, "failed to serialize notes: {err}"),
            Self::Malformed(message) => write!(f, "malformed note storage: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Malformed(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Durable key-value storage for the note collection.
pub trait NoteStore {
    /// Reads the stored collection. Returns an empty list when nothing has
    /// been saved yet.
    fn load(&self) -> StoreResult<Vec<Note>>;
    /// Serializes `notes` and overwrites the stored record.
    fn save(&mut self, notes: &[Note]) -> StoreResult<()>;
}

impl<S: NoteStore + ?Sized> NoteStore for Box<S> {
    fn load(&self) -> StoreResult<Vec<Note>> {
        (**self).load()
    }

    fn save(&mut self, notes: &[Note]) -> StoreResult<()> {
        (**self).save(notes)
    }
}
