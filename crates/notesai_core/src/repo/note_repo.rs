//! Note repository over an injected persistence adapter.
//!
//! # Responsibility
//! - Own create/update/delete/list for notes and every model invariant.
//! - Persist the full collection after each mutation.
//! - Recover from unreadable storage by starting empty with a warning.
//!
//! # Invariants
//! - Creation inserts at the front; updates keep the note's position.
//! - `created_at` is never touched after creation; `updated_at` never
//!   decreases.
//! - Ids are unique within the collection.
//! - A failed write never rolls back the in-memory mutation; the collection
//!   stays the source of truth and is marked dirty until a save succeeds.
//! - `&mut self` on every mutation serializes writers, so each save reflects
//!   the latest complete state.

use crate::model::note::{Note, NoteDraft, NoteId};
use crate::store::{NoteStore, StoreError, StoreResult};
use chrono::Utc;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note commands.
#[derive(Debug)]
pub enum RepoError {
    /// No note with this id exists. No state was changed.
    NotFound(NoteId),
    /// The mutation on `id` was applied in memory but the store rejected the
    /// write. Changes may not survive a restart.
    PersistenceWrite { id: NoteId, source: StoreError },
}

impl RepoError {
    /// Returns whether the in-memory collection was changed despite the error.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::PersistenceWrite { .. })
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::PersistenceWrite { id, source } => {
                write!(f, "note {id} changed but could not be saved: {source}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::PersistenceWrite { source, .. } => Some(source),
        }
    }
}

/// Authoritative note collection synchronized with a [`NoteStore`].
pub struct NoteRepository<S: NoteStore> {
    store: S,
    notes: Vec<Note>,
    load_warning: Option<StoreError>,
    dirty: bool,
}

impl<S: NoteStore> NoteRepository<S> {
    /// Seeds the collection from `store.load()`.
    ///
    /// Never fails: when the stored record cannot be read or decoded the
    /// repository starts empty and keeps the error in [`Self::load_warning`].
    pub fn open(store: S) -> Self {
        let started_at = Instant::now();
        let (notes, load_warning) = match store.load() {
            Ok(notes) => {
                info!(
                    "event=repo_open module=repo status=ok count={} duration_ms={}",
                    notes.len(),
                    started_at.elapsed().as_millis()
                );
                (notes, None)
            }
            Err(err) => {
                warn!(
                    "event=repo_open module=repo status=degraded malformed={} duration_ms={} error={}",
                    err.is_malformed(),
                    started_at.elapsed().as_millis(),
                    err
                );
                (Vec::new(), Some(err))
            }
        };

        Self {
            store,
            notes,
            load_warning,
            dirty: false,
        }
    }

    /// Creates a note at the front of the collection.
    pub fn create(&mut self, draft: NoteDraft) -> RepoResult<Note> {
        let mut id = Uuid::new_v4();
        while self.position(id).is_some() {
            id = Uuid::new_v4();
        }

        let note = Note::with_id(id, draft, Utc::now());
        self.notes.insert(0, note.clone());
        info!("event=note_create module=repo status=ok id={id}");

        self.persist(id)?;
        Ok(note)
    }

    /// Replaces all mutable fields of note `id` in place.
    pub fn update(&mut self, id: NoteId, draft: NoteDraft) -> RepoResult<Note> {
        let index = self.position(id).ok_or(RepoError::NotFound(id))?;
        let note = &mut self.notes[index];
        note.apply(draft, Utc::now());
        let updated = note.clone();
        info!("event=note_update module=repo status=ok id={id}");

        self.persist(id)?;
        Ok(updated)
    }

    /// Removes note `id` irrevocably and returns it.
    pub fn delete(&mut self, id: NoteId) -> RepoResult<Note> {
        let index = self.position(id).ok_or(RepoError::NotFound(id))?;
        let removed = self.notes.remove(index);
        info!("event=note_delete module=repo status=ok id={id}");

        self.persist(id)?;
        Ok(removed)
    }

    /// Current collection in canonical order.
    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Error raised while loading the stored record at startup, if any.
    pub fn load_warning(&self) -> Option<&StoreError> {
        self.load_warning.as_ref()
    }

    /// Returns whether the last save failed and memory is ahead of storage.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Retries persisting the current collection.
    pub fn flush(&mut self) -> StoreResult<()> {
        self.store.save(&self.notes)?;
        self.dirty = false;
        info!(
            "event=repo_flush module=repo status=ok count={}",
            self.notes.len()
        );
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn position(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }

    fn persist(&mut self, id: NoteId) -> RepoResult<()> {
        match self.store.save(&self.notes) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(source) => {
                self.dirty = true;
                error!(
                    "event=note_persist module=repo status=error id={} count={} error={}",
                    id,
                    self.notes.len(),
                    source
                );
                Err(RepoError::PersistenceWrite { id, source })
            }
        }
    }
}
