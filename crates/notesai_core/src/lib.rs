//! Core note store and retrieval engine for NotesAI.
//! This crate is the single source of truth for note invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;
pub mod summary;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::note::{Note, NoteDraft, NoteId, NoteValidationError, UNTITLED_NOTE_TITLE};
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult};
pub use search::query::{query_notes, EmptyState, NoteFilter, NoteQuery, QueryResult};
pub use search::tags::{collect_tags, tag_counts};
pub use service::note_service::{NoteService, NoteServiceError, NoteServiceResult};
pub use store::{
    FileNoteStore, MemoryNoteStore, NoteStore, SqliteNoteStore, StoreError, StoreResult,
    NOTES_SLOT_KEY,
};
pub use summary::{ExtractiveSummarizer, ParseSummaryStyleError, Summarizer, SummaryStyle};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
