//! Note use-case service.
//!
//! # Responsibility
//! - Expose the command interface used by UI collaborators: create, update,
//!   delete, list, and search+filter queries.
//! - Route summary generation through the configured [`Summarizer`] and store
//!   its output verbatim.
//!
//! # Invariants
//! - Every mutation goes through `NoteRepository`; the service holds no note
//!   state of its own.
//! - Query results and the tag index are recomputed from the current
//!   snapshot on each call.

use crate::model::note::{Note, NoteDraft, NoteId};
use crate::repo::note_repo::{NoteRepository, RepoError};
use crate::search::query::{query_notes, NoteFilter, NoteQuery, QueryResult};
use crate::search::tags::{collect_tags, tag_counts};
use crate::store::{NoteStore, StoreError, StoreResult};
use crate::summary::{ExtractiveSummarizer, Summarizer, SummaryStyle};
use log::info;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// Summary requested for a note whose content is blank.
    EmptyContent(NoteId),
    /// Repository failure other than a missing note.
    Repo(RepoError),
}

impl NoteServiceError {
    /// Returns whether the in-memory change happened despite the error.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Repo(err) if err.is_applied())
    }
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::EmptyContent(id) => write!(f, "note {id} has no content to summarize"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NoteNotFound(id),
            other => Self::Repo(other),
        }
    }
}

pub type NoteServiceResult<T> = Result<T, NoteServiceError>;

/// Note service facade over a repository and a summarizer.
pub struct NoteService<S: NoteStore, Z: Summarizer = ExtractiveSummarizer> {
    repo: NoteRepository<S>,
    summarizer: Z,
}

impl<S: NoteStore> NoteService<S, ExtractiveSummarizer> {
    /// Opens the repository on `store` with the built-in summarizer.
    pub fn open(store: S) -> Self {
        Self::new(NoteRepository::open(store), ExtractiveSummarizer)
    }
}

impl<S: NoteStore, Z: Summarizer> NoteService<S, Z> {
    pub fn new(repo: NoteRepository<S>, summarizer: Z) -> Self {
        Self { repo, summarizer }
    }

    pub fn create_note(&mut self, draft: NoteDraft) -> NoteServiceResult<Note> {
        Ok(self.repo.create(draft)?)
    }

    /// Replaces all editable fields of one note.
    pub fn update_note(&mut self, id: NoteId, draft: NoteDraft) -> NoteServiceResult<Note> {
        Ok(self.repo.update(id, draft)?)
    }

    pub fn delete_note(&mut self, id: NoteId) -> NoteServiceResult<Note> {
        Ok(self.repo.delete(id)?)
    }

    pub fn get_note(&self, id: NoteId) -> Option<&Note> {
        self.repo.get(id)
    }

    /// Notes in canonical order: newest creation first, edits in place.
    pub fn list_notes(&self) -> &[Note] {
        self.repo.list()
    }

    pub fn query(&self, query: &NoteQuery) -> QueryResult<'_> {
        query_notes(self.repo.list(), query)
    }

    /// Shorthand for [`Self::query`] with a raw filter selector string.
    pub fn search(&self, text: &str, selector: &str) -> QueryResult<'_> {
        self.query(&NoteQuery::new(text, NoteFilter::parse(selector)))
    }

    /// Distinct tags across all notes, sorted.
    pub fn tags(&self) -> Vec<String> {
        collect_tags(self.repo.list())
    }

    pub fn tag_counts(&self) -> BTreeMap<String, usize> {
        tag_counts(self.repo.list())
    }

    /// Summarizes unsaved editor content without touching any note.
    pub fn preview_summary(&self, content: &str, style: SummaryStyle) -> String {
        self.summarizer.summarize(content, style)
    }

    /// Generates a summary for one note and stores it as the note's summary.
    pub fn summarize_note(&mut self, id: NoteId, style: SummaryStyle) -> NoteServiceResult<Note> {
        let note = self.repo.get(id).ok_or(NoteServiceError::NoteNotFound(id))?;
        if note.content.trim().is_empty() {
            return Err(NoteServiceError::EmptyContent(id));
        }

        let summary = self.summarizer.summarize(&note.content, style);
        let draft = NoteDraft::from_note(note).with_summary(summary);
        let updated = self.repo.update(id, draft)?;
        info!("event=note_summarize module=service status=ok id={id} style={style}");
        Ok(updated)
    }

    /// Error raised while loading storage at startup, if any.
    pub fn load_warning(&self) -> Option<&StoreError> {
        self.repo.load_warning()
    }

    pub fn is_dirty(&self) -> bool {
        self.repo.is_dirty()
    }

    /// Retries persisting after an earlier write failure.
    pub fn flush(&mut self) -> StoreResult<()> {
        self.repo.flush()
    }

    pub fn repository(&self) -> &NoteRepository<S> {
        &self.repo
    }
}
