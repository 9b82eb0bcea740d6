//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record persisted by the store.
//! - Normalize user input (title placeholder, tag hygiene) before it reaches
//!   the repository.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `created_at` never changes; `updated_at >= created_at`.
//! - `tags` holds no blank or duplicate entries; comparison is case-sensitive.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Placeholder stored when a note is saved with a blank title.
pub const UNTITLED_NOTE_TITLE: &str = "Untitled Note";

/// Stable identifier for every note.
pub type NoteId = Uuid;

/// Validation error for notes reconstructed from persisted data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// The nil UUID is reserved and never assigned.
    EmptyId,
    /// `updated_at` is earlier than `created_at`.
    TimestampOrder { id: NoteId },
    /// A tag is empty or whitespace only.
    BlankTag { id: NoteId },
    /// The same tag appears twice on one note.
    DuplicateTag { id: NoteId, tag: String },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "note id must not be nil"),
            Self::TimestampOrder { id } => {
                write!(f, "note {id}: updatedAt is earlier than createdAt")
            }
            Self::BlankTag { id } => write!(f, "note {id}: blank tag"),
            Self::DuplicateTag { id, tag } => write!(f, "note {id}: duplicate tag `{tag}`"),
        }
    }
}

impl Error for NoteValidationError {}

/// Canonical note record.
///
/// Field names serialize in camelCase to match the storage record layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates a note from normalized draft input with a generated ID.
    pub fn new(draft: NoteDraft, now: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4(), draft, now)
    }

    /// Creates a note with a caller-provided ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(id: NoteId, draft: NoteDraft, now: DateTime<Utc>) -> Self {
        let draft = draft.normalized();
        Self {
            id,
            title: draft.title,
            content: draft.content,
            summary: draft.summary,
            tags: draft.tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces every mutable field and refreshes `updated_at`.
    ///
    /// `updated_at` never moves backwards, even if the wall clock does.
    pub fn apply(&mut self, draft: NoteDraft, now: DateTime<Utc>) {
        let draft = draft.normalized();
        self.title = draft.title;
        self.content = draft.content;
        self.summary = draft.summary;
        self.tags = draft.tags;
        self.updated_at = now.max(self.updated_at);
    }

    /// Returns whether a non-empty summary is attached.
    pub fn has_summary(&self) -> bool {
        self.summary
            .as_deref()
            .is_some_and(|summary| !summary.is_empty())
    }

    /// Exact, case-sensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|value| value == tag)
    }

    /// Checks the invariants a persisted note must satisfy.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id.is_nil() {
            return Err(NoteValidationError::EmptyId);
        }
        if self.updated_at < self.created_at {
            return Err(NoteValidationError::TimestampOrder { id: self.id });
        }

        let mut seen = HashSet::new();
        for tag in &self.tags {
            if tag.trim().is_empty() {
                return Err(NoteValidationError::BlankTag { id: self.id });
            }
            if !seen.insert(tag.as_str()) {
                return Err(NoteValidationError::DuplicateTag {
                    id: self.id,
                    tag: tag.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Editable note fields as submitted by a collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub summary: Option<String>,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags: Vec::new(),
            summary: None,
        }
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Builds a draft carrying the current fields of `note`.
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            tags: note.tags.clone(),
            summary: note.summary.clone(),
        }
    }

    /// Applies the note input contract.
    ///
    /// - Blank titles become [`UNTITLED_NOTE_TITLE`]; others are trimmed.
    /// - Tags are trimmed, blanks dropped, duplicates removed keeping the
    ///   first occurrence.
    /// - An empty summary is stored as `None`.
    pub fn normalized(self) -> Self {
        let title = match self.title.trim() {
            "" => UNTITLED_NOTE_TITLE.to_string(),
            trimmed => trimmed.to_string(),
        };
        Self {
            title,
            content: self.content,
            tags: normalize_tags(&self.tags),
            summary: self.summary.filter(|summary| !summary.is_empty()),
        }
    }
}

/// Normalizes one tag value: trimmed, `None` when blank. Case is preserved.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Normalizes and deduplicates tag values, preserving first-seen order.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(tags.len());
    for tag in tags {
        if let Some(value) = normalize_tag(tag) {
            if seen.insert(value.clone()) {
                unique.push(value);
            }
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::{normalize_tags, Note, NoteDraft, NoteValidationError, UNTITLED_NOTE_TITLE};
    use chrono::{Duration, Utc};

    #[test]
    fn blank_title_gets_placeholder() {
        let note = Note::new(NoteDraft::new("   ", "body"), Utc::now());
        assert_eq!(note.title, UNTITLED_NOTE_TITLE);
    }

    #[test]
    fn tags_are_trimmed_and_deduplicated_case_sensitively() {
        let tags = normalize_tags(&[
            " work ".to_string(),
            "Work".to_string(),
            "".to_string(),
            "work".to_string(),
        ]);
        assert_eq!(tags, vec!["work".to_string(), "Work".to_string()]);
    }

    #[test]
    fn apply_keeps_created_at_and_never_moves_updated_at_back() {
        let now = Utc::now();
        let mut note = Note::new(NoteDraft::new("a", "b"), now);
        note.apply(NoteDraft::new("c", "d"), now - Duration::seconds(30));
        assert_eq!(note.created_at, now);
        assert_eq!(note.updated_at, now);
        assert_eq!(note.title, "c");
    }

    #[test]
    fn empty_summary_is_not_a_summary() {
        let note = Note::new(NoteDraft::new("a", "b").with_summary(""), Utc::now());
        assert_eq!(note.summary, None);
        assert!(!note.has_summary());
    }

    #[test]
    fn validate_rejects_inverted_timestamps() {
        let now = Utc::now();
        let mut note = Note::new(NoteDraft::new("a", "b"), now);
        note.updated_at = now - Duration::seconds(1);
        assert!(matches!(
            note.validate(),
            Err(NoteValidationError::TimestampOrder { .. })
        ));
    }

    #[test]
    fn validate_rejects_duplicate_tags() {
        let mut note = Note::new(NoteDraft::new("a", "b"), Utc::now());
        note.tags = vec!["x".to_string(), "x".to_string()];
        assert!(matches!(
            note.validate(),
            Err(NoteValidationError::DuplicateTag { .. })
        ));
    }
}
