//! Search + filter query over a repository snapshot.
//!
//! # Invariants
//! - Results keep the snapshot's relative order; nothing is re-sorted.
//! - Text search is a case-insensitive substring match on title, content or
//!   any tag. Tag filters are exact and case-sensitive.
//! - Unknown filter selectors behave as [`NoteFilter::All`].

use crate::model::note::Note;
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const FILTER_ALL: &str = "all";
const FILTER_SUMMARIZED: &str = "summarized";
const FILTER_TAG_PREFIX: &str = "tag:";

/// Filter selector combined (AND) with the text search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NoteFilter {
    #[default]
    All,
    HasSummary,
    ByTag(String),
}

impl NoteFilter {
    /// Parses a selector string; unrecognized values fall back to `All`.
    pub fn parse(selector: &str) -> Self {
        match selector {
            FILTER_SUMMARIZED => Self::HasSummary,
            value => match value.strip_prefix(FILTER_TAG_PREFIX) {
                Some(tag) => Self::ByTag(tag.to_string()),
                None => Self::All,
            },
        }
    }

    pub fn matches(&self, note: &Note) -> bool {
        match self {
            Self::All => true,
            Self::HasSummary => note.has_summary(),
            Self::ByTag(tag) => note.has_tag(tag),
        }
    }
}

impl FromStr for NoteFilter {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(value))
    }
}

impl Display for NoteFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str(FILTER_ALL),
            Self::HasSummary => f.write_str(FILTER_SUMMARIZED),
            Self::ByTag(tag) => write!(f, "{FILTER_TAG_PREFIX}{tag}"),
        }
    }
}

/// Free-text search plus filter selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteQuery {
    pub text: String,
    pub filter: NoteFilter,
}

impl NoteQuery {
    pub fn new(text: impl Into<String>, filter: NoteFilter) -> Self {
        Self {
            text: text.into(),
            filter,
        }
    }

    /// Text-only query with the `All` filter.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(text, NoteFilter::All)
    }
}

/// Why a query produced no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The collection itself is empty.
    NoNotes,
    /// Notes exist but none matched.
    NoMatches,
}

/// Query rows borrowed from the snapshot they were computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult<'a> {
    pub items: Vec<&'a Note>,
    /// Size of the snapshot the query ran against.
    pub total_notes: usize,
}

impl QueryResult<'_> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `None` when rows were found.
    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.items.is_empty() {
            None
        } else if self.total_notes == 0 {
            Some(EmptyState::NoNotes)
        } else {
            Some(EmptyState::NoMatches)
        }
    }
}

/// Runs `query` over `notes` in their given order.
pub fn query_notes<'a>(notes: &'a [Note], query: &NoteQuery) -> QueryResult<'a> {
    let needle = query.text.to_lowercase();
    let items = notes
        .iter()
        .filter(|note| matches_text(note, &needle) && query.filter.matches(note))
        .collect();

    QueryResult {
        items,
        total_notes: notes.len(),
    }
}

/// `needle` must already be lowercased.
fn matches_text(note: &Note, needle: &str) -> bool {
    needle.is_empty()
        || note.title.to_lowercase().contains(needle)
        || note.content.to_lowercase().contains(needle)
        || note
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}
