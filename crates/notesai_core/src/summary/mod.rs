//! Derived-summary collaborator.
//!
//! # Responsibility
//! - Define the contract the core uses to obtain summary text.
//! - Ship a deterministic heuristic implementation.
//!
//! # Invariants
//! - The core stores whatever text a [`Summarizer`] returns, verbatim.
//! - Calls are synchronous from the core's point of view.

pub mod extractive;
pub mod style;

pub use extractive::ExtractiveSummarizer;
pub use style::{ParseSummaryStyleError, SummaryStyle};

/// Produces summary text for note content in a requested style.
pub trait Summarizer {
    fn summarize(&self, content: &str, style: SummaryStyle) -> String;
}

impl<F> Summarizer for F
where
    F: Fn(&str, SummaryStyle) -> String,
{
    fn summarize(&self, content: &str, style: SummaryStyle) -> String {
        self(content, style)
    }
}
