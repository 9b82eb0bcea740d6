//! Read-side queries over a repository snapshot.
//!
//! # Responsibility
//! - Combine free-text search with a filter selector.
//! - Derive the tag index used to populate filter options.
//!
//! # Invariants
//! - Functions here only read; they never mutate notes.

pub mod query;
pub mod tags;
