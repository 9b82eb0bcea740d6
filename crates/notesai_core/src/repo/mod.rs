//! Repository layer owning the canonical note collection.
//!
//! # Responsibility
//! - Keep the authoritative in-memory collection and its ordering.
//! - Synchronize every mutation to the injected `NoteStore`.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) distinct from
//!   persistence failures.

pub mod note_repo;
