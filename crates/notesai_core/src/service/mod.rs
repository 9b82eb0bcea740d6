//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository, query and summary calls into use-case APIs.
//! - Keep CLI/UI layers decoupled from storage details.

pub mod note_service;
