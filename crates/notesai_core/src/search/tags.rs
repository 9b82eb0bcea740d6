//! Tag index derived from the current collection.
//!
//! Recomputed on every call; holds no state and cannot drift from the
//! repository.

use crate::model::note::Note;
use std::collections::{BTreeMap, BTreeSet};

/// Distinct tags across `notes`, lexicographically sorted.
pub fn collect_tags(notes: &[Note]) -> Vec<String> {
    notes
        .iter()
        .flat_map(|note| note.tags.iter())
        .map(String::as_str)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Number of notes carrying each tag, keyed in sorted order.
pub fn tag_counts(notes: &[Note]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for tag in notes.iter().flat_map(|note| note.tags.iter()) {
        *counts.entry(tag.clone()).or_insert(0) += 1;
    }
    counts
}
