//! Heuristic, extractive summarizer.
//!
//! Rules:
//! - Sentences are split on runs of `.`, `!` and `?`; blank pieces dropped.
//! - `concise`: first two sentences joined by `". "`, with a trailing `"."`
//!   only when more than two sentences exist.
//! - Content without any sentence yields [`EMPTY_CONTENT_SUMMARY`].
//! - Every other style is a deterministic rearrangement of the same
//!   sentences or words; no style invents text beyond fixed labels.

use super::{Summarizer, SummaryStyle};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Returned when content has nothing to summarize.
pub const EMPTY_CONTENT_SUMMARY: &str = "No content to summarize.";
const NO_ACTIONS_SUMMARY: &str = "No action items found.";

const LIST_MAX_ITEMS: usize = 5;
const QA_MAX_ITEMS: usize = 3;
const KEYWORD_MIN_CHARS: usize = 4;
const CUE_WORDS: usize = 4;

static SENTENCE_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("valid sentence regex"));
static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}']+").expect("valid word regex"));

const STOP_WORDS: &[&str] = &[
    "about", "after", "also", "been", "before", "from", "have", "into", "just", "more", "some",
    "than", "that", "their", "them", "then", "there", "these", "they", "this", "very", "were",
    "what", "when", "which", "will", "with", "would", "your",
];

const ACTION_CUES: &[&str] = &[
    "need", "needs", "must", "should", "todo", "remember", "buy", "call", "finish", "send",
    "schedule", "book", "pay", "email", "fix", "review",
];

/// Default [`Summarizer`] used when no external collaborator is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractiveSummarizer;

impl Summarizer for ExtractiveSummarizer {
    fn summarize(&self, content: &str, style: SummaryStyle) -> String {
        let sentences = split_sentences(content);
        if sentences.is_empty() {
            return EMPTY_CONTENT_SUMMARY.to_string();
        }

        match style {
            SummaryStyle::Concise => concise(&sentences),
            SummaryStyle::Bullet => prefixed_lines(&sentences, LIST_MAX_ITEMS, |_| "• ".into()),
            SummaryStyle::Simplified => format!("{}.", sentences[0]),
            SummaryStyle::Detailed => format!("{}.", sentences.join(". ")),
            SummaryStyle::QuestionAnswer => question_answer(&sentences),
            SummaryStyle::Flashcards => flashcards(&sentences),
            SummaryStyle::Outline => {
                prefixed_lines(&sentences, LIST_MAX_ITEMS, |index| format!("{}. ", index + 1))
            }
            SummaryStyle::Keywords => keywords(content),
            SummaryStyle::Actionable => actionable(&sentences),
        }
    }
}

fn split_sentences(content: &str) -> Vec<&str> {
    SENTENCE_SPLIT_RE
        .split(content)
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .collect()
}

fn concise(sentences: &[&str]) -> String {
    let mut summary = sentences
        .iter()
        .take(2)
        .copied()
        .collect::<Vec<_>>()
        .join(". ");
    if sentences.len() > 2 {
        summary.push('.');
    }
    summary
}

fn prefixed_lines(sentences: &[&str], max: usize, prefix: impl Fn(usize) -> String) -> String {
    sentences
        .iter()
        .take(max)
        .enumerate()
        .map(|(index, sentence)| format!("{}{sentence}", prefix(index)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn cue(sentence: &str) -> String {
    WORD_RE
        .find_iter(sentence)
        .take(CUE_WORDS)
        .map(|word| word.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn question_answer(sentences: &[&str]) -> String {
    sentences
        .iter()
        .take(QA_MAX_ITEMS)
        .map(|sentence| format!("Q: What about \"{}\"?\nA: {sentence}.", cue(sentence)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn flashcards(sentences: &[&str]) -> String {
    sentences
        .iter()
        .take(LIST_MAX_ITEMS)
        .enumerate()
        .map(|(index, sentence)| {
            format!("Card {}\nFront: {}\nBack: {sentence}.", index + 1, cue(sentence))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Most frequent non-trivial words; ties keep first-occurrence order.
fn keywords(content: &str) -> String {
    let stop_words: HashSet<&str> = STOP_WORDS.iter().copied().collect();
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for word in WORD_RE.find_iter(content) {
        let word = word.as_str().to_lowercase();
        if word.chars().count() < KEYWORD_MIN_CHARS || stop_words.contains(word.as_str()) {
            continue;
        }
        let count = counts.entry(word.clone()).or_insert(0);
        if *count == 0 {
            order.push(word);
        }
        *count += 1;
    }

    if order.is_empty() {
        return EMPTY_CONTENT_SUMMARY.to_string();
    }

    let mut ranked: Vec<(usize, &String)> = order.iter().enumerate().collect();
    ranked.sort_by(|(a_pos, a), (b_pos, b)| counts[*b].cmp(&counts[*a]).then(a_pos.cmp(b_pos)));
    ranked
        .into_iter()
        .take(LIST_MAX_ITEMS)
        .map(|(_, word)| word.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn actionable(sentences: &[&str]) -> String {
    let items = sentences
        .iter()
        .filter(|sentence| {
            WORD_RE
                .find_iter(sentence)
                .any(|word| ACTION_CUES.contains(&word.as_str().to_lowercase().as_str()))
        })
        .map(|sentence| format!("- [ ] {sentence}"))
        .collect::<Vec<_>>();

    if items.is_empty() {
        NO_ACTIONS_SUMMARY.to_string()
    } else {
        items.join("\n")
    }
}
