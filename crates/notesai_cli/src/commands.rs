//! Subcommand handlers and output rendering.

use super::{EditArgs, NewArgs};
use anyhow::{bail, Context, Result};
use notesai_core::{
    EmptyState, Note, NoteDraft, NoteId, NoteService, NoteServiceError, NoteStore, SummaryStyle,
};

pub type Service = NoteService<Box<dyn NoteStore>>;

const SHORT_ID_LEN: usize = 8;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Renders results as text or JSON.
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    fn note(&self, note: &Note) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(note)?);
            return Ok(());
        }

        println!("id:       {}", note.id);
        println!("title:    {}", note.title);
        println!("tags:     {}", note.tags.join(", "));
        println!("created:  {}", note.created_at.format(TIMESTAMP_FORMAT));
        println!("updated:  {}", note.updated_at.format(TIMESTAMP_FORMAT));
        if let Some(summary) = note.summary.as_deref() {
            println!("summary:  {summary}");
        }
        if !note.content.is_empty() {
            println!();
            println!("{}", note.content);
        }
        Ok(())
    }

    fn notes(&self, notes: &[&Note], empty: Option<EmptyState>) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(notes)?);
            return Ok(());
        }

        match empty {
            Some(EmptyState::NoNotes) => println!("No notes yet. Create one with `notesai new`."),
            Some(EmptyState::NoMatches) => {
                println!("No notes found. Try adjusting your search or filter.")
            }
            None => {
                for note in notes {
                    println!("{}", list_line(note));
                }
            }
        }
        Ok(())
    }
}

fn list_line(note: &Note) -> String {
    let id = note.id.to_string();
    let marker = if note.has_summary() { "*" } else { " " };
    let mut line = format!(
        "{} {} {}  {}",
        &id[..SHORT_ID_LEN],
        marker,
        note.updated_at.format(TIMESTAMP_FORMAT),
        note.title
    );
    if !note.tags.is_empty() {
        line.push_str(&format!("  [{}]", note.tags.join(", ")));
    }
    line
}

/// Turns a service error into a CLI error, flagging unsaved changes.
fn report(err: NoteServiceError) -> anyhow::Error {
    if err.is_applied() {
        anyhow::Error::new(err).context("change applied but not saved; it will not survive a restart")
    } else {
        anyhow::Error::new(err)
    }
}

/// Accepts a full id or a unique prefix of one.
fn resolve_id(service: &Service, raw: &str) -> Result<NoteId> {
    if let Ok(id) = raw.parse::<NoteId>() {
        return Ok(id);
    }

    let prefix = raw.trim().to_ascii_lowercase();
    if prefix.is_empty() {
        bail!("note id cannot be empty");
    }

    let matches = service
        .list_notes()
        .iter()
        .map(|note| note.id)
        .filter(|id| id.to_string().starts_with(&prefix))
        .collect::<Vec<_>>();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => bail!("no note matches id `{raw}`"),
        _ => bail!("id prefix `{raw}` matches {} notes", matches.len()),
    }
}

pub fn create(service: &mut Service, out: &Output, args: NewArgs) -> Result<()> {
    let mut draft = NoteDraft::new(args.title, args.content).with_tags(args.tags);
    if let Some(summary) = args.summary {
        draft = draft.with_summary(summary);
    }

    let note = service.create_note(draft).map_err(report)?;
    out.note(&note)
}

pub fn edit(service: &mut Service, out: &Output, args: EditArgs) -> Result<()> {
    let id = resolve_id(service, &args.id)?;
    let current = service
        .get_note(id)
        .with_context(|| format!("note not found: {id}"))?;
    let draft = merge_edit(current, args);

    let note = service.update_note(id, draft).map_err(report)?;
    out.note(&note)
}

/// Starts from the stored note and applies only the fields given on the
/// command line. Clearing wins over replacing; clap rejects both together.
fn merge_edit(current: &Note, args: EditArgs) -> NoteDraft {
    let mut draft = NoteDraft::from_note(current);
    if let Some(title) = args.title {
        draft.title = title;
    }
    if let Some(content) = args.content {
        draft.content = content;
    }
    if args.clear_tags {
        draft.tags.clear();
    } else if !args.tags.is_empty() {
        draft.tags = args.tags;
    }
    if args.clear_summary {
        draft.summary = None;
    } else if let Some(summary) = args.summary {
        draft.summary = Some(summary);
    }
    draft
}

pub fn delete(service: &mut Service, out: &Output, raw_id: &str) -> Result<()> {
    let id = resolve_id(service, raw_id)?;
    let removed = service.delete_note(id).map_err(report)?;
    if out.json {
        println!("{}", serde_json::json!({ "deleted": removed.id }));
    } else {
        println!("Deleted \"{}\" ({})", removed.title, removed.id);
    }
    Ok(())
}

pub fn show(service: &Service, out: &Output, raw_id: &str) -> Result<()> {
    let id = resolve_id(service, raw_id)?;
    let note = service
        .get_note(id)
        .with_context(|| format!("note not found: {id}"))?;
    out.note(note)
}

pub fn search(service: &Service, out: &Output, text: &str, selector: &str) -> Result<()> {
    let result = service.search(text, selector);
    out.notes(&result.items, result.empty_state())
}

pub fn tags(service: &Service, out: &Output, counts: bool) -> Result<()> {
    if counts {
        let counts = service.tag_counts();
        if out.json {
            println!("{}", serde_json::to_string_pretty(&counts)?);
        } else {
            for (tag, count) in &counts {
                println!("{tag} ({count})");
            }
        }
        return Ok(());
    }

    let tags = service.tags();
    if out.json {
        println!("{}", serde_json::to_string_pretty(&tags)?);
    } else {
        for tag in &tags {
            println!("{tag}");
        }
    }
    Ok(())
}

pub fn summarize(service: &mut Service, out: &Output, raw_id: &str, style: &str) -> Result<()> {
    let style: SummaryStyle = style.parse()?;
    let id = resolve_id(service, raw_id)?;
    let note = service.summarize_note(id, style).map_err(report)?;
    out.note(&note)
}

#[cfg(test)]
mod tests {
    use super::{edit, merge_edit, report, resolve_id, Output, Service};
    use crate::EditArgs;
    use notesai_core::{
        MemoryNoteStore, Note, NoteDraft, NoteService, NoteStore, StoreError, StoreResult,
    };
    use std::io;

    const FIRST_ID: &str = "aaaa1111-0000-4000-8000-000000000001";
    const SECOND_ID: &str = "aaaa2222-0000-4000-8000-000000000002";
    const THIRD_ID: &str = "bbbb3333-0000-4000-8000-000000000003";

    fn seeded_service() -> Service {
        let payload = [FIRST_ID, SECOND_ID, THIRD_ID]
            .iter()
            .map(|id| {
                format!(
                    r#"{{"id":"{id}","title":"note {id}","content":"body","tags":["work"],
                    "summary":"short","createdAt":"2024-01-01T00:00:00Z",
                    "updatedAt":"2024-01-01T00:00:00Z"}}"#
                )
            })
            .collect::<Vec<_>>()
            .join(",");
        let store: Box<dyn NoteStore> =
            Box::new(MemoryNoteStore::with_payload(format!("[{payload}]")));
        let service = NoteService::open(store);
        assert!(service.load_warning().is_none());
        service
    }

    fn edit_args(id: &str) -> EditArgs {
        EditArgs {
            id: id.to_string(),
            title: None,
            content: None,
            tags: Vec::new(),
            clear_tags: false,
            summary: None,
            clear_summary: false,
        }
    }

    fn current(service: &Service, id: &str) -> Note {
        service.get_note(id.parse().unwrap()).unwrap().clone()
    }

    struct RejectingStore;

    impl NoteStore for RejectingStore {
        fn load(&self) -> StoreResult<Vec<Note>> {
            Ok(Vec::new())
        }

        fn save(&mut self, _notes: &[Note]) -> StoreResult<()> {
            Err(StoreError::Io(io::Error::new(io::ErrorKind::Other, "disk full")))
        }
    }

    #[test]
    fn resolve_id_accepts_full_id_and_unique_prefix() {
        let service = seeded_service();
        assert_eq!(resolve_id(&service, FIRST_ID).unwrap().to_string(), FIRST_ID);
        assert_eq!(resolve_id(&service, "aaaa2").unwrap().to_string(), SECOND_ID);
        assert_eq!(resolve_id(&service, " BBBB ").unwrap().to_string(), THIRD_ID);
    }

    #[test]
    fn resolve_id_rejects_empty_ambiguous_and_unknown_input() {
        let service = seeded_service();

        let empty = resolve_id(&service, "   ").unwrap_err();
        assert!(empty.to_string().contains("cannot be empty"));

        let ambiguous = resolve_id(&service, "aaaa").unwrap_err();
        assert!(ambiguous.to_string().contains("matches 2 notes"), "{ambiguous}");

        let unknown = resolve_id(&service, "cccc").unwrap_err();
        assert!(unknown.to_string().contains("no note matches"));
    }

    #[test]
    fn merge_edit_keeps_fields_that_were_not_given() {
        let service = seeded_service();
        let note = current(&service, FIRST_ID);

        let mut args = edit_args(FIRST_ID);
        args.title = Some("renamed".to_string());
        let draft = merge_edit(&note, args);

        assert_eq!(draft.title, "renamed");
        assert_eq!(draft.content, "body");
        assert_eq!(draft.tags, vec!["work"]);
        assert_eq!(draft.summary.as_deref(), Some("short"));
    }

    #[test]
    fn merge_edit_tag_flags_replace_or_clear() {
        let service = seeded_service();
        let note = current(&service, FIRST_ID);

        let mut replace = edit_args(FIRST_ID);
        replace.tags = vec!["home".to_string(), "ideas".to_string()];
        assert_eq!(merge_edit(&note, replace).tags, vec!["home", "ideas"]);

        let mut clear = edit_args(FIRST_ID);
        clear.clear_tags = true;
        assert!(merge_edit(&note, clear).tags.is_empty());
    }

    #[test]
    fn merge_edit_summary_flags_replace_or_clear() {
        let service = seeded_service();
        let note = current(&service, FIRST_ID);

        let mut replace = edit_args(FIRST_ID);
        replace.summary = Some("longer".to_string());
        assert_eq!(merge_edit(&note, replace).summary.as_deref(), Some("longer"));

        let mut clear = edit_args(FIRST_ID);
        clear.clear_summary = true;
        assert_eq!(merge_edit(&note, clear).summary, None);
    }

    #[test]
    fn edit_by_prefix_updates_the_stored_note() {
        let mut service = seeded_service();
        let mut args = edit_args("bbbb");
        args.clear_tags = true;
        args.clear_summary = true;

        edit(&mut service, &Output::new(true), args).unwrap();

        let note = current(&service, THIRD_ID);
        assert!(note.tags.is_empty());
        assert!(!note.has_summary());
        assert_eq!(service.tags(), vec!["work"]);
    }

    #[test]
    fn report_flags_changes_that_were_applied_but_not_saved() {
        let store: Box<dyn NoteStore> = Box::new(RejectingStore);
        let mut service = NoteService::open(store);

        let err = service.create_note(NoteDraft::new("t", "c")).unwrap_err();
        assert!(err.is_applied());
        let message = format!("{:#}", report(err));
        assert!(message.contains("applied but not saved"), "{message}");
        assert_eq!(service.list_notes().len(), 1);
    }

    #[test]
    fn report_leaves_plain_failures_alone() {
        let mut service = seeded_service();
        let missing = "cccc0000-0000-4000-8000-000000000000".parse().unwrap();

        let err = service.delete_note(missing).unwrap_err();
        let message = format!("{:#}", report(err));
        assert!(message.contains("note not found"));
        assert!(!message.contains("not saved"));
    }
}
