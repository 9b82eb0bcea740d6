use notesai_core::{
    collect_tags, MemoryNoteStore, Note, NoteDraft, NoteRepository, NoteStore, RepoError,
    StoreError, StoreResult,
};
use std::cell::Cell;
use std::collections::{BTreeSet, HashSet};
use std::rc::Rc;
use uuid::Uuid;

/// Store whose writes can be switched off to simulate a full disk.
struct FlakyStore {
    inner: MemoryNoteStore,
    reject_writes: Rc<Cell<bool>>,
}

impl NoteStore for FlakyStore {
    fn load(&self) -> StoreResult<Vec<Note>> {
        self.inner.load()
    }

    fn save(&mut self, notes: &[Note]) -> StoreResult<()> {
        if self.reject_writes.get() {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "quota exceeded",
            )));
        }
        self.inner.save(notes)
    }
}

fn ids(repo: &NoteRepository<MemoryNoteStore>) -> Vec<Uuid> {
    repo.list().iter().map(|note| note.id).collect()
}

#[test]
fn create_inserts_at_front() {
    let mut repo = NoteRepository::open(MemoryNoteStore::new());
    let a = repo.create(NoteDraft::new("A", "first")).unwrap();
    let b = repo.create(NoteDraft::new("B", "second")).unwrap();

    assert_eq!(ids(&repo), vec![b.id, a.id]);
    assert_eq!(a.created_at, a.updated_at);
}

#[test]
fn update_keeps_position_and_created_at() {
    let mut repo = NoteRepository::open(MemoryNoteStore::new());
    let a = repo.create(NoteDraft::new("A", "first")).unwrap();
    let b = repo.create(NoteDraft::new("B", "second")).unwrap();
    let c = repo.create(NoteDraft::new("C", "third")).unwrap();

    let updated = repo
        .update(a.id, NoteDraft::new("A2", "edited").with_tags(["x"]))
        .unwrap();

    assert_eq!(ids(&repo), vec![c.id, b.id, a.id]);
    assert_eq!(updated.created_at, a.created_at);
    assert!(updated.updated_at >= a.updated_at);
    assert_eq!(updated.title, "A2");
    assert_eq!(updated.tags, vec!["x".to_string()]);
    assert_eq!(repo.get(a.id), Some(&updated));
}

#[test]
fn update_replaces_every_mutable_field() {
    let mut repo = NoteRepository::open(MemoryNoteStore::new());
    let note = repo
        .create(
            NoteDraft::new("Title", "Body")
                .with_tags(["a", "b"])
                .with_summary("short"),
        )
        .unwrap();

    let updated = repo.update(note.id, NoteDraft::new("", "New body")).unwrap();
    assert_eq!(updated.title, "Untitled Note");
    assert_eq!(updated.content, "New body");
    assert!(updated.tags.is_empty());
    assert_eq!(updated.summary, None);
}

#[test]
fn update_missing_note_is_not_found_without_state_change() {
    let mut repo = NoteRepository::open(MemoryNoteStore::new());
    let note = repo.create(NoteDraft::new("A", "a")).unwrap();
    let before = repo.list().to_vec();
    let payload_before = repo.store().payload().map(str::to_string);

    let missing = Uuid::new_v4();
    let err = repo.update(missing, NoteDraft::new("B", "b")).unwrap_err();

    assert!(matches!(err, RepoError::NotFound(id) if id == missing));
    assert_eq!(repo.list(), before.as_slice());
    assert_eq!(repo.store().payload().map(str::to_string), payload_before);
    assert_eq!(repo.get(note.id), Some(&note));
}

#[test]
fn delete_removes_note_and_second_delete_is_not_found() {
    let mut repo = NoteRepository::open(MemoryNoteStore::new());
    let a = repo.create(NoteDraft::new("A", "a")).unwrap();
    let b = repo.create(NoteDraft::new("B", "b")).unwrap();

    let removed = repo.delete(a.id).unwrap();
    assert_eq!(removed.id, a.id);
    assert_eq!(ids(&repo), vec![b.id]);

    let err = repo.delete(a.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == a.id));
}

#[test]
fn every_mutation_is_persisted() {
    let mut repo = NoteRepository::open(MemoryNoteStore::new());
    let a = repo.create(NoteDraft::new("A", "a")).unwrap();
    let b = repo.create(NoteDraft::new("B", "b")).unwrap();
    repo.update(a.id, NoteDraft::new("A2", "a2")).unwrap();
    repo.delete(b.id).unwrap();

    let reopened = NoteRepository::open(repo.store().clone());
    assert!(reopened.load_warning().is_none());
    assert_eq!(reopened.list(), repo.list());
}

#[test]
fn reopen_preserves_order_and_timestamps() {
    let mut repo = NoteRepository::open(MemoryNoteStore::new());
    for index in 0..5 {
        repo.create(NoteDraft::new(format!("note {index}"), "body"))
            .unwrap();
    }
    let target = repo.list()[3].id;
    repo.update(target, NoteDraft::new("edited", "body")).unwrap();

    let reopened = NoteRepository::open(repo.store().clone());
    assert_eq!(reopened.list(), repo.list());
    assert_eq!(reopened.list()[3].title, "edited");
}

#[test]
fn malformed_storage_starts_empty_with_warning() {
    let mut repo = NoteRepository::open(MemoryNoteStore::with_payload("definitely not json"));

    assert!(repo.is_empty());
    assert!(repo.load_warning().is_some_and(StoreError::is_malformed));

    let note = repo.create(NoteDraft::new("fresh", "start")).unwrap();
    let reopened = NoteRepository::open(repo.store().clone());
    assert!(reopened.load_warning().is_none());
    assert_eq!(reopened.list(), &[note]);
}

#[test]
fn write_failure_keeps_memory_state_and_marks_dirty() {
    let reject_writes = Rc::new(Cell::new(true));
    let mut repo = NoteRepository::open(FlakyStore {
        inner: MemoryNoteStore::new(),
        reject_writes: Rc::clone(&reject_writes),
    });

    let err = repo.create(NoteDraft::new("A", "a")).unwrap_err();
    let id = match err {
        RepoError::PersistenceWrite { id, .. } => id,
        other => panic!("expected write failure, got {other}"),
    };
    assert!(repo.is_dirty());
    assert_eq!(repo.len(), 1);
    assert_eq!(repo.get(id).map(|note| note.title.as_str()), Some("A"));

    reject_writes.set(false);
    repo.flush().unwrap();
    assert!(!repo.is_dirty());
    assert_eq!(repo.store().inner.load().unwrap(), repo.list());
}

#[test]
fn failed_update_is_not_rolled_back() {
    let reject_writes = Rc::new(Cell::new(false));
    let mut repo = NoteRepository::open(FlakyStore {
        inner: MemoryNoteStore::new(),
        reject_writes: Rc::clone(&reject_writes),
    });
    let note = repo.create(NoteDraft::new("A", "a")).unwrap();

    reject_writes.set(true);
    let err = repo.update(note.id, NoteDraft::new("B", "b")).unwrap_err();
    assert!(err.is_applied());
    assert_eq!(repo.get(note.id).unwrap().title, "B");

    let err = repo.delete(note.id).unwrap_err();
    assert!(err.is_applied());
    assert!(repo.is_empty());
}

#[test]
fn ids_stay_unique_and_stable_and_tags_stay_consistent() {
    let mut repo = NoteRepository::open(MemoryNoteStore::new());
    let tag_pool = ["home", "work", "urgent", "Work", "ideas"];
    let mut seed: u64 = 0x5eed;
    let mut next = move |bound: usize| {
        seed = seed
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        ((seed >> 33) as usize) % bound
    };
    let mut ever_seen = HashSet::new();

    for step in 0..200 {
        let tags = vec![tag_pool[next(tag_pool.len())], tag_pool[next(tag_pool.len())]];
        match next(3) {
            0 => {
                let note = repo
                    .create(NoteDraft::new(format!("n{step}"), "body").with_tags(tags))
                    .unwrap();
                assert!(ever_seen.insert(note.id), "id reused: {}", note.id);
            }
            1 if !repo.is_empty() => {
                let target = repo.list()[next(repo.len())].clone();
                let updated = repo
                    .update(target.id, NoteDraft::new("edited", "body").with_tags(tags))
                    .unwrap();
                assert_eq!(updated.id, target.id);
                assert_eq!(updated.created_at, target.created_at);
                assert!(updated.updated_at >= target.updated_at);
            }
            2 if !repo.is_empty() => {
                let target = repo.list()[next(repo.len())].id;
                repo.delete(target).unwrap();
                assert!(repo.get(target).is_none());
            }
            _ => {}
        }

        let unique: HashSet<_> = repo.list().iter().map(|note| note.id).collect();
        assert_eq!(unique.len(), repo.len());

        let expected: Vec<String> = repo
            .list()
            .iter()
            .flat_map(|note| note.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        assert_eq!(collect_tags(repo.list()), expected);
    }
}
