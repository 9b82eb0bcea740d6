//! Single JSON file store.
//!
//! Writes go to a temp file in the target directory which is then renamed
//! over the record, so a crash mid-save leaves the previous payload intact.

use super::codec::{decode_notes, encode_notes};
use super::{NoteStore, StoreError, StoreResult};
use crate::model::note::Note;
use log::debug;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Note store persisting the serialized collection to one file.
#[derive(Debug, Clone)]
pub struct FileNoteStore {
    path: PathBuf,
}

impl FileNoteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl NoteStore for FileNoteStore {
    fn load(&self) -> StoreResult<Vec<Note>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("event=store_load module=store backend=file status=empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };
        let payload = String::from_utf8(bytes)
            .map_err(|err| StoreError::Malformed(format!("payload is not UTF-8: {err}")))?;

        let notes = decode_notes(&payload)?;
        debug!(
            "event=store_load module=store backend=file status=ok count={} bytes={}",
            notes.len(),
            payload.len()
        );
        Ok(notes)
    }

    fn save(&mut self, notes: &[Note]) -> StoreResult<()> {
        let payload = encode_notes(notes)?;
        let dir = self.parent_dir();
        std::fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(payload.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|err| err.error)?;

        debug!(
            "event=store_save module=store backend=file status=ok count={} bytes={}",
            notes.len(),
            payload.len()
        );
        Ok(())
    }
}
