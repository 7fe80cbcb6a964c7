//! Storage seam for notes.
//!
//! The service only sees this trait; any document store that can insert,
//! query by owner, and mutate by id can stand behind it. The SQLite
//! `Database` is the shipped backend.

use thiserror::Error;

use crate::db::Database;
use crate::models::{Note, NoteFields};

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The UNIQUE constraint on note titles rejected the write.
    #[error("a note with this title already exists")]
    DuplicateTitle,
    #[error("storage error: {0}")]
    Storage(String),
}

pub trait NoteRepository: Send + Sync {
    /// Persist a new note, assigning its id and creation time.
    fn insert(
        &self,
        owner_id: &str,
        display_name: Option<&str>,
        title: &str,
        body: &str,
        category: &str,
    ) -> Result<Note, RepositoryError>;

    /// All notes belonging to an owner, newest first.
    fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Note>, RepositoryError>;

    fn find_by_id(&self, id: &str) -> Result<Option<Note>, RepositoryError>;

    /// Apply the `Some` fields, leaving the rest untouched. Returns the
    /// updated note, or None if the id does not exist.
    fn update(&self, id: &str, fields: &NoteFields) -> Result<Option<Note>, RepositoryError>;

    /// Returns whether a note was actually removed.
    fn delete(&self, id: &str) -> Result<bool, RepositoryError>;
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(e: rusqlite::Error) -> Self {
        match &e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                RepositoryError::DuplicateTitle
            }
            _ => RepositoryError::Storage(e.to_string()),
        }
    }
}

impl NoteRepository for Database {
    fn insert(
        &self,
        owner_id: &str,
        display_name: Option<&str>,
        title: &str,
        body: &str,
        category: &str,
    ) -> Result<Note, RepositoryError> {
        Ok(self.insert_note(owner_id, display_name, title, body, category)?)
    }

    fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Note>, RepositoryError> {
        Ok(self.find_notes_by_owner(owner_id)?)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Note>, RepositoryError> {
        Ok(self.find_note_by_id(id)?)
    }

    fn update(&self, id: &str, fields: &NoteFields) -> Result<Option<Note>, RepositoryError> {
        Ok(self.update_note(id, fields)?)
    }

    fn delete(&self, id: &str) -> Result<bool, RepositoryError> {
        Ok(self.delete_note(id)?)
    }
}
