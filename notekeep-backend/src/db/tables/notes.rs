//! Notes table operations

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Result as SqliteResult};
use uuid::Uuid;

use crate::db::Database;
use crate::models::{Note, NoteFields};

impl Database {
    /// Insert a note, assigning its id and creation time.
    pub fn insert_note(
        &self,
        owner_id: &str,
        display_name: Option<&str>,
        title: &str,
        body: &str,
        category: &str,
    ) -> SqliteResult<Note> {
        let conn = self.conn.lock().unwrap();
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now();

        conn.execute(
            "INSERT INTO notes (id, owner_id, display_name, title, body, category, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                id,
                owner_id,
                display_name,
                title,
                body,
                category,
                created_at.to_rfc3339(),
            ],
        )?;

        Ok(Note {
            id,
            owner_id: owner_id.to_string(),
            display_name: display_name.map(|s| s.to_string()),
            title: title.to_string(),
            body: body.to_string(),
            category: category.to_string(),
            created_at,
        })
    }

    /// All notes belonging to an owner, newest first.
    pub fn find_notes_by_owner(&self, owner_id: &str) -> SqliteResult<Vec<Note>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            "SELECT id, owner_id, display_name, title, body, category, created_at
             FROM notes WHERE owner_id = ?1 ORDER BY created_at DESC, rowid DESC",
        )?;

        let notes = stmt
            .query_map([owner_id], Self::row_to_note)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(notes)
    }

    pub fn find_note_by_id(&self, id: &str) -> SqliteResult<Option<Note>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            "SELECT id, owner_id, display_name, title, body, category, created_at
             FROM notes WHERE id = ?1",
        )?;

        stmt.query_row([id], Self::row_to_note).optional()
    }

    /// Apply the provided fields to a note; absent fields keep their stored
    /// values. Returns the updated row, or None if the id does not exist.
    pub fn update_note(&self, id: &str, fields: &NoteFields) -> SqliteResult<Option<Note>> {
        {
            let conn = self.conn.lock().unwrap();

            let affected = conn.execute(
                "UPDATE notes SET
                     display_name = COALESCE(?2, display_name),
                     title = COALESCE(?3, title),
                     body = COALESCE(?4, body),
                     category = COALESCE(?5, category)
                 WHERE id = ?1",
                params![
                    id,
                    fields.display_name,
                    fields.title,
                    fields.body,
                    fields.category,
                ],
            )?;

            if affected == 0 {
                return Ok(None);
            }
        }

        self.find_note_by_id(id)
    }

    /// Permanently remove a note. Returns whether a row was deleted.
    pub fn delete_note(&self, id: &str) -> SqliteResult<bool> {
        let conn = self.conn.lock().unwrap();
        let rows_affected = conn.execute("DELETE FROM notes WHERE id = ?1", [id])?;
        Ok(rows_affected > 0)
    }

    fn row_to_note(row: &rusqlite::Row) -> rusqlite::Result<Note> {
        let created_at_str: String = row.get(6)?;

        Ok(Note {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            display_name: row.get(2)?,
            title: row.get(3)?,
            body: row.get(4)?,
            category: row.get(5)?,
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .unwrap()
                .with_timezone(&Utc),
        })
    }
}
