//! NoteService — the ownership-checked CRUD contract.
//!
//! Every operation takes the caller identity as an explicit argument; the
//! transport layer resolves it from the bearer token before calling in.
//! Validation runs before any persistence, and the ownership guard runs
//! between lookup and mutation.

use std::sync::Arc;

use crate::error::{FieldError, ServiceError};
use crate::models::{CreateNoteRequest, Note, NoteFields, UpdateNoteRequest};
use crate::repository::NoteRepository;

pub const DEFAULT_CATEGORY: &str = "personal";

pub struct NoteService {
    repo: Arc<dyn NoteRepository>,
}

impl NoteService {
    pub fn new(repo: Arc<dyn NoteRepository>) -> Self {
        Self { repo }
    }

    /// All notes owned by the caller, newest first. An empty vec is a
    /// valid outcome, not an error.
    pub fn list(&self, caller_id: &str) -> Result<Vec<Note>, ServiceError> {
        Ok(self.repo.find_by_owner(caller_id)?)
    }

    /// Create a note owned by the caller. The owner is always the caller;
    /// nothing in the request body can assign a different one.
    pub fn create(&self, caller_id: &str, req: CreateNoteRequest) -> Result<Note, ServiceError> {
        let title = req.title.as_deref().unwrap_or("");
        let body = req.body.as_deref().unwrap_or("");

        let mut errors = Vec::new();
        if title.trim().is_empty() {
            errors.push(FieldError {
                field: "title",
                message: "Title is required",
            });
        }
        if body.trim().is_empty() {
            errors.push(FieldError {
                field: "body",
                message: "Body is required",
            });
        }
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }

        let category = req
            .category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(DEFAULT_CATEGORY);

        let note = self
            .repo
            .insert(caller_id, req.display_name.as_deref(), title, body, category)?;
        Ok(note)
    }

    /// Update the caller's note. Only the provided fields change; an empty
    /// string counts as absent so a persisted note never loses its
    /// required title or body.
    pub fn update(
        &self,
        caller_id: &str,
        note_id: &str,
        req: UpdateNoteRequest,
    ) -> Result<Note, ServiceError> {
        let existing = self.repo.find_by_id(note_id)?.ok_or(ServiceError::NotFound)?;
        if existing.owner_id != caller_id {
            return Err(ServiceError::Authorization);
        }

        let fields = NoteFields {
            display_name: req.display_name.filter(|s| !s.trim().is_empty()),
            title: req.title.filter(|s| !s.trim().is_empty()),
            body: req.body.filter(|s| !s.trim().is_empty()),
            category: req.category.filter(|s| !s.trim().is_empty()),
        };

        match self.repo.update(note_id, &fields)? {
            Some(note) => Ok(note),
            None => Err(ServiceError::NotFound),
        }
    }

    /// Delete the caller's note permanently. No trash, no undo.
    pub fn delete(&self, caller_id: &str, note_id: &str) -> Result<(), ServiceError> {
        let existing = self.repo.find_by_id(note_id)?.ok_or(ServiceError::NotFound)?;
        if existing.owner_id != caller_id {
            return Err(ServiceError::Authorization);
        }

        if !self.repo.delete(note_id)? {
            return Err(ServiceError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use tempfile::tempdir;

    fn service(dir: &tempfile::TempDir) -> NoteService {
        let db_path = dir.path().join("notes.db");
        let db = Database::new(db_path.to_str().unwrap()).expect("Failed to open database");
        NoteService::new(Arc::new(db))
    }

    fn create_req(title: &str, body: &str) -> CreateNoteRequest {
        CreateNoteRequest {
            title: Some(title.to_string()),
            body: Some(body.to_string()),
            ..CreateNoteRequest::default()
        }
    }

    #[test]
    fn test_create_sets_owner_and_defaults() {
        let dir = tempdir().unwrap();
        let svc = service(&dir);

        let note = svc
            .create("user-1", create_req("A", "hello"))
            .expect("Failed to create note");

        assert!(!note.id.is_empty());
        assert_eq!(note.owner_id, "user-1");
        assert_eq!(note.category, "personal");
        assert_eq!(note.display_name, None);
    }

    #[test]
    fn test_create_ignores_owner_in_body() {
        let dir = tempdir().unwrap();
        let svc = service(&dir);

        // An ownerId smuggled into the request body has nowhere to land.
        let req: CreateNoteRequest = serde_json::from_str(
            r#"{"title": "Sneaky", "body": "text", "ownerId": "user-2"}"#,
        )
        .expect("Failed to parse request");

        let note = svc.create("user-1", req).expect("Failed to create note");
        assert_eq!(note.owner_id, "user-1");
    }

    #[test]
    fn test_create_validation_persists_nothing() {
        let dir = tempdir().unwrap();
        let svc = service(&dir);

        let err = svc
            .create("user-1", CreateNoteRequest::default())
            .expect_err("Create should fail");

        match err {
            ServiceError::Validation(errors) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
                assert_eq!(fields, vec!["title", "body"]);
            }
            other => panic!("Expected validation error, got {:?}", other),
        }

        assert!(svc.list("user-1").unwrap().is_empty());
    }

    #[test]
    fn test_create_whitespace_title_rejected() {
        let dir = tempdir().unwrap();
        let svc = service(&dir);

        let err = svc
            .create("user-1", create_req("   ", "body"))
            .expect_err("Create should fail");

        match err {
            ServiceError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "title");
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_title_conflicts_across_owners() {
        let dir = tempdir().unwrap();
        let svc = service(&dir);

        svc.create("user-1", create_req("Shared title", "a")).unwrap();
        let err = svc
            .create("user-2", create_req("Shared title", "b"))
            .expect_err("Second create should fail");

        assert!(matches!(err, ServiceError::Conflict));
        assert!(svc.list("user-2").unwrap().is_empty());
    }

    #[test]
    fn test_list_is_owner_scoped_newest_first() {
        let dir = tempdir().unwrap();
        let svc = service(&dir);

        svc.create("user-1", create_req("First", "1")).unwrap();
        svc.create("user-2", create_req("Theirs", "2")).unwrap();
        svc.create("user-1", create_req("Second", "3")).unwrap();

        let notes = svc.list("user-1").expect("Failed to list notes");
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].title, "Second");
        assert_eq!(notes[1].title, "First");
        assert!(notes.iter().all(|n| n.owner_id == "user-1"));
    }

    #[test]
    fn test_update_subset_preserves_other_fields() {
        let dir = tempdir().unwrap();
        let svc = service(&dir);

        let note = svc
            .create(
                "user-1",
                CreateNoteRequest {
                    display_name: Some("label".to_string()),
                    title: Some("Original".to_string()),
                    body: Some("Old body".to_string()),
                    category: Some("work".to_string()),
                },
            )
            .unwrap();

        let updated = svc
            .update(
                "user-1",
                &note.id,
                UpdateNoteRequest {
                    body: Some("New body".to_string()),
                    ..UpdateNoteRequest::default()
                },
            )
            .expect("Failed to update note");

        assert_eq!(updated.body, "New body");
        assert_eq!(updated.title, "Original");
        assert_eq!(updated.display_name.as_deref(), Some("label"));
        assert_eq!(updated.category, "work");
        assert_eq!(updated.created_at, note.created_at);
    }

    #[test]
    fn test_update_writes_the_fields_it_names() {
        let dir = tempdir().unwrap();
        let svc = service(&dir);

        let note = svc.create("user-1", create_req("Before", "old text")).unwrap();

        let updated = svc
            .update(
                "user-1",
                &note.id,
                UpdateNoteRequest {
                    title: Some("After".to_string()),
                    body: Some("new text".to_string()),
                    ..UpdateNoteRequest::default()
                },
            )
            .expect("Failed to update note");

        assert_eq!(updated.title, "After");
        assert_eq!(updated.body, "new text");
    }

    #[test]
    fn test_update_empty_string_treated_as_absent() {
        let dir = tempdir().unwrap();
        let svc = service(&dir);

        let note = svc.create("user-1", create_req("Keep me", "body")).unwrap();

        let updated = svc
            .update(
                "user-1",
                &note.id,
                UpdateNoteRequest {
                    title: Some(String::new()),
                    ..UpdateNoteRequest::default()
                },
            )
            .expect("Failed to update note");

        assert_eq!(updated.title, "Keep me");
    }

    #[test]
    fn test_update_by_non_owner_rejected_and_unchanged() {
        let dir = tempdir().unwrap();
        let svc = service(&dir);

        let note = svc.create("user-1", create_req("Mine", "original")).unwrap();

        let err = svc
            .update(
                "user-2",
                &note.id,
                UpdateNoteRequest {
                    body: Some("hijacked".to_string()),
                    ..UpdateNoteRequest::default()
                },
            )
            .expect_err("Update should fail");
        assert!(matches!(err, ServiceError::Authorization));

        let after = svc.list("user-1").unwrap();
        assert_eq!(after[0].body, "original");
    }

    #[test]
    fn test_delete_by_non_owner_rejected() {
        let dir = tempdir().unwrap();
        let svc = service(&dir);

        let note = svc.create("user-1", create_req("Mine", "body")).unwrap();

        let err = svc.delete("user-2", &note.id).expect_err("Delete should fail");
        assert!(matches!(err, ServiceError::Authorization));
        assert_eq!(svc.list("user-1").unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let dir = tempdir().unwrap();
        let svc = service(&dir);

        let err = svc
            .update("user-1", "missing-id", UpdateNoteRequest::default())
            .expect_err("Update should fail");
        assert!(matches!(err, ServiceError::NotFound));

        let err = svc.delete("user-1", "missing-id").expect_err("Delete should fail");
        assert!(matches!(err, ServiceError::NotFound));
    }

    #[test]
    fn test_full_lifecycle_scenario() {
        let dir = tempdir().unwrap();
        let svc = service(&dir);

        let note = svc.create("u1", create_req("A", "hello")).unwrap();
        assert_eq!(note.owner_id, "u1");
        assert_eq!(note.category, "personal");

        let mine = svc.list("u1").unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, note.id);

        assert!(svc.list("u2").unwrap().is_empty());

        let err = svc
            .update("u2", &note.id, UpdateNoteRequest::default())
            .expect_err("Non-owner update should fail");
        assert!(matches!(err, ServiceError::Authorization));

        svc.delete("u1", &note.id).expect("Owner delete should succeed");

        let err = svc.delete("u1", &note.id).expect_err("Second delete should fail");
        assert!(matches!(err, ServiceError::NotFound));
    }
}
