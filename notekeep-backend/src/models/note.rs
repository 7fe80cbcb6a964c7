use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A personal note owned by exactly one user.
///
/// `id` and `owner_id` are assigned at creation and never change;
/// `created_at` is not touched by edits. Titles are unique across the
/// whole store, not per owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub owner_id: String,
    pub display_name: Option<String>,
    pub title: String,
    pub body: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

/// Request to create a note. `title` and `body` are required but kept
/// optional here so missing fields reach the validation step and come
/// back as per-field messages instead of a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    pub display_name: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub category: Option<String>,
}

/// Request to update a note — any subset of fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteRequest {
    pub display_name: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub category: Option<String>,
}

/// Field subset handed to the repository for an update.
/// `None` means the stored value stays as it is.
#[derive(Debug, Clone, Default)]
pub struct NoteFields {
    pub display_name: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub category: Option<String>,
}
