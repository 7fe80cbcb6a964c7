use chrono::{DateTime, Utc};
use serde::Serialize;

/// A bearer session tying a token to a user identity.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: i64,
    pub token: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
