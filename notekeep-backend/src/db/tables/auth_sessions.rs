//! Auth session database operations
//!
//! The notes service itself never issues tokens; sessions are written here
//! by the identity collaborator (or the startup bootstrap) and only read
//! back during request handling.

use chrono::{Duration, Utc};
use rusqlite::Result as SqliteResult;
use uuid::Uuid;

use crate::db::Database;
use crate::models::Session;

impl Database {
    /// Create a bearer session for a user.
    pub fn create_session(&self, user_id: &str) -> SqliteResult<Session> {
        let conn = self.conn.lock().unwrap();
        let token = Uuid::new_v4().to_string();
        let created_at = Utc::now();
        let expires_at = created_at + Duration::hours(24);

        conn.execute(
            "INSERT INTO auth_sessions (token, user_id, created_at, expires_at) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                token,
                user_id,
                created_at.to_rfc3339(),
                expires_at.to_rfc3339(),
            ],
        )?;

        let id = conn.last_insert_rowid();

        Ok(Session {
            id,
            token,
            user_id: user_id.to_string(),
            created_at,
            expires_at,
        })
    }

    /// Resolve a bearer token to its session, ignoring expired tokens.
    pub fn validate_session(&self, token: &str) -> SqliteResult<Option<Session>> {
        let conn = self.conn.lock().unwrap();
        let now_str = Utc::now().to_rfc3339();

        let mut stmt = conn.prepare(
            "SELECT id, token, user_id, created_at, expires_at FROM auth_sessions
             WHERE token = ?1 AND expires_at > ?2",
        )?;

        let session = stmt
            .query_row([token, now_str.as_str()], |row| {
                let created_at_str: String = row.get(3)?;
                let expires_at_str: String = row.get(4)?;

                Ok(Session {
                    id: row.get(0)?,
                    token: row.get(1)?,
                    user_id: row.get(2)?,
                    created_at: chrono::DateTime::parse_from_rfc3339(&created_at_str)
                        .unwrap()
                        .with_timezone(&Utc),
                    expires_at: chrono::DateTime::parse_from_rfc3339(&expires_at_str)
                        .unwrap()
                        .with_timezone(&Utc),
                })
            })
            .ok();

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_session_roundtrip() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::new(db_path.to_str().unwrap()).expect("Failed to open database");

        let session = db.create_session("user-1").expect("Failed to create session");

        let resolved = db
            .validate_session(&session.token)
            .expect("Failed to validate session")
            .expect("Session should resolve");
        assert_eq!(resolved.user_id, "user-1");

        assert!(db.validate_session("not-a-token").unwrap().is_none());
    }

    #[test]
    fn test_expired_session_rejected() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::new(db_path.to_str().unwrap()).expect("Failed to open database");

        let past = (Utc::now() - Duration::hours(1)).to_rfc3339();
        db.conn
            .lock()
            .unwrap()
            .execute(
                "INSERT INTO auth_sessions (token, user_id, created_at, expires_at) VALUES (?1, ?2, ?3, ?3)",
                rusqlite::params!["stale-token", "user-1", past],
            )
            .unwrap();

        assert!(db.validate_session("stale-token").unwrap().is_none());
    }
}
