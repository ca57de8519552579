use rusqlite::{params, OptionalExtension};

use super::{Store, StoreError};

/// A persisted browser session: JSON data plus a unix expiry timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRow {
    pub data: String,
    pub expiry_date: i64,
}

impl Store {
    /// Insert or replace the session `id`.
    pub fn save_session(&self, id: &str, row: &SessionRow) -> Result<(), StoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO sessions (id, data, expiry_date) VALUES (?1, ?2, ?3)
             ON CONFLICT (id) DO UPDATE
             SET data = excluded.data, expiry_date = excluded.expiry_date",
            params![id, row.data, row.expiry_date],
        )?;
        Ok(())
    }

    /// Session `id` if it hasn't expired by `now`.
    pub fn load_session(&self, id: &str, now: i64) -> Result<Option<SessionRow>, StoreError> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                "SELECT data, expiry_date FROM sessions WHERE id = ?1 AND expiry_date > ?2",
                params![id, now],
                |row| {
                    Ok(SessionRow {
                        data: row.get(0)?,
                        expiry_date: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    pub fn session_exists(&self, id: &str) -> Result<bool, StoreError> {
        let conn = self.lock()?;
        let found = conn
            .query_row("SELECT 1 FROM sessions WHERE id = ?1", params![id], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }

    pub fn delete_session(&self, id: &str) -> Result<(), StoreError> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM sessions WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// Drop every session that expired by `now`. Returns how many went.
    pub fn delete_expired_sessions(&self, now: i64) -> Result<usize, StoreError> {
        let conn = self.lock()?;
        let deleted = conn.execute("DELETE FROM sessions WHERE expiry_date <= ?1", params![now])?;
        Ok(deleted)
    }

    pub fn session_count(&self) -> Result<u64, StoreError> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(data: &str, expiry_date: i64) -> SessionRow {
        SessionRow {
            data: data.to_string(),
            expiry_date,
        }
    }

    #[test]
    fn test_save_replaces_existing_session() {
        let store = Store::open(":memory:").unwrap();
        store.save_session("a", &row("{}", 100)).unwrap();
        store.save_session("a", &row(r#"{"current_user_id":2}"#, 200)).unwrap();

        assert_eq!(store.session_count().unwrap(), 1);
        assert_eq!(
            store.load_session("a", 150).unwrap(),
            Some(row(r#"{"current_user_id":2}"#, 200))
        );
    }

    #[test]
    fn test_expired_sessions_are_hidden_and_deleted() {
        let store = Store::open(":memory:").unwrap();
        store.save_session("old", &row("{}", 100)).unwrap();
        store.save_session("fresh", &row("{}", 500)).unwrap();

        assert_eq!(store.load_session("old", 100).unwrap(), None);
        assert!(store.session_exists("old").unwrap());

        assert_eq!(store.delete_expired_sessions(100).unwrap(), 1);
        assert!(!store.session_exists("old").unwrap());
        assert!(store.load_session("fresh", 100).unwrap().is_some());
    }

    #[test]
    fn test_delete_session() {
        let store = Store::open(":memory:").unwrap();
        store.save_session("a", &row("{}", 100)).unwrap();
        store.delete_session("a").unwrap();
        assert_eq!(store.session_count().unwrap(), 0);
    }
}
