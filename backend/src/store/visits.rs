use rusqlite::params;
use visited_common::VisitedEntry;

use super::{Store, StoreError};

impl Store {
    /// Country codes visited by `user_id`, in scan order.
    pub fn list_visited_codes(&self, user_id: i64) -> Result<Vec<String>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT country_code FROM visited_countries WHERE user_id = ?1 ORDER BY id",
        )?;
        let codes = stmt
            .query_map(params![user_id], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(codes)
    }

    /// Record a visit unless it already exists.
    ///
    /// Returns `true` when a row was written and `false` when the pair was
    /// already present. Uniqueness is enforced by the table constraint.
    pub fn insert_visit(&self, entry: &VisitedEntry) -> Result<bool, StoreError> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "INSERT INTO visited_countries (country_code, user_id) VALUES (?1, ?2)
             ON CONFLICT (user_id, country_code) DO NOTHING",
            params![entry.country_code, entry.user_id],
        )?;
        Ok(changed == 1)
    }
}
