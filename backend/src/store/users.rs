use rusqlite::params;
use visited_common::User;

use super::{Store, StoreError};

impl Store {
    /// All users ordered by id.
    pub fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, name, color FROM users ORDER BY id")?;
        let users = stmt
            .query_map([], |row| {
                Ok(User {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    color: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    /// Insert a user and return it with its assigned id.
    pub fn insert_user(&self, name: &str, color: &str) -> Result<User, StoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO users (name, color) VALUES (?1, ?2)",
            params![name, color],
        )?;
        let id = conn.last_insert_rowid();

        tracing::info!("Created new user: {} ({}, {})", id, name, color);

        Ok(User::new(id, name, color))
    }

    /// Write `users` with their ids when the table is empty, so the
    /// built-in family members can own visits. Returns how many rows were
    /// written.
    pub fn seed_users(&self, users: &[User]) -> Result<usize, StoreError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let existing: i64 = tx.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        if existing > 0 {
            return Ok(0);
        }

        let mut added = 0;
        {
            let mut stmt = tx.prepare("INSERT INTO users (id, name, color) VALUES (?1, ?2, ?3)")?;
            for user in users {
                added += stmt.execute(params![user.id, user.name, user.color])?;
            }
        }
        tx.commit()?;

        if added > 0 {
            tracing::info!("Seeded {} users", added);
        }
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_user_assigns_increasing_ids() {
        let store = Store::open(":memory:").unwrap();
        let first = store.insert_user("Jane", "teal").unwrap();
        let second = store.insert_user("Jack", "powderblue").unwrap();
        assert!(second.id > first.id);

        let users = store.list_users().unwrap();
        assert_eq!(users, vec![first, second]);
    }

    #[test]
    fn test_seed_users_only_fills_empty_table() {
        let store = Store::open(":memory:").unwrap();
        let seed = vec![User::new(1, "Jane", "teal"), User::new(2, "Jack", "powderblue")];

        assert_eq!(store.seed_users(&seed).unwrap(), 2);
        assert_eq!(store.list_users().unwrap(), seed);
        assert_eq!(store.seed_users(&seed).unwrap(), 0);

        // New users continue after the seeded ids.
        let sam = store.insert_user("Sam", "red").unwrap();
        assert_eq!(sam.id, 3);
    }
}
