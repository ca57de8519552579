//! SQLite storage for users, reference countries, visits and sessions.

mod countries;
mod sessions;
mod users;
mod visits;

pub use countries::parse_countries;
pub use sessions::SessionRow;

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;

/// SQLite-backed store shared by all requests.
pub struct Store {
    conn: Mutex<Connection>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid countries file at line {line}: {reason}")]
    InvalidCountries { line: usize, reason: String },
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

// The bundled SQLite enforces foreign keys, so every user a visit names must
// have a row. See `Store::seed_users`.
const SCHEMA: &str = "
    PRAGMA foreign_keys = ON;
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        color TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS countries (
        country_code TEXT PRIMARY KEY,
        country_name TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS visited_countries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id),
        country_code TEXT NOT NULL REFERENCES countries(country_code),
        UNIQUE (user_id, country_code)
    );
    CREATE INDEX IF NOT EXISTS idx_visited_countries_user_id ON visited_countries(user_id);
    CREATE TABLE IF NOT EXISTS sessions (
        id TEXT PRIMARY KEY,
        data TEXT NOT NULL,
        expiry_date INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_sessions_expiry_date ON sessions(expiry_date);
";

impl Store {
    /// Open (and create if needed) the database at `database_url`.
    ///
    /// Accepts a plain path, a `sqlite:` prefixed path, or `:memory:`.
    pub fn open(database_url: &str) -> Result<Self, StoreError> {
        let path = database_url.strip_prefix("sqlite:").unwrap_or(database_url);

        let conn = if path == ":memory:" || path.is_empty() {
            Connection::open_in_memory()?
        } else {
            if let Some(parent) = Path::new(path).parent() {
                std::fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
            }
            Connection::open(path)?
        };

        conn.execute_batch(SCHEMA)?;

        let location = if path.is_empty() { ":memory:" } else { path };
        tracing::info!("Store initialized with database: {}", location);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run raw SQL statements, e.g. fixtures or maintenance scripts.
    pub fn execute_batch(&self, sql: &str) -> Result<(), StoreError> {
        self.lock()?.execute_batch(sql)?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}
