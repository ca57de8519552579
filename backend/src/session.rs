//! Per-browser "current user" cursors.
//!
//! Each browser carries a `tower-sessions` cookie. The session record holds
//! the id of the user whose map is being viewed, so two browsers switching
//! users never see each other's cursor. Records live in the SQLite store and
//! expire after a period of inactivity.

use std::fmt;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use time::{Duration, OffsetDateTime};
use tower_sessions::cookie::SameSite;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, SessionStore};
use tower_sessions::{Expiry, Session, SessionManagerLayer};

use crate::config::SessionConfig;
use crate::store::{SessionRow, Store, StoreError};

/// Session key holding the current user's id.
pub const CURRENT_USER_KEY: &str = "current_user_id";

/// The session's current user, or `default_user_id` if it never picked one.
pub async fn current_user_id(session: &Session, default_user_id: i64) -> i64 {
    match session.get::<i64>(CURRENT_USER_KEY).await {
        Ok(Some(id)) => id,
        Ok(None) => default_user_id,
        Err(e) => {
            tracing::error!("Failed reading session cursor: {}", e);
            default_user_id
        }
    }
}

/// Point the session at `user_id`. Last write wins.
pub async fn set_current_user(session: &Session, user_id: i64) {
    if let Err(e) = session.insert(CURRENT_USER_KEY, user_id).await {
        tracing::error!("Failed storing session cursor: {}", e);
    }
}

/// Parse a user id submitted by a form. Anything that isn't an integer is
/// rejected so the caller can keep the previous cursor.
pub fn parse_user_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Cookie session layer backed by `store`.
pub fn session_layer(
    store: Arc<Store>,
    config: &SessionConfig,
) -> SessionManagerLayer<SqliteSessionStore> {
    let idle = Duration::seconds(i64::try_from(config.idle_timeout_secs).unwrap_or(i64::MAX));
    SessionManagerLayer::new(SqliteSessionStore::new(store))
        .with_name(config.cookie_name.clone())
        .with_secure(config.secure_cookie)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(idle))
}

/// Session records kept in the `sessions` table.
#[derive(Clone)]
pub struct SqliteSessionStore {
    store: Arc<Store>,
}

impl SqliteSessionStore {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Delete expired records. Returns how many were removed.
    pub fn delete_expired(&self) -> Result<usize, StoreError> {
        self.store
            .delete_expired_sessions(OffsetDateTime::now_utc().unix_timestamp())
    }

    /// Delete expired records every `period`, forever.
    pub async fn prune_expired(self, period: StdDuration) {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            match self.delete_expired() {
                Ok(0) => {}
                Ok(deleted) => tracing::debug!("Pruned {} expired sessions", deleted),
                Err(e) => tracing::warn!("Failed pruning expired sessions: {}", e),
            }
        }
    }
}

impl fmt::Debug for SqliteSessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteSessionStore").finish_non_exhaustive()
    }
}

fn backend(e: StoreError) -> session_store::Error {
    session_store::Error::Backend(e.to_string())
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        while self
            .store
            .session_exists(&record.id.to_string())
            .map_err(backend)?
        {
            record.id = Id::default();
        }
        self.save(record).await
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        let data = serde_json::to_string(&record.data)
            .map_err(|e| session_store::Error::Encode(e.to_string()))?;
        let row = SessionRow {
            data,
            expiry_date: record.expiry_date.unix_timestamp(),
        };
        self.store
            .save_session(&record.id.to_string(), &row)
            .map_err(backend)
    }

    async fn load(&self, id: &Id) -> session_store::Result<Option<Record>> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let Some(row) = self.store.load_session(&id.to_string(), now).map_err(backend)? else {
            return Ok(None);
        };

        let data = serde_json::from_str(&row.data)
            .map_err(|e| session_store::Error::Decode(e.to_string()))?;
        let expiry_date = OffsetDateTime::from_unix_timestamp(row.expiry_date)
            .map_err(|e| session_store::Error::Decode(e.to_string()))?;

        Ok(Some(Record {
            id: *id,
            data,
            expiry_date,
        }))
    }

    async fn delete(&self, id: &Id) -> session_store::Result<()> {
        self.store.delete_session(&id.to_string()).map_err(backend)
    }
}
