//! User directory: the user list with a last-known-good fallback.

use std::sync::{Arc, RwLock};

use serde::Serialize;
use visited_common::User;

use crate::store::{Store, StoreError};

/// Result of a user list read.
#[derive(Debug, Clone, Serialize)]
pub struct UserList {
    pub users: Vec<User>,
    /// True when storage failed or had no users and the cached list was
    /// served instead.
    pub stale: bool,
}

/// Users cached from storage, falling back to the last non-empty list.
pub struct UserDirectory {
    store: Arc<Store>,
    cache: RwLock<Vec<User>>,
    default_name: String,
    default_color: String,
}

impl UserDirectory {
    pub fn new(
        store: Arc<Store>,
        seed: Vec<User>,
        default_name: impl Into<String>,
        default_color: impl Into<String>,
    ) -> Self {
        Self {
            store,
            cache: RwLock::new(seed),
            default_name: default_name.into(),
            default_color: default_color.into(),
        }
    }

    /// Refresh from storage and return the current list.
    ///
    /// A non-empty result replaces the cache. An empty result or a query
    /// failure keeps the previous list and marks it stale.
    pub fn list_users(&self) -> UserList {
        match self.store.list_users() {
            Ok(users) if !users.is_empty() => {
                if let Ok(mut cache) = self.cache.write() {
                    *cache = users.clone();
                }
                UserList {
                    users,
                    stale: false,
                }
            }
            Ok(_) => {
                tracing::warn!("No users in storage, serving cached user list");
                UserList {
                    users: self.cached(),
                    stale: true,
                }
            }
            Err(e) => {
                tracing::error!("Failed loading users from storage: {}", e);
                UserList {
                    users: self.cached(),
                    stale: true,
                }
            }
        }
    }

    /// Create a user, substituting defaults for blank name or color.
    pub fn create_user(&self, name: &str, color: &str) -> Result<User, StoreError> {
        let name = non_blank(name).unwrap_or(&self.default_name);
        let color = non_blank(color).unwrap_or(&self.default_color);
        self.store.insert_user(name, color)
    }

    /// Color shown when the current user is unknown.
    pub fn default_color(&self) -> &str {
        &self.default_color
    }

    fn cached(&self) -> Vec<User> {
        match self.cache.read() {
            Ok(cache) => cache.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

/// Find the user with `id` in a list.
pub fn find_user(users: &[User], id: i64) -> Option<&User> {
    users.iter().find(|u| u.id == id)
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory(store: Arc<Store>) -> UserDirectory {
        UserDirectory::new(
            store,
            vec![User::new(1, "Jane", "teal"), User::new(2, "Jack", "powderblue")],
            "Unnamed",
            "gray",
        )
    }

    #[test]
    fn test_empty_storage_serves_seed_as_stale() {
        let store = Arc::new(Store::open(":memory:").unwrap());
        let dir = directory(store);

        let list = dir.list_users();
        assert!(list.stale);
        assert_eq!(list.users.len(), 2);
        assert_eq!(list.users[0].name, "Jane");
    }

    #[test]
    fn test_storage_users_replace_cache() {
        let store = Arc::new(Store::open(":memory:").unwrap());
        let dir = directory(store.clone());
        let sam = dir.create_user("Sam", "red").unwrap();

        let list = dir.list_users();
        assert!(!list.stale);
        assert_eq!(list.users, vec![sam.clone()]);

        // Storage failure keeps the last good list.
        store.execute_batch("DROP TABLE users").unwrap();
        let list = dir.list_users();
        assert!(list.stale);
        assert_eq!(list.users, vec![sam]);
    }

    #[test]
    fn test_create_user_applies_defaults_for_blank_fields() {
        let store = Arc::new(Store::open(":memory:").unwrap());
        let dir = directory(store);

        let user = dir.create_user("   ", "").unwrap();
        assert_eq!(user.name, "Unnamed");
        assert_eq!(user.color, "gray");

        let user = dir.create_user("  Sam ", " red").unwrap();
        assert_eq!(user.name, "Sam");
        assert_eq!(user.color, "red");
    }

    #[test]
    fn test_find_user() {
        let users = vec![User::new(1, "Jane", "teal"), User::new(5, "Sam", "red")];
        assert_eq!(find_user(&users, 5).map(|u| u.name.as_str()), Some("Sam"));
        assert!(find_user(&users, 2).is_none());
    }
}
