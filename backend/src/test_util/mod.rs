//! Fixtures for unit and integration tests.

use std::sync::Arc;

use visited_common::CountryReference;

use crate::config::{
    Config, DatabaseConfig, LoggingConfig, ServerConfig, SessionConfig, UsersConfig,
};
use crate::state::AppState;
use crate::store::{Store, StoreError};

/// Reference countries loaded into every test store, in scan order.
pub const TEST_COUNTRIES: [(&str, &str); 10] = [
    ("IO", "British Indian Ocean Territory"),
    ("DE", "Germany"),
    ("FR", "France"),
    ("IN", "India"),
    ("XI", "Indiana"),
    ("KR", "Korea, Republic of"),
    ("NE", "Niger"),
    ("NG", "Nigeria"),
    ("GB", "United Kingdom"),
    ("US", "United States"),
];

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            static_dir: "public".to_string(),
        },
        database: DatabaseConfig {
            url: ":memory:".to_string(),
            countries_file: None,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
        users: UsersConfig::default(),
        session: SessionConfig::default(),
    }
}

/// In-memory store holding [`TEST_COUNTRIES`] and the built-in users.
pub fn test_store() -> Result<Store, StoreError> {
    let store = Store::open(":memory:")?;
    store.seed_users(&UsersConfig::default().seed)?;
    let countries: Vec<CountryReference> = TEST_COUNTRIES
        .iter()
        .map(|(code, name)| CountryReference::new(*code, *name))
        .collect();
    store.insert_countries(&countries)?;
    Ok(store)
}

pub fn create_test_state() -> Result<Arc<AppState>, StoreError> {
    let store = Arc::new(test_store()?);
    Ok(Arc::new(AppState::new(test_config(), store)))
}
