//! Configuration for the tracker backend.

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use visited_common::User;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub users: UsersConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served for anything the app routes don't handle.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite location. `:memory:` opens a private in-memory database.
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Optional `country_code,country_name` list imported into an empty
    /// countries table at startup.
    #[serde(default)]
    pub countries_file: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            countries_file: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsersConfig {
    /// Cursor given to a browser the first time it is seen.
    #[serde(default = "default_user_id")]
    pub default_user_id: i64,
    /// Color shown when the current user can't be found, and given to new
    /// users that leave the color blank.
    #[serde(default = "default_color")]
    pub default_color: String,
    #[serde(default = "default_name")]
    pub default_name: String,
    /// Built-in family members. Written to an empty users table at startup
    /// and served while storage can't be read.
    #[serde(default = "default_seed_users")]
    pub seed: Vec<User>,
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            default_user_id: default_user_id(),
            default_color: default_color(),
            default_name: default_name(),
            seed: default_seed_users(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Sessions untouched for longer than this are dropped.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    /// Mark the cookie `Secure`. Leave off when serving plain HTTP.
    #[serde(default)]
    pub secure_cookie: bool,
    /// How often expired sessions are deleted.
    #[serde(default = "default_prune_interval")]
    pub prune_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            idle_timeout_secs: default_idle_timeout(),
            secure_cookie: false,
            prune_interval_secs: default_prune_interval(),
        }
    }
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_static_dir() -> String {
    "public".to_string()
}
fn default_database_url() -> String {
    "sqlite:./data/visited.db".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_user_id() -> i64 {
    1
}
fn default_color() -> String {
    "gray".to_string()
}
fn default_name() -> String {
    "Unnamed".to_string()
}
fn default_seed_users() -> Vec<User> {
    vec![User::new(1, "Jane", "teal"), User::new(2, "Jack", "powderblue")]
}
fn default_cookie_name() -> String {
    "visited_session".to_string()
}
fn default_idle_timeout() -> u64 {
    86_400
}
fn default_prune_interval() -> u64 {
    600
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Configuration sources (in order of precedence):
    /// 1. Environment variables (TRACKER__SECTION__KEY format)
    /// 2. config.toml file (if present)
    /// 3. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .set_default("database.url", default_database_url())?
            .set_default("logging.level", default_log_level())?
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("TRACKER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_server_config() {
        let server = ServerConfig::default();
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 3000);
        assert_eq!(server.static_dir, "public");
    }

    #[test]
    fn test_default_users_config() {
        let users = UsersConfig::default();
        assert_eq!(users.default_user_id, 1);
        assert_eq!(users.default_color, "gray");
        assert_eq!(users.default_name, "Unnamed");
        assert_eq!(users.seed.len(), 2);
        assert_eq!(users.seed[0], User::new(1, "Jane", "teal"));
        assert_eq!(users.seed[1], User::new(2, "Jack", "powderblue"));
    }

    #[test]
    fn test_deserialize_partial_sections() {
        let config: Config = ConfigLoader::builder()
            .set_override("server.port", 8081)
            .unwrap()
            .set_override("users.default_color", "black")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.users.default_color, "black");
        assert_eq!(config.database.url, "sqlite:./data/visited.db");
        assert!(config.database.countries_file.is_none());
        assert_eq!(config.session.cookie_name, "visited_session");
        assert!(!config.session.secure_cookie);
        assert_eq!(config.session.prune_interval_secs, 600);
    }
}
