pub mod config;
pub mod directory;
pub mod error;
pub mod logging;
pub mod render;
pub mod resolver;
pub mod routes;
pub mod session;
pub mod state;
pub mod store;
pub mod test_util;
pub mod visits;

pub use config::Config;
pub use directory::{UserDirectory, UserList};
pub use error::{AddCountryError, AppError};
pub use render::{HomePage, NewUserPage, Page};
pub use resolver::{CountryResolver, ResolveError};
pub use session::SqliteSessionStore;
pub use state::AppState;
pub use store::{Store, StoreError};
pub use visits::VisitLedger;

use std::sync::Arc;

use axum::{middleware, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Open the configured database and load its fixtures.
///
/// The built-in users are written to an empty users table so visits can
/// reference them. Reference countries are imported from
/// `database.countries_file` into an empty countries table.
pub fn bootstrap_store(config: &Config) -> Result<Store, BootstrapError> {
    let store = Store::open(&config.database.url)?;
    store.seed_users(&config.users.seed)?;

    if let Some(ref path) = config.database.countries_file {
        if store.country_count()? == 0 {
            let content =
                std::fs::read_to_string(path).map_err(|e| BootstrapError::CountriesFile {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
            let added = store.insert_countries(&store::parse_countries(&content)?)?;
            tracing::info!("Imported {} countries from {}", added, path);
        }
    }

    Ok(store)
}

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Failed to read countries file {path}: {reason}")]
    CountriesFile { path: String, reason: String },
}

/// Build the full application router: pages, health, static files.
pub fn app(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.config.server.static_dir);
    let sessions = session::session_layer(state.store.clone(), &state.config.session);

    Router::new()
        .merge(routes::router())
        .merge(routes::health::router())
        .fallback_service(static_files)
        .layer(sessions)
        .layer(middleware::from_fn(logging::request_logger))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
