//! Shared application state.

use std::sync::Arc;

use crate::config::Config;
use crate::directory::UserDirectory;
use crate::resolver::CountryResolver;
use crate::store::Store;
use crate::visits::VisitLedger;

/// Shared application state passed to all handlers.
pub struct AppState {
    pub config: Config,
    pub store: Arc<Store>,
    pub directory: UserDirectory,
    pub resolver: CountryResolver,
    pub visits: VisitLedger,
}

impl AppState {
    pub fn new(config: Config, store: Arc<Store>) -> Self {
        let directory = UserDirectory::new(
            store.clone(),
            config.users.seed.clone(),
            config.users.default_name.clone(),
            config.users.default_color.clone(),
        );

        Self {
            resolver: CountryResolver::new(store.clone()),
            visits: VisitLedger::new(store.clone()),
            directory,
            store,
            config,
        }
    }
}
