//! HTTP routes.

pub mod health;
pub mod home;
pub mod users;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Build the page router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(home::router())
        .merge(users::router())
}
