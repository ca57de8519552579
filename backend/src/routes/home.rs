//! Home page and the add-country flow.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use tower_sessions::Session;

use crate::directory::find_user;
use crate::error::AddCountryError;
use crate::render::{HomePage, Page};
use crate::session::current_user_id;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(show_home))
        .route("/add", post(add_country))
}

#[derive(Debug, Deserialize)]
pub struct AddCountryForm {
    #[serde(default)]
    pub country: String,
}

/// GET / - Current user's map.
async fn show_home(
    State(state): State<Arc<AppState>>,
    session: Session,
    headers: HeaderMap,
) -> Response {
    let user_id = current_user_id(&session, state.config.users.default_user_id).await;
    Page::Home(home_page(&state, user_id)).respond(StatusCode::OK, &headers)
}

/// POST /add - Mark a country as visited, then redirect home. Failures
/// re-render the home page with the reason.
async fn add_country(
    State(state): State<Arc<AppState>>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddCountryForm>,
) -> Response {
    let user_id = current_user_id(&session, state.config.users.default_user_id).await;

    match record_country(&state, user_id, &form.country) {
        Ok(_) => Redirect::to("/").into_response(),
        Err(e) => {
            match &e {
                AddCountryError::Persistence(source) => {
                    tracing::error!("Insert error: {}", source);
                }
                AddCountryError::Lookup(source) => {
                    tracing::error!("Country lookup error: {}", source);
                }
                _ => tracing::debug!("Add country rejected: {}", e),
            }
            let page = home_page(&state, user_id).with_error(e.to_string());
            Page::Home(page).respond(StatusCode::OK, &headers)
        }
    }
}

/// Resolve `input` and record it for `user_id`, returning the country code.
pub fn record_country(
    state: &AppState,
    user_id: i64,
    input: &str,
) -> Result<String, AddCountryError> {
    let code = state.resolver.resolve(input)?;
    match state.visits.record_visit(user_id, &code) {
        Ok(true) => Ok(code),
        Ok(false) => Err(AddCountryError::AlreadyRecorded),
        Err(e) => Err(AddCountryError::Persistence(e)),
    }
}

/// Assemble the home page for `user_id`.
///
/// A failed visit read still renders a full page, with an empty map and a
/// message.
fn home_page(state: &AppState, user_id: i64) -> HomePage {
    let user_list = state.directory.list_users();
    let color = find_user(&user_list.users, user_id)
        .map(|u| u.color.clone())
        .unwrap_or_else(|| state.directory.default_color().to_string());
    let stale = user_list.stale;

    let page = match state.visits.list_visited_codes(user_id) {
        Ok(countries) => HomePage::new(countries, user_list.users, color, user_id),
        Err(e) => {
            tracing::error!("Failed loading visited countries: {}", e);
            HomePage::new(Vec::new(), user_list.users, color, user_id)
                .with_error("Could not load visited countries (DB error)")
        }
    };
    page.with_stale_users(stale)
}
