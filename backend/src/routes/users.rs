//! Switching between family members and adding new ones.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::post;
use axum::{Form, Router};
use serde::Deserialize;
use tower_sessions::Session;

use crate::directory::find_user;
use crate::render::{NewUserPage, Page};
use crate::session::{parse_user_id, set_current_user};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/user", post(user_intent))
        .route("/new", post(create_user))
}

/// Raw body of the user tab form.
#[derive(Debug, Default, Deserialize)]
pub struct UserForm {
    pub add: Option<String>,
    pub user: Option<String>,
}

/// What a user tab submission asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIntent {
    RequestNewUserForm,
    /// Unparsed id as submitted.
    SwitchUser(String),
    NoOp,
}

impl From<UserForm> for UserIntent {
    fn from(form: UserForm) -> Self {
        if form.add.as_deref() == Some("new") {
            return UserIntent::RequestNewUserForm;
        }
        match form.user {
            Some(user) if !user.is_empty() => UserIntent::SwitchUser(user),
            _ => UserIntent::NoOp,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewUserForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
}

/// POST /user - Show the new member form, or switch the current user.
async fn user_intent(
    State(state): State<Arc<AppState>>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<UserForm>,
) -> Response {
    match UserIntent::from(form) {
        UserIntent::RequestNewUserForm => {
            Page::NewUser(NewUserPage::default()).respond(StatusCode::OK, &headers)
        }
        UserIntent::SwitchUser(raw) => {
            switch_user(&state, &session, &raw).await;
            Redirect::to("/").into_response()
        }
        UserIntent::NoOp => Redirect::to("/").into_response(),
    }
}

/// Point the session at the user named by `raw`. Ids that don't parse or
/// don't name a listed user leave the cursor where it was.
async fn switch_user(state: &AppState, session: &Session, raw: &str) {
    let Some(user_id) = parse_user_id(raw) else {
        tracing::debug!("Ignoring non-numeric user id: {:?}", raw);
        return;
    };

    let user_list = state.directory.list_users();
    if find_user(&user_list.users, user_id).is_none() {
        tracing::warn!("Ignoring switch to unknown user {}", user_id);
        return;
    }

    set_current_user(session, user_id).await;
}

/// POST /new - Create a family member and make them current.
async fn create_user(
    State(state): State<Arc<AppState>>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<NewUserForm>,
) -> Response {
    match state.directory.create_user(&form.name, &form.color) {
        Ok(user) => {
            set_current_user(&session, user.id).await;
            Redirect::to("/").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create user: {}", e);
            let page = NewUserPage {
                error: Some("Could not create user (DB error)".to_string()),
            };
            Page::NewUser(page).respond(StatusCode::INTERNAL_SERVER_ERROR, &headers)
        }
    }
}
