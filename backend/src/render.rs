//! Server-rendered pages.
//!
//! Pages are plain data structs. They render as HTML for browsers, or as
//! JSON with the same field names when the client asks for
//! `application/json`.

use std::fmt::Write as _;

use axum::http::header::ACCEPT;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use visited_common::User;

/// Everything the home page shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    /// Visited country codes in ledger order.
    pub countries: Vec<String>,
    pub total: usize,
    pub users: Vec<User>,
    /// Current user's color.
    pub color: String,
    pub current_user_id: i64,
    /// Set when storage couldn't list users and a cached list is shown.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub users_stale: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HomePage {
    pub fn new(
        countries: Vec<String>,
        users: Vec<User>,
        color: String,
        current_user_id: i64,
    ) -> Self {
        Self {
            total: countries.len(),
            countries,
            users,
            color,
            current_user_id,
            users_stale: false,
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_stale_users(mut self, stale: bool) -> Self {
        self.users_stale = stale;
        self
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str(HEAD);

        let _ = writeln!(html, "<h2 class=\"total-count\">Total Countries: {}</h2>", self.total);

        html.push_str("<form class=\"container\" action=\"/add\" method=\"post\">\n");
        let placeholder = self.error.as_deref().unwrap_or("Enter country name");
        let _ = writeln!(
            html,
            "  <input type=\"text\" name=\"country\" autofocus placeholder=\"{}\">",
            escape(placeholder)
        );
        let _ = writeln!(
            html,
            "  <button class=\"add\" type=\"submit\" style=\"background-color: {}\">Add</button>",
            escape(&self.color)
        );
        html.push_str("</form>\n");

        if let Some(error) = &self.error {
            let _ = writeln!(html, "<p class=\"error\" role=\"alert\">{}</p>", escape(error));
        }

        html.push_str("<form class=\"tabs\" action=\"/user\" method=\"post\">\n");
        for user in &self.users {
            let current = if user.id == self.current_user_id {
                " class=\"current\""
            } else {
                ""
            };
            let _ = writeln!(
                html,
                "  <button type=\"submit\" name=\"user\" value=\"{}\" \
                 style=\"background-color: {}\"{}>{}</button>",
                user.id,
                escape(&user.color),
                current,
                escape(&user.name)
            );
        }
        html.push_str(
            "  <button type=\"submit\" name=\"add\" value=\"new\">Add Family Member</button>\n",
        );
        html.push_str("</form>\n");
        if self.users_stale {
            html.push_str("<p class=\"notice\">Showing cached family members</p>\n");
        }

        html.push_str("<ul class=\"visited\">\n");
        for code in &self.countries {
            let _ = writeln!(
                html,
                "  <li data-code=\"{0}\" style=\"background-color: {1}\">{0}</li>",
                escape(code),
                escape(&self.color)
            );
        }
        html.push_str("</ul>\n");

        html.push_str(FOOT);
        html
    }
}

/// The "add family member" form.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NewUserPage {
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str(HEAD);
        html.push_str("<h1>Add a family member</h1>\n");
        if let Some(error) = &self.error {
            let _ = writeln!(html, "<p class=\"error\" role=\"alert\">{}</p>", escape(error));
        }
        html.push_str(
            "<form action=\"/new\" method=\"post\">\n  \
             <input type=\"text\" name=\"name\" autofocus placeholder=\"Name\">\n  \
             <p>Pick a color:</p>\n",
        );
        for color in COLOR_CHOICES {
            let _ = writeln!(
                html,
                "  <label><input type=\"radio\" name=\"color\" value=\"{0}\">\
                 <span style=\"background-color: {0}\"></span></label>",
                color
            );
        }
        html.push_str("  <button type=\"submit\">Add</button>\n</form>\n");
        html.push_str(FOOT);
        html
    }
}

/// A page ready to be written to the client.
#[derive(Debug, Clone)]
pub enum Page {
    Home(HomePage),
    NewUser(NewUserPage),
}

impl Page {
    /// Render for a client, choosing JSON or HTML from its `Accept` header.
    pub fn respond(self, status: StatusCode, headers: &HeaderMap) -> Response {
        if wants_json(headers) {
            match self {
                Page::Home(page) => (status, Json(page)).into_response(),
                Page::NewUser(page) => (status, Json(page)).into_response(),
            }
        } else {
            let html = match &self {
                Page::Home(page) => page.to_html(),
                Page::NewUser(page) => page.to_html(),
            };
            (status, Html(html)).into_response()
        }
    }
}

const COLOR_CHOICES: [&str; 8] = [
    "red", "orange", "yellow", "olive", "green", "teal", "blue", "violet",
];

const HEAD: &str = "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"UTF-8\">\n  \
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n  \
<title>Travel Tracker</title>\n  \
<link rel=\"stylesheet\" href=\"/styles/main.css\">\n</head>\n<body>\n";

const FOOT: &str = "</body>\n</html>\n";

/// Whether the client prefers JSON over HTML.
pub fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|accept| {
            let json = accept.find("application/json");
            let html = accept.find("text/html");
            match (json, html) {
                (Some(j), Some(h)) => j < h,
                (Some(_), None) => true,
                _ => false,
            }
        })
        .unwrap_or(false)
}

/// Escape text for HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
