//! Family members whose visits are tracked.

use serde::{Deserialize, Serialize};

/// A user row. Ids are assigned by storage and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    /// CSS color token used for the user's tab and map highlights.
    pub color: String,
}

impl User {
    pub fn new(id: i64, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
        }
    }
}
