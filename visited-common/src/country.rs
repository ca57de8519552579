//! Country reference data and free-text name matching.

use serde::{Deserialize, Serialize};

/// A row of the externally owned country list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryReference {
    /// Short fixed code, e.g. "FR".
    pub country_code: String,
    pub country_name: String,
}

impl CountryReference {
    pub fn new(country_code: impl Into<String>, country_name: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
            country_name: country_name.into(),
        }
    }
}

/// A recorded visit. At most one exists per (user_id, country_code).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitedEntry {
    pub user_id: i64,
    pub country_code: String,
}

impl VisitedEntry {
    pub fn new(user_id: i64, country_code: impl Into<String>) -> Self {
        Self {
            user_id,
            country_code: country_code.into(),
        }
    }
}

/// Split text into lowercase words. Anything that is not alphanumeric is a
/// word boundary.
fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Whether `input` occurs in `name` as whole words, ignoring case.
///
/// The input's words must appear as a contiguous run of the name's words, so
/// "india" never matches "Indiana" or "Indian Ocean", while "korea republic"
/// matches "Korea, Republic of". Input without any word characters matches
/// nothing.
pub fn matches_whole_word(name: &str, input: &str) -> bool {
    let needle = words(input);
    if needle.is_empty() {
        return false;
    }
    let haystack = words(name);
    haystack
        .windows(needle.len())
        .any(|window| window == needle.as_slice())
}
