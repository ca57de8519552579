//! Free-text country name resolution.

use std::sync::Arc;

use visited_common::matches_whole_word;

use crate::store::{Store, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Empty country name")]
    EmptyInput,
    #[error("Country not found: {0}")]
    NotFound(String),
    #[error("Country lookup failed: {0}")]
    Lookup(#[from] StoreError),
}

/// Maps user input to a country code.
pub struct CountryResolver {
    store: Arc<Store>,
}

impl CountryResolver {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Resolve `input` to a country code.
    ///
    /// Tries a case-insensitive exact name match first, then a whole-word
    /// match anywhere in a name. When several names match, the first in
    /// storage scan order wins.
    pub fn resolve(&self, input: &str) -> Result<String, ResolveError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ResolveError::EmptyInput);
        }

        let countries = self.store.list_countries()?;

        let folded = input.to_lowercase();
        if let Some(exact) = countries
            .iter()
            .find(|c| c.country_name.to_lowercase() == folded)
        {
            return Ok(exact.country_code.clone());
        }

        countries
            .into_iter()
            .find(|c| matches_whole_word(&c.country_name, input))
            .map(|c| {
                tracing::debug!("Resolved '{}' to {} by whole word", input, c.country_code);
                c.country_code
            })
            .ok_or_else(|| ResolveError::NotFound(input.to_string()))
    }
}
