//! Visit ledger: reading and recording visited countries.

use std::sync::Arc;

use visited_common::VisitedEntry;

use crate::store::{Store, StoreError};

pub struct VisitLedger {
    store: Arc<Store>,
}

impl VisitLedger {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Codes visited by `user_id`. A user without visits gets an empty list.
    pub fn list_visited_codes(&self, user_id: i64) -> Result<Vec<String>, StoreError> {
        self.store.list_visited_codes(user_id)
    }

    /// Record a visit. `Ok(false)` means the visit was already recorded.
    pub fn record_visit(&self, user_id: i64, country_code: &str) -> Result<bool, StoreError> {
        let inserted = self
            .store
            .insert_visit(&VisitedEntry::new(user_id, country_code))?;
        if inserted {
            tracing::info!("User {} visited {}", user_id, country_code);
        }
        Ok(inserted)
    }
}
