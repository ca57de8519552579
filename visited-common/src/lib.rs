//! Visited-countries common types
//!
//! Storage-independent types shared by the tracker backend and its tests.

pub mod country;
pub mod user;

pub use country::{matches_whole_word, CountryReference, VisitedEntry};
pub use user::User;
