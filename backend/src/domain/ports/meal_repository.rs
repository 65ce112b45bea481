//! Port for the persisted meal collection.
//!
//! The whole collection is one document: there is no partial-update
//! primitive. Every mutation is load, transform, save, and the repository
//! alone gives no isolation across that cycle. The
//! [`MealStore`](crate::domain::MealStore) adds the mutation section on top.

use async_trait::async_trait;

use crate::domain::Meal;

use super::define_port_error;

define_port_error! {
    /// Errors raised by meal repository adapters.
    pub enum MealRepositoryError {
        /// The collection has never been written.
        NotFound => "meal collection has not been initialised",
        /// Backend read, write or decode failed.
        Storage { message: String } => "meal store failure: {message}",
    }
}

/// Whole-document access to the meal collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealRepository: Send + Sync {
    /// Load every meal in positional order.
    async fn load_all(&self) -> Result<Vec<Meal>, MealRepositoryError>;

    /// Replace the stored collection.
    async fn save_all(&self, meals: &[Meal]) -> Result<(), MealRepositoryError>;
}
