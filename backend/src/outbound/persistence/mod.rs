//! Repositories persisting domain records through a [`KeyValueStore`].
//!
//! [`KeyValueStore`]: crate::domain::ports::KeyValueStore

mod credential_repository;
mod meal_repository;
mod records;

pub use credential_repository::KeyValueCredentialRepository;
pub use meal_repository::{KeyValueMealRepository, MEALS_KEY};
