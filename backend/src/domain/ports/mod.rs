//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (storage, hashing, token signing) carry their own error
//! enums built with [`define_port_error!`]; driving ports return the domain
//! [`Error`](crate::domain::Error) directly.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_gate;
mod credential_repository;
mod key_value_store;
mod login_service;
mod meal_repository;
mod meals_command;
mod meals_query;
mod password_hasher;
mod token_codec;

pub use auth_gate::AuthGate;
#[cfg(test)]
pub use auth_gate::MockAuthGate;
#[cfg(test)]
pub use credential_repository::MockCredentialRepository;
pub use credential_repository::{CredentialRepository, CredentialRepositoryError};
#[cfg(test)]
pub use key_value_store::MockKeyValueStore;
pub use key_value_store::{KeyValueStore, KeyValueStoreError};
#[cfg(test)]
pub use login_service::{MockLoginService, MockUserRegistration};
pub use login_service::{LoginService, UserRegistration};
#[cfg(test)]
pub use meal_repository::MockMealRepository;
pub use meal_repository::{MealRepository, MealRepositoryError};
pub use meals_command::MealsCommand;
#[cfg(test)]
pub use meals_command::MockMealsCommand;
pub use meals_query::MealsQuery;
#[cfg(test)]
pub use meals_query::MockMealsQuery;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use token_codec::MockTokenCodec;
pub use token_codec::{TokenCodec, TokenCodecError};

#[cfg(test)]
mod tests;
