//! Port for credential persistence.

use async_trait::async_trait;

use crate::domain::{Credential, UserName};

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential repository adapters.
    pub enum CredentialRepositoryError {
        /// No credential exists for the user name.
        NotFound { user_name: String } => "no credential for {user_name}",
        /// Backend read, write or decode failed.
        Storage { message: String } => "credential store failure: {message}",
    }
}

/// Credential storage keyed by user name.
///
/// Records are created once and never updated in place, so there is no
/// read-modify-write cycle to guard here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Create or overwrite the credential stored under its user name.
    async fn put(&self, credential: &Credential) -> Result<(), CredentialRepositoryError>;

    /// Fetch the credential for `user_name`.
    async fn get(&self, user_name: &UserName) -> Result<Credential, CredentialRepositoryError>;
}
