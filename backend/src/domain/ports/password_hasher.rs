//! Port for the one-way password hashing primitive.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hasher adapters.
    pub enum PasswordHasherError {
        /// Hashing failed or the stored digest is malformed.
        Hash { message: String } => "password hashing failed: {message}",
    }
}

/// Salted one-way hashing used for stored credentials.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted digest of `password`.
    async fn hash(&self, password: &str) -> Result<String, PasswordHasherError>;

    /// Check `password` against a digest produced by [`PasswordHasher::hash`].
    async fn verify(&self, password: &str, digest: &str) -> Result<bool, PasswordHasherError>;
}
