//! Driving ports for login and registration use-cases.
//!
//! Inbound adapters call these ports to authenticate or create credentials
//! without importing hashing, token or storage adapters.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, LoginCredentials, Registration};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and issue a signed access token.
    ///
    /// Unknown users and wrong passwords both fail with
    /// [`ErrorCode::InvalidCredentials`](crate::domain::ErrorCode::InvalidCredentials)
    /// and the same message.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AccessToken, Error>;
}

/// Domain use-case port for creating credentials.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Hash the password and store a non-admin credential.
    async fn register(&self, registration: &Registration) -> Result<(), Error>;
}
