//! Credential-backed authentication, registration and token resolution.
//!
//! One service implements the three auth-facing driving ports so the
//! credential lookup, hashing and token rules live in a single place.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, OnceCell};
use tracing::{error, info};

use crate::domain::deadline::with_deadline;
use crate::domain::ports::{
    AuthGate, CredentialRepository, CredentialRepositoryError, LoginService, PasswordHasher,
    PasswordHasherError, TokenCodec, TokenCodecError, UserRegistration,
};
use crate::domain::{
    AccessToken, CallerIdentity, Credential, Error, LoginCredentials, Registration, TokenClaims,
    UserName,
};

/// Message shared by every rejected login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "invalid credentials";
/// Plaintext hashed once to give unknown-user logins a digest to verify.
const UNKNOWN_USER_PASSWORD: &str = "unknown-user-placeholder";
const INVALID_TOKEN: &str = "invalid or expired token";

/// Admin account written at startup when none exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSeed {
    pub registration: Registration,
}

/// Authentication service implementing the login, registration and auth
/// gate ports over a credential repository.
pub struct CredentialAuthService<C, H, T> {
    credentials: Arc<C>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    registration: Mutex<()>,
    unknown_user_digest: OnceCell<String>,
    timeout: Duration,
}

impl<C, H, T> CredentialAuthService<C, H, T> {
    /// Create a service; `timeout` bounds each credential store call.
    pub fn new(credentials: Arc<C>, hasher: Arc<H>, tokens: Arc<T>, timeout: Duration) -> Self {
        Self {
            credentials,
            hasher,
            tokens,
            registration: Mutex::new(()),
            unknown_user_digest: OnceCell::new(),
            timeout,
        }
    }
}

impl<C, H, T> CredentialAuthService<C, H, T>
where
    C: CredentialRepository,
    H: PasswordHasher,
    T: TokenCodec,
{
    /// Write the configured admin credential unless the name is taken.
    ///
    /// Returns `true` when a credential was created.
    pub async fn seed_admin(&self, seed: &AdminSeed) -> Result<bool, Error> {
        let _guard = self.registration.lock().await;
        let user_name = seed.registration.user_name();
        if self.lookup(user_name).await?.is_some() {
            return Ok(false);
        }
        self.store_new(&seed.registration, true).await?;
        info!(user_name = %user_name, "seeded admin credential");
        Ok(true)
    }

    async fn lookup(&self, user_name: &UserName) -> Result<Option<Credential>, Error> {
        let fetched =
            with_deadline(self.timeout, "credentials.get", self.credentials.get(user_name)).await?;
        match fetched {
            Ok(credential) => Ok(Some(credential)),
            Err(CredentialRepositoryError::NotFound { .. }) => Ok(None),
            Err(err) => Err(map_credential_error(err)),
        }
    }

    /// Run one password verification against a digest of the configured
    /// cost so a login for a missing account costs the same as a wrong
    /// password. The outcome is discarded.
    async fn verify_unknown_user(&self, password: &str) {
        let digest = self
            .unknown_user_digest
            .get_or_try_init(|| self.hasher.hash(UNKNOWN_USER_PASSWORD))
            .await;
        match digest {
            Ok(digest) => {
                let _ = self.hasher.verify(password, digest).await;
            }
            Err(err) => error!(error = %err, "placeholder digest unavailable"),
        }
    }

    async fn store_new(&self, registration: &Registration, admin: bool) -> Result<(), Error> {
        let digest = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(map_hasher_error)?;
        let credential = Credential::new(
            registration.user_name().clone(),
            registration.email(),
            digest,
            admin,
        );
        with_deadline(self.timeout, "credentials.put", self.credentials.put(&credential))
            .await?
            .map_err(map_credential_error)
    }
}

fn map_credential_error(err: CredentialRepositoryError) -> Error {
    error!(error = %err, "credential store failure");
    Error::internal(err.to_string())
}

fn map_hasher_error(err: PasswordHasherError) -> Error {
    error!(error = %err, "password hashing failure");
    Error::internal(err.to_string())
}

fn map_signing_error(err: TokenCodecError) -> Error {
    error!(error = %err, "token signing failure");
    Error::internal(err.to_string())
}

#[async_trait]
impl<C, H, T> LoginService for CredentialAuthService<C, H, T>
where
    C: CredentialRepository,
    H: PasswordHasher,
    T: TokenCodec,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AccessToken, Error> {
        let Some(stored) = self.lookup(credentials.user_name()).await? else {
            self.verify_unknown_user(credentials.password()).await;
            return Err(Error::invalid_credentials(INVALID_CREDENTIALS));
        };
        let matches = self
            .hasher
            .verify(credentials.password(), stored.password_hash())
            .await
            .map_err(map_hasher_error)?;
        if !matches {
            return Err(Error::invalid_credentials(INVALID_CREDENTIALS));
        }
        self.tokens
            .sign(&TokenClaims::new(stored.user_name().clone()))
            .map_err(map_signing_error)
    }
}

#[async_trait]
impl<C, H, T> UserRegistration for CredentialAuthService<C, H, T>
where
    C: CredentialRepository,
    H: PasswordHasher,
    T: TokenCodec,
{
    async fn register(&self, registration: &Registration) -> Result<(), Error> {
        let _guard = self.registration.lock().await;
        if self.lookup(registration.user_name()).await?.is_some() {
            return Err(Error::conflict("user already exists"));
        }
        self.store_new(registration, false).await?;
        info!(user_name = %registration.user_name(), "registered user");
        Ok(())
    }
}

#[async_trait]
impl<C, H, T> AuthGate for CredentialAuthService<C, H, T>
where
    C: CredentialRepository,
    H: PasswordHasher,
    T: TokenCodec,
{
    async fn resolve_caller(&self, bearer_token: &str) -> Result<CallerIdentity, Error> {
        let claims = self
            .tokens
            .verify(bearer_token)
            .map_err(|_| Error::unauthorized(INVALID_TOKEN))?;
        self.lookup(claims.user_name())
            .await?
            .map(|credential| credential.identity())
            .ok_or_else(|| Error::unauthorized(INVALID_TOKEN))
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
