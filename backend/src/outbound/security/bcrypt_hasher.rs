//! bcrypt-backed [`PasswordHasher`].

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// Default work factor for newly stored digests.
pub const DEFAULT_BCRYPT_COST: u32 = 9;

/// bcrypt hasher running each digest on the blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Hasher producing digests with the given work factor.
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

async fn on_blocking_pool<T, F>(work: F) -> Result<T, PasswordHasherError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, bcrypt::BcryptError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| PasswordHasherError::hash(format!("blocking task failed: {err}")))?
        .map_err(|err| PasswordHasherError::hash(err.to_string()))
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, PasswordHasherError> {
        let password = Zeroizing::new(password.to_owned());
        let cost = self.cost;
        on_blocking_pool(move || bcrypt::hash(password.as_str(), cost)).await
    }

    async fn verify(&self, password: &str, digest: &str) -> Result<bool, PasswordHasherError> {
        let password = Zeroizing::new(password.to_owned());
        let digest = digest.to_owned();
        on_blocking_pool(move || bcrypt::verify(password.as_str(), &digest)).await
    }
}
