//! Driving port resolving bearer tokens to caller identities.

use async_trait::async_trait;

use crate::domain::{CallerIdentity, Error};

/// Establishes who is calling before any meal operation runs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGate: Send + Sync {
    /// Verify `bearer_token` and resolve it to a stored user.
    ///
    /// Bad signatures, missing claims and tokens naming a user that no
    /// longer exists all fail with
    /// [`ErrorCode::Unauthorized`](crate::domain::ErrorCode::Unauthorized).
    async fn resolve_caller(&self, bearer_token: &str) -> Result<CallerIdentity, Error>;
}
