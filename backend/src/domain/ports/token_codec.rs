//! Port for signing and verifying bearer tokens.

use crate::domain::{AccessToken, TokenClaims};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token codec adapters.
    pub enum TokenCodecError {
        /// Claims could not be encoded or signed.
        Encode { message: String } => "token encoding failed: {message}",
        /// The token is malformed, badly signed, or lacks a user name claim.
        Invalid { message: String } => "invalid token: {message}",
    }
}

/// Signs claims into bearer tokens and verifies them again.
///
/// Implementations receive their secret at construction; there is no
/// process-wide key.
#[cfg_attr(test, mockall::automock)]
pub trait TokenCodec: Send + Sync {
    /// Sign `claims` into an access token.
    fn sign(&self, claims: &TokenClaims) -> Result<AccessToken, TokenCodecError>;

    /// Verify the signature of `token` and decode its claims.
    fn verify(&self, token: &str) -> Result<TokenClaims, TokenCodecError>;
}
