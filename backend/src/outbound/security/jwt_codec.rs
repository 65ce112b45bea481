//! HS256 JSON Web Token [`TokenCodec`].
//!
//! Claims carry only `userName`; there is no `exp`, so expiry validation is
//! switched off and no registered claims are required.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenCodec, TokenCodecError};
use crate::domain::{AccessToken, TokenClaims, UserName};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireClaims {
    user_name: String,
}

/// Signs and verifies tokens with a shared HMAC secret.
#[derive(Clone)]
pub struct JwtTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtTokenCodec {
    /// Codec bound to `secret`.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl std::fmt::Debug for JwtTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenCodec").finish_non_exhaustive()
    }
}

impl TokenCodec for JwtTokenCodec {
    fn sign(&self, claims: &TokenClaims) -> Result<AccessToken, TokenCodecError> {
        let wire = WireClaims {
            user_name: claims.user_name().to_string(),
        };
        encode(&Header::new(Algorithm::HS256), &wire, &self.encoding)
            .map(AccessToken::new)
            .map_err(|err| TokenCodecError::encode(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, TokenCodecError> {
        let data = decode::<WireClaims>(token, &self.decoding, &self.validation)
            .map_err(|err| TokenCodecError::invalid(err.to_string()))?;
        UserName::new(data.claims.user_name)
            .map(TokenClaims::new)
            .map_err(|err| TokenCodecError::invalid(err.to_string()))
    }
}
