//! Success envelopes shared by the HTTP handlers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `{ ok: true, message }` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = true)]
    pub ok: bool,
    #[schema(example = "subscribed")]
    pub message: String,
}

impl MessageResponse {
    /// Successful acknowledgement carrying `message`.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }
}

/// Login response carrying the bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    #[schema(example = true)]
    pub ok: bool,
    #[schema(example = "eyJhbGciOiJIUzI1NiJ9.e30.signature")]
    pub token: String,
}

/// Meal creation response with the new meal's position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MealCreatedResponse {
    #[schema(example = true)]
    pub ok: bool,
    #[schema(example = "meal added")]
    pub message: String,
    #[schema(example = 0)]
    pub index: usize,
}

/// Admin flag of the calling user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AdminResponse {
    pub admin: bool,
}
