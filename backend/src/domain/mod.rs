//! Domain primitives, ports and services.
//!
//! Purpose: define strongly typed entities for users, credentials and meals,
//! the ports the hexagon talks through, and the services implementing the
//! driving ports. Nothing here knows about HTTP or the storage backend.
//!
//! Public surface:
//! - Error / ErrorCode: transport agnostic failure payload.
//! - UserName, Credential, CallerIdentity: who is calling.
//! - LoginCredentials, Registration, AccessToken, TokenClaims: auth inputs.
//! - Meal, NewMeal, MealSummary, MealIndex: the meal collection.
//! - MealStore: serialized read-modify-write access to the collection.
//! - CredentialAuthService, SubscriptionService: driving-port services.

pub mod auth;
pub mod auth_service;
mod deadline;
pub mod error;
pub mod meal;
pub mod meal_store;
pub mod ports;
pub mod subscription_service;
pub mod trace_id;
pub mod user;

pub use self::auth::{AccessToken, LoginCredentials, Registration, TokenClaims};
pub use self::auth_service::{AdminSeed, CredentialAuthService, INVALID_CREDENTIALS};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::meal::{
    Meal, MealIndex, MealIndexParseError, MealSummary, MealValidationError, NewMeal,
};
pub use self::meal_store::{MealStore, Mutation};
pub use self::subscription_service::SubscriptionService;
pub use self::trace_id::TraceId;
pub use self::user::{CallerIdentity, Credential, UserName, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use meals::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
