//! Registration, login and caller-profile handlers.
//!
//! ```text
//! PUT  /auth  {"userName":"ada","email":"ada@example.com","password":"pw"}
//! POST /auth  {"userName":"ada","password":"pw"}
//! GET  /admin
//! ```

use actix_web::{get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Error, INVALID_CREDENTIALS, LoginCredentials, Registration, UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedCaller;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::responses::{AdminResponse, MessageResponse, TokenResponse};
use crate::inbound::http::state::HttpState;

/// Registration body for `PUT /auth`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    #[schema(example = "ada")]
    pub user_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "correct horse battery staple")]
    pub password: String,
}

/// Login body for `POST /auth`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    #[schema(example = "ada")]
    pub user_name: String,
    #[schema(example = "correct horse battery staple")]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = UserValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.user_name, &value.password)
    }
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = UserValidationError;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.user_name, &value.email, &value.password)
    }
}

fn map_validation_error(err: UserValidationError) -> Error {
    match err {
        UserValidationError::EmptyUserName => Error::invalid_request("userName must not be empty")
            .with_details(json!({ "field": "userName", "code": "empty_user_name" })),
        UserValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Create a non-admin account.
#[utoipa::path(
    put,
    path = "/auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "User already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[put("/auth")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let registration =
        Registration::try_from(payload.into_inner()).map_err(map_validation_error)?;
    state.registration.register(&registration).await?;
    Ok(web::Json(MessageResponse::ok("user registered")))
}

/// Exchange credentials for a bearer token.
///
/// Unknown users and wrong passwords produce the same `401` body.
#[utoipa::path(
    post,
    path = "/auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = TokenResponse),
        (status = 400, description = "Malformed JSON body", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    // A blank field is just another failed login.
    let credentials = LoginCredentials::try_from(payload.into_inner())
        .map_err(|_| Error::invalid_credentials(INVALID_CREDENTIALS))?;
    let token = state.login.authenticate(&credentials).await?;
    Ok(web::Json(TokenResponse {
        ok: true,
        token: token.into(),
    }))
}

/// Report whether the caller carries the admin flag.
#[utoipa::path(
    get,
    path = "/admin",
    responses(
        (status = 200, description = "Caller admin flag", body = AdminResponse),
        (status = 401, description = "Unauthorised", body = ErrorResponse)
    ),
    tags = ["auth"],
    operation_id = "adminFlag",
    security(("bearer" = []))
)]
#[get("/admin")]
pub async fn admin_flag(caller: AuthenticatedCaller) -> web::Json<AdminResponse> {
    web::Json(AdminResponse {
        admin: caller.identity().is_admin(),
    })
}
