//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates the handler path annotations and the request,
//! response and error schemas. Swagger UI serves it in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Meal, MealSummary};
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::meals::AddMealRequest;
use crate::inbound::http::responses::{
    AdminResponse, MealCreatedResponse, MessageResponse, TokenResponse,
};
use crate::inbound::http::users::{LoginRequest, RegisterRequest};

/// Name of the bearer security scheme referenced by handler annotations.
pub const BEARER_SCHEME: &str = "bearer";

/// Registers the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let scheme = HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .description(Some("Token issued by POST /auth."))
            .build();
        components.add_security_scheme(BEARER_SCHEME, SecurityScheme::Http(scheme));
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Meals backend API",
        description = "Registration, bearer-token login and meal subscriptions.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::admin_flag,
        crate::inbound::http::meals::list_meals,
        crate::inbound::http::meals::add_meal,
        crate::inbound::http::meals::subscribe,
        crate::inbound::http::meals::unsubscribe,
        crate::inbound::http::meals::list_meals_with_subscribers,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorResponse,
        Error,
        ErrorCode,
        AddMealRequest,
        Meal,
        MealSummary,
        MessageResponse,
        TokenResponse,
        MealCreatedResponse,
        AdminResponse,
        RegisterRequest,
        LoginRequest,
    )),
    tags(
        (name = "auth", description = "Registration, login and caller flags"),
        (name = "meals", description = "Meal listing and subscriptions"),
        (name = "admin", description = "Admin-only views"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
