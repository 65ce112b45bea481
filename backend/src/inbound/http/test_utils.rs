//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use crate::domain::ports::{
    AuthGate, MockAuthGate, MockLoginService, MockMealsCommand, MockMealsQuery,
    MockUserRegistration,
};
use crate::inbound::http::error::json_config;
use crate::inbound::http::state::HttpState;
use crate::test_support::http::in_memory_services;

/// State whose only configured port is `gate`; any other port call panics.
pub fn state_with_auth_gate(gate: MockAuthGate) -> HttpState {
    let gate: Arc<dyn AuthGate> = Arc::new(gate);
    HttpState::new(
        Arc::new(MockLoginService::new()),
        Arc::new(MockUserRegistration::new()),
        gate,
        Arc::new(MockMealsQuery::new()),
        Arc::new(MockMealsCommand::new()),
    )
}

/// App with every HTTP route over fresh in-memory services.
pub fn in_memory_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let services = in_memory_services();
    App::new()
        .app_data(web::Data::new(services.http_state))
        .app_data(json_config())
        .configure(crate::inbound::http::configure)
}

/// Register `user_name` and return a bearer token for it.
pub async fn register_and_login(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = ServiceResponse,
        Error = actix_web::Error,
    >,
    user_name: &str,
) -> String {
    let credentials = json!({
        "userName": user_name,
        "email": format!("{user_name}@example.com"),
        "password": "pw",
    });
    let registered = test::call_service(
        app,
        test::TestRequest::put()
            .uri("/auth")
            .set_json(&credentials)
            .to_request(),
    )
    .await;
    assert!(registered.status().is_success(), "registration failed");

    let body: Value = test::call_and_read_body_json(
        app,
        test::TestRequest::post()
            .uri("/auth")
            .set_json(&credentials)
            .to_request(),
    )
    .await;
    body["token"]
        .as_str()
        .expect("login returns a token")
        .to_owned()
}

/// `Authorization` header value for `token`.
pub fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (
        actix_web::http::header::AUTHORIZATION,
        format!("Bearer {token}"),
    )
}
