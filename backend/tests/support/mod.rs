//! Shared helpers for end-to-end HTTP tests.

use actix_http::Request;
use actix_web::{
    App,
    body::BoxBody,
    dev::{Service, ServiceResponse},
    http::header,
    test::{self, TestRequest},
    web,
};
use serde_json::{Value, json};

use meals::Trace;
use meals::inbound::http::configure;
use meals::inbound::http::error::json_config;
use meals::wiring::Services;

/// Initialise the full application over `services`.
pub async fn init_app(
    services: &Services,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(services.http_state.clone()))
            .app_data(json_config())
            .wrap(Trace)
            .configure(configure),
    )
    .await
}

/// `Authorization` header for `token`.
pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

/// Register `user_name` with `password`, asserting success.
pub async fn register(
    app: &impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
    user_name: &str,
    password: &str,
) {
    let response = test::call_service(
        app,
        TestRequest::put()
            .uri("/auth")
            .set_json(json!({
                "userName": user_name,
                "email": format!("{user_name}@example.com"),
                "password": password,
            }))
            .to_request(),
    )
    .await;
    assert!(
        response.status().is_success(),
        "register {user_name}: {}",
        response.status()
    );
}

/// Log in and return the issued bearer token.
pub async fn login(
    app: &impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
    user_name: &str,
    password: &str,
) -> String {
    let body: Value = test::call_and_read_body_json(
        app,
        TestRequest::post()
            .uri("/auth")
            .set_json(json!({ "userName": user_name, "password": password }))
            .to_request(),
    )
    .await;
    body["token"]
        .as_str()
        .unwrap_or_else(|| panic!("login {user_name} returned no token: {body}"))
        .to_owned()
}

/// Append a meal tagged with `tag` and return its index.
pub async fn add_meal(
    app: &impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
    token: &str,
    tag: &str,
) -> u64 {
    let body: Value = test::call_and_read_body_json(
        app,
        TestRequest::post()
            .uri("/meals")
            .insert_header(bearer(token))
            .set_json(json!({
                "breakfast": format!("{tag} breakfast"),
                "lunch": format!("{tag} lunch"),
                "dinner": format!("{tag} dinner"),
            }))
            .to_request(),
    )
    .await;
    body["index"].as_u64().expect("meal index")
}
