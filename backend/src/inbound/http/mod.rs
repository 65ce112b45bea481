//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod auth;
pub mod error;
pub mod health;
pub mod meals;
pub mod responses;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;

/// Register the authentication and meal routes.
///
/// Health probes are registered separately because they need their own
/// state.
///
/// # Examples
/// ```
/// use actix_web::App;
///
/// let app = App::new().configure(meals::inbound::http::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users::register)
        .service(users::login)
        .service(users::admin_flag)
        .service(meals::list_meals)
        .service(meals::add_meal)
        .service(meals::subscribe)
        .service(meals::unsubscribe)
        .service(meals::list_meals_with_subscribers);
}
