//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AuthGate, LoginService, MealsCommand, MealsQuery, UserRegistration};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn UserRegistration>,
    pub auth_gate: Arc<dyn AuthGate>,
    pub meals_query: Arc<dyn MealsQuery>,
    pub meals_command: Arc<dyn MealsCommand>,
}

impl HttpState {
    /// Bundle port implementations for the handlers.
    ///
    /// A single service usually backs several ports; pass the same `Arc` for
    /// each of them.
    pub fn new(
        login: Arc<dyn LoginService>,
        registration: Arc<dyn UserRegistration>,
        auth_gate: Arc<dyn AuthGate>,
        meals_query: Arc<dyn MealsQuery>,
        meals_command: Arc<dyn MealsCommand>,
    ) -> Self {
        Self {
            login,
            registration,
            auth_gate,
            meals_query,
            meals_command,
        }
    }
}
