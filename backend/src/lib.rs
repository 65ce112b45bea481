//! Meal subscription backend.
//!
//! The crate is split into a transport-agnostic [`domain`], inbound adapters
//! under [`inbound`] and storage and crypto adapters under [`outbound`].
//! [`wiring`] composes them into the state the HTTP handlers consume.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod wiring;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
