//! Bearer-token extraction for authenticated handlers.
//!
//! Handlers take an [`AuthenticatedCaller`] argument; Actix resolves it from
//! the `Authorization` header through the [`AuthGate`] port before the
//! handler body runs, so unauthenticated requests never reach the meal
//! services.
//!
//! [`AuthGate`]: crate::domain::ports::AuthGate

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{CallerIdentity, Error};
use crate::inbound::http::state::HttpState;

const BEARER: &str = "bearer";

/// Caller identity resolved from a bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedCaller(CallerIdentity);

impl AuthenticatedCaller {
    /// Resolved identity.
    pub fn identity(&self) -> &CallerIdentity {
        &self.0
    }
}

fn bearer_token(req: &HttpRequest) -> Result<String, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case(BEARER) || token.is_empty() {
        return Err(Error::unauthorized("missing bearer token"));
    }
    Ok(token.to_owned())
}

impl FromRequest for AuthenticatedCaller {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let token = bearer_token(req);
        Box::pin(async move {
            let state =
                state.ok_or_else(|| Error::internal("http state is not configured"))?;
            let identity = state.auth_gate.resolve_caller(&token?).await?;
            Ok(Self(identity))
        })
    }
}
