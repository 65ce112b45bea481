//! Service graph construction and startup tasks run before binding.

use std::io;

use actix_web::web;
use tracing::info;

use meals::domain::AdminSeed;
use meals::inbound::http::state::HttpState;
use meals::wiring::{AuthService, Services, build_services};

use super::ServerConfig;

/// Build the services described by `config` and run startup seeding.
///
/// # Errors
/// Returns [`io::Error`] when the admin seed cannot be written.
pub(super) async fn build_http_state(config: &ServerConfig) -> io::Result<web::Data<HttpState>> {
    let Services { auth, http_state } = build_services(config.storage.clone(), &config.services);
    if let Some(seed) = &config.admin_seed {
        seed_admin(&auth, seed).await?;
    }
    Ok(web::Data::new(http_state))
}

async fn seed_admin(auth: &AuthService, seed: &AdminSeed) -> io::Result<()> {
    let created = auth
        .seed_admin(seed)
        .await
        .map_err(|err| io::Error::other(format!("admin seed failed: {err}")))?;
    let user_name = seed.registration.user_name();
    if created {
        info!(user_name = %user_name, "admin account created");
    } else {
        info!(user_name = %user_name, "admin account already present");
    }
    Ok(())
}
