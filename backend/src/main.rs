//! Backend entry-point: loads settings, opens storage and serves the REST API.

mod server;

use std::ffi::OsString;
use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use meals::inbound::http::health::HealthState;
use meals::settings::{AppSettings, SecretSource, ephemeral_secret_allowed};
use meals::wiring::{ServiceSettings, Storage};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os().collect::<Vec<OsString>>())
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;
    let config = server_config(&settings)?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).await?;
    server.await
}

fn server_config(settings: &AppSettings) -> io::Result<ServerConfig> {
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;

    let (token_secret, source) = settings
        .token_secret(ephemeral_secret_allowed())
        .map_err(io::Error::other)?;
    if source == SecretSource::Ephemeral {
        warn!("using temporary token secret (dev only); tokens will not survive a restart");
    }

    let storage = if settings.in_memory {
        warn!("in-memory storage selected; data will not survive a restart");
        Storage::in_memory()
    } else {
        let data_dir = settings.data_dir();
        Storage::on_disk(&data_dir).map_err(|e| {
            io::Error::other(format!("failed to open data dir {}: {e}", data_dir.display()))
        })?
    };

    let services = ServiceSettings {
        token_secret,
        bcrypt_cost: settings.bcrypt_cost(),
        storage_timeout: settings.storage_timeout(),
    };
    let admin_seed = settings.admin_seed().map_err(io::Error::other)?;

    let config = ServerConfig::new(bind_addr, storage, services).with_admin_seed(admin_seed);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(server::build_prometheus()?));
    Ok(config)
}
