//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use meals::domain::AdminSeed;
use meals::wiring::{ServiceSettings, Storage};

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) storage: Storage,
    pub(crate) services: ServiceSettings,
    pub(crate) admin_seed: Option<AdminSeed>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a server configuration from resolved settings.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, storage: Storage, services: ServiceSettings) -> Self {
        Self {
            bind_addr,
            storage,
            services,
            admin_seed: None,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Seed this admin account before the server reports ready.
    #[must_use]
    pub fn with_admin_seed(mut self, seed: Option<AdminSeed>) -> Self {
        self.admin_seed = seed;
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
