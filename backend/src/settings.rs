//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `MEALS_*` environment variables and an
//! optional configuration file. Accessors apply defaults so the rest of the
//! crate never sees a missing value.

use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use cap_std::{ambient_authority, fs::Dir};
use ortho_config::OrthoConfig;
use rand::RngCore;
use serde::Deserialize;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::domain::{AdminSeed, Registration, UserValidationError};
use crate::outbound::security::DEFAULT_BCRYPT_COST;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_DATA_DIR: &str = "./db";
const DEFAULT_STORAGE_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_ADMIN_EMAIL: &str = "admin@localhost";
const EPHEMERAL_SECRET_LEN: usize = 32;

/// Environment switch allowing a generated signing secret in release builds.
pub const ALLOW_EPHEMERAL_SECRET_ENV: &str = "MEALS_ALLOW_EPHEMERAL_SECRET";

/// Failures turning raw settings into runtime configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("failed to read token secret at {path}: {source}")]
    SecretFile { path: PathBuf, source: io::Error },
    #[error("token secret at {path} is empty")]
    EmptySecretFile { path: PathBuf },
    #[error("no token secret configured; set MEALS_TOKEN_SECRET or MEALS_TOKEN_SECRET_FILE")]
    MissingSecret,
    #[error("admin seed needs both admin_user and admin_password")]
    IncompleteAdminSeed,
    #[error("invalid admin seed: {0}")]
    InvalidAdminSeed(#[from] UserValidationError),
}

/// Where the signing secret came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretSource {
    Inline,
    File,
    Ephemeral,
}

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MEALS")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Directory holding the `users` and `meals` namespaces.
    pub data_dir: Option<PathBuf>,
    /// Keep all data in memory instead of under `data_dir`.
    #[ortho_config(default = false)]
    pub in_memory: bool,
    /// Token signing secret given inline.
    pub token_secret: Option<String>,
    /// File containing the token signing secret.
    pub token_secret_file: Option<PathBuf>,
    /// bcrypt work factor for new credentials.
    pub bcrypt_cost: Option<u32>,
    /// Upper bound on any single storage call, in milliseconds.
    pub storage_timeout_ms: Option<u64>,
    /// Admin account created at startup when absent.
    pub admin_user: Option<String>,
    pub admin_password: Option<String>,
    pub admin_email: Option<String>,
}

impl AppSettings {
    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                source,
            })
    }

    /// Data directory, defaulting to `./db`.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST)
    }

    pub fn storage_timeout(&self) -> Duration {
        Duration::from_millis(
            self.storage_timeout_ms
                .unwrap_or(DEFAULT_STORAGE_TIMEOUT_MS),
        )
    }

    /// Resolve the signing secret.
    ///
    /// An inline secret wins over a secret file. Without either, a random
    /// secret is generated when `allow_ephemeral` is set; tokens signed
    /// with it do not survive a restart.
    pub fn token_secret(
        &self,
        allow_ephemeral: bool,
    ) -> Result<(Zeroizing<Vec<u8>>, SecretSource), SettingsError> {
        if let Some(secret) = self.token_secret.as_deref().filter(|s| !s.is_empty()) {
            return Ok((Zeroizing::new(secret.as_bytes().to_vec()), SecretSource::Inline));
        }
        if let Some(path) = &self.token_secret_file {
            return read_secret_file(path).map(|secret| (secret, SecretSource::File));
        }
        if allow_ephemeral {
            let mut bytes = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
            rand::thread_rng().fill_bytes(&mut bytes);
            return Ok((bytes, SecretSource::Ephemeral));
        }
        Err(SettingsError::MissingSecret)
    }

    /// Admin account to seed at startup, if configured.
    pub fn admin_seed(&self) -> Result<Option<AdminSeed>, SettingsError> {
        match (&self.admin_user, &self.admin_password) {
            (None, None) => Ok(None),
            (Some(user), Some(password)) => {
                let email = self.admin_email.as_deref().unwrap_or(DEFAULT_ADMIN_EMAIL);
                let registration = Registration::try_from_parts(user, email, password)?;
                Ok(Some(AdminSeed { registration }))
            }
            _ => Err(SettingsError::IncompleteAdminSeed),
        }
    }
}

/// Whether a generated secret is acceptable in this process.
pub fn ephemeral_secret_allowed() -> bool {
    cfg!(debug_assertions)
        || std::env::var(ALLOW_EPHEMERAL_SECRET_ENV).ok().as_deref() == Some("1")
}

fn read_secret_file(path: &Path) -> Result<Zeroizing<Vec<u8>>, SettingsError> {
    let secret_error = |source| SettingsError::SecretFile {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| secret_error(io::Error::from(io::ErrorKind::InvalidInput)))?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority()).map_err(secret_error)?;
    let mut bytes = Zeroizing::new(directory.read(file_name).map_err(secret_error)?);
    while bytes.last().is_some_and(u8::is_ascii_whitespace) {
        bytes.pop();
    }
    if bytes.is_empty() {
        return Err(SettingsError::EmptySecretFile {
            path: path.to_path_buf(),
        });
    }
    Ok(bytes)
}
