//! Composition of adapters and services into the HTTP state.
//!
//! The server binary and the test helpers both assemble the application
//! here, so handlers see the same service graph in tests as in production.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use zeroize::Zeroizing;

use crate::domain::ports::{KeyValueStore, KeyValueStoreError};
use crate::domain::{CredentialAuthService, MealStore, SubscriptionService};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{KeyValueCredentialRepository, KeyValueMealRepository};
use crate::outbound::security::{BcryptPasswordHasher, JwtTokenCodec};
use crate::outbound::storage::{FileKeyValueStore, InMemoryKeyValueStore};

/// Namespace directory for credential documents.
pub const USERS_NAMESPACE: &str = "users";
/// Namespace directory for the meal collection.
pub const MEALS_NAMESPACE: &str = "meals";

/// Auth service over the production adapters.
pub type AuthService =
    CredentialAuthService<KeyValueCredentialRepository, BcryptPasswordHasher, JwtTokenCodec>;

/// Key-value stores backing each namespace.
#[derive(Clone)]
pub struct Storage {
    pub users: Arc<dyn KeyValueStore>,
    pub meals: Arc<dyn KeyValueStore>,
}

impl Storage {
    /// Process-local stores; nothing survives a restart.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryKeyValueStore::new()),
            meals: Arc::new(InMemoryKeyValueStore::new()),
        }
    }

    /// File-backed stores under `data_dir/users` and `data_dir/meals`.
    pub fn on_disk(data_dir: &Path) -> Result<Self, KeyValueStoreError> {
        Ok(Self {
            users: Arc::new(FileKeyValueStore::open(&data_dir.join(USERS_NAMESPACE))?),
            meals: Arc::new(FileKeyValueStore::open(&data_dir.join(MEALS_NAMESPACE))?),
        })
    }
}

/// Tunables passed explicitly to the services.
pub struct ServiceSettings {
    pub token_secret: Zeroizing<Vec<u8>>,
    pub bcrypt_cost: u32,
    pub storage_timeout: Duration,
}

/// Assembled services.
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<AuthService>,
    pub http_state: HttpState,
}

/// Wire repositories, security adapters and services over `storage`.
pub fn build_services(storage: Storage, settings: &ServiceSettings) -> Services {
    let credentials = Arc::new(KeyValueCredentialRepository::new(storage.users));
    let auth = Arc::new(CredentialAuthService::new(
        credentials,
        Arc::new(BcryptPasswordHasher::new(settings.bcrypt_cost)),
        Arc::new(JwtTokenCodec::new(&settings.token_secret)),
        settings.storage_timeout,
    ));

    let meal_store = Arc::new(MealStore::new(
        Arc::new(KeyValueMealRepository::new(storage.meals)),
        settings.storage_timeout,
    ));
    let subscriptions = Arc::new(SubscriptionService::new(meal_store));

    let http_state = HttpState::new(
        auth.clone(),
        auth.clone(),
        auth.clone(),
        subscriptions.clone(),
        subscriptions,
    );
    Services { auth, http_state }
}
