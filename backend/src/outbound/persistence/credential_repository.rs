//! Credential repository keyed by user name.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    CredentialRepository, CredentialRepositoryError, KeyValueStore, KeyValueStoreError,
};
use crate::domain::{Credential, UserName};

use super::records::StoredCredential;

/// Stores each credential as one JSON document under its user name.
#[derive(Clone)]
pub struct KeyValueCredentialRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KeyValueCredentialRepository {
    /// Create a repository over the `users` namespace store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

fn map_store_error(err: KeyValueStoreError) -> CredentialRepositoryError {
    match err {
        KeyValueStoreError::NotFound { key } => CredentialRepositoryError::not_found(key),
        KeyValueStoreError::Storage { message } => CredentialRepositoryError::storage(message),
    }
}

#[async_trait]
impl CredentialRepository for KeyValueCredentialRepository {
    async fn put(&self, credential: &Credential) -> Result<(), CredentialRepositoryError> {
        let document = serde_json::to_value(StoredCredential::from(credential))
            .map_err(|err| CredentialRepositoryError::storage(err.to_string()))?;
        self.store
            .put(credential.user_name().as_ref(), document)
            .await
            .map_err(map_store_error)
    }

    async fn get(&self, user_name: &UserName) -> Result<Credential, CredentialRepositoryError> {
        let document = self
            .store
            .get(user_name.as_ref())
            .await
            .map_err(map_store_error)?;
        let stored: StoredCredential = serde_json::from_value(document).map_err(|err| {
            CredentialRepositoryError::storage(format!("corrupt credential for {user_name}: {err}"))
        })?;
        Credential::try_from(stored).map_err(|err| {
            CredentialRepositoryError::storage(format!("corrupt credential for {user_name}: {err}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockKeyValueStore;
    use crate::outbound::storage::InMemoryKeyValueStore;
    use rstest::rstest;
    use serde_json::json;

    fn name(raw: &str) -> UserName {
        UserName::new(raw).expect("valid user name")
    }

    #[tokio::test]
    async fn stores_hash_under_password_field() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let repo = KeyValueCredentialRepository::new(store.clone());
        let credential = Credential::new(name("ada"), "ada@example.com", "$2b$09$x", true);

        repo.put(&credential).await.expect("put");

        let raw = store.get("ada").await.expect("stored document");
        assert_eq!(
            raw,
            json!({
                "userName": "ada",
                "email": "ada@example.com",
                "password": "$2b$09$x",
                "admin": true,
            })
        );
        assert_eq!(repo.get(&name("ada")).await.expect("get"), credential);
    }

    #[tokio::test]
    async fn missing_admin_flag_defaults_to_false() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        store
            .put(
                "bob",
                json!({ "userName": "bob", "email": "b@example.com", "password": "h" }),
            )
            .await
            .expect("seed");
        let repo = KeyValueCredentialRepository::new(store);

        let credential = repo.get(&name("bob")).await.expect("get");
        assert!(!credential.is_admin());
    }

    #[tokio::test]
    async fn unknown_users_are_not_found() {
        let repo = KeyValueCredentialRepository::new(Arc::new(InMemoryKeyValueStore::new()));
        let err = repo.get(&name("ghost")).await.expect_err("missing");
        assert_eq!(err, CredentialRepositoryError::not_found("ghost"));
    }

    #[rstest]
    #[case(json!({ "userName": "ada" }))]
    #[case(json!({ "userName": " ", "password": "h" }))]
    #[case(json!("not an object"))]
    #[tokio::test]
    async fn malformed_documents_are_storage_errors(#[case] document: serde_json::Value) {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .times(1)
            .return_once(move |_| Ok(document));
        let repo = KeyValueCredentialRepository::new(Arc::new(store));

        let err = repo.get(&name("ada")).await.expect_err("corrupt");
        assert!(matches!(err, CredentialRepositoryError::Storage { .. }));
    }
}
