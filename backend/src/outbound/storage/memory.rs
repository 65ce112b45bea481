//! Process-local key-value store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::domain::ports::{KeyValueStore, KeyValueStoreError};

/// Ordered in-memory map. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<BTreeMap<String, Value>>,
}

impl InMemoryKeyValueStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Value, KeyValueStoreError> {
        self.entries
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| KeyValueStoreError::not_found(key))
    }

    async fn put(&self, key: &str, value: Value) -> Result<(), KeyValueStoreError> {
        self.entries.write().await.insert(key.to_owned(), value);
        Ok(())
    }
}
