//! Driven port for the persistence driver.
//!
//! The store maps string keys to JSON values. Each call is atomic on its own;
//! nothing here spans a read and a later write, so callers that need
//! read-modify-write atomicity must serialize themselves.

use async_trait::async_trait;
use serde_json::Value;

use super::define_port_error;

define_port_error! {
    /// Errors raised by key-value store adapters.
    pub enum KeyValueStoreError {
        /// No value is stored under the key.
        NotFound { key: String } => "no value stored under key {key}",
        /// Backend I/O or encoding failed.
        Storage { message: String } => "key-value store failure: {message}",
    }
}

/// Ordered key to JSON value storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Value, KeyValueStoreError>;

    /// Create or replace the value stored under `key`.
    async fn put(&self, key: &str, value: Value) -> Result<(), KeyValueStoreError>;
}
