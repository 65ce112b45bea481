//! File-backed key-value store.
//!
//! Each key maps to `<hex(key)>.json` inside the namespace directory, so
//! arbitrary key text never reaches the filesystem as a path. Writes land in
//! a uniquely named staging file first and are renamed over the target, so
//! readers see either the old value or the new one. Blocking I/O runs on the
//! Tokio blocking pool.

use std::io;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{KeyValueStore, KeyValueStoreError};

const EXTENSION: &str = "json";

/// Namespace directory holding one JSON document per key.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    directory: Arc<Dir>,
}

impl FileKeyValueStore {
    /// Open (creating if needed) the namespace directory at `path`.
    pub fn open(path: &Path) -> Result<Self, KeyValueStoreError> {
        Dir::create_ambient_dir_all(path, ambient_authority())
            .and_then(|()| Dir::open_ambient_dir(path, ambient_authority()))
            .map(|directory| Self {
                directory: Arc::new(directory),
            })
            .map_err(|err| {
                KeyValueStoreError::storage(format!("open {}: {err}", path.display()))
            })
    }

    fn file_name(key: &str) -> String {
        format!("{}.{EXTENSION}", hex::encode(key.as_bytes()))
    }

    async fn blocking<T, F>(&self, work: F) -> Result<T, KeyValueStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Dir) -> Result<T, KeyValueStoreError> + Send + 'static,
    {
        let directory = Arc::clone(&self.directory);
        tokio::task::spawn_blocking(move || work(&directory))
            .await
            .map_err(|err| KeyValueStoreError::storage(format!("blocking task failed: {err}")))?
    }
}

fn write_atomically(directory: &Dir, file_name: &str, bytes: &[u8]) -> io::Result<()> {
    let staging = format!(".{file_name}.{}.tmp", Uuid::new_v4().simple());
    let outcome = directory
        .write(&staging, bytes)
        .and_then(|()| directory.rename(&staging, directory, file_name));
    if outcome.is_err() {
        let _cleanup = directory.remove_file(&staging);
    }
    outcome
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Value, KeyValueStoreError> {
        let owned_key = key.to_owned();
        let file_name = Self::file_name(key);
        self.blocking(move |directory| {
            let bytes = match directory.read(&file_name) {
                Ok(bytes) => bytes,
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    return Err(KeyValueStoreError::not_found(owned_key));
                }
                Err(err) => {
                    return Err(KeyValueStoreError::storage(format!(
                        "read {owned_key}: {err}"
                    )));
                }
            };
            serde_json::from_slice(&bytes).map_err(|err| {
                KeyValueStoreError::storage(format!("decode {owned_key}: {err}"))
            })
        })
        .await
    }

    async fn put(&self, key: &str, value: Value) -> Result<(), KeyValueStoreError> {
        let bytes = serde_json::to_vec(&value)
            .map_err(|err| KeyValueStoreError::storage(format!("encode {key}: {err}")))?;
        let owned_key = key.to_owned();
        let file_name = Self::file_name(key);
        self.blocking(move |directory| {
            write_atomically(directory, &file_name, &bytes).map_err(|err| {
                KeyValueStoreError::storage(format!("write {owned_key}: {err}"))
            })?;
            debug!(key = %owned_key, bytes = bytes.len(), "value written");
            Ok(())
        })
        .await
    }
}
