//! Key-value store adapters.
//!
//! - [`InMemoryKeyValueStore`]: process-local map for tests and ephemeral runs.
//! - [`FileKeyValueStore`]: one JSON file per key beneath a namespace
//!   directory, written through `cap_std`.

mod file;
mod memory;

pub use file::FileKeyValueStore;
pub use memory::InMemoryKeyValueStore;
