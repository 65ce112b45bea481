//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **storage**: key-value stores (in-memory and file-backed)
//! - **persistence**: credential and meal repositories over a key-value store
//! - **security**: bcrypt password hashing and HS256 token signing
//!
//! Adapters are thin translators between domain types and their stored or
//! encoded representations. They contain no business logic.

pub mod persistence;
pub mod security;
pub mod storage;
