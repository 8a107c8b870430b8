//! # kurrent-store
//!
//! Concrete [`KvStore`](kurrent_core::KvStore) backends: an in-memory store
//! for tests and throwaway sessions, and a SQLite-backed store for durable
//! on-device persistence. Platform-specific secure-storage selection lives
//! outside this workspace; anything honoring the trait contract plugs in.

mod memory;
mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;
