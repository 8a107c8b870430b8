//! Trait seams between the telemetry core and its collaborators.

mod kv;

pub use kv::KvStore;
