//! Mediarc Storage Library
//!
//! This crate provides the storage abstraction and backend implementations
//! for mediarc: an S3-compatible object store, the local filesystem, and an
//! in-memory double for tests.
//!
//! # Storage key format
//!
//! All objects for one ingested asset live under a shared key base:
//! `media/{folder}/{uuid}` when a folder was supplied, `media/{uuid}`
//! otherwise. Keys must not contain `..` or a leading `/`. Key generation is
//! centralized in the `keys` module so all backends stay consistent.

pub mod factory;
pub mod keys;
pub mod local;
pub mod memory;
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{build_key_base, sanitize_folder};
pub use local::LocalStorage;
pub use mediarc_core::StorageBackend;
pub use memory::MemoryStorage;
pub use s3::S3Storage;
pub use traits::{StorageError, StorageProvider, StorageResult};
