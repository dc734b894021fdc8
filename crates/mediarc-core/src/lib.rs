//! Mediarc Core Library
//!
//! This crate provides the domain models, configuration, and telemetry
//! bootstrap shared across all mediarc components.

pub mod config;
pub mod models;
pub mod storage_types;
pub mod telemetry;

// Re-export commonly used types
pub use config::MediaConfig;
pub use models::media::{Deleted, MediaKind, MediaRecord, VariantMap, VariantName, VariantSet};
pub use models::query::{MediaPage, MediaQuery};
pub use storage_types::StorageBackend;
