//! Persistence traits for the unified storage abstraction layer
//!
//! This module defines the narrow, CRUD-shaped interface the Registry Core
//! (C6) and Configuration Core (C7) consume an external database through.

pub mod config;
pub mod namespace;
pub mod registry;

pub use config::ConfigPersistence;
pub use namespace::NamespacePersistence;
pub use registry::RegistryPersistence;

use async_trait::async_trait;

use crate::model::StorageMode;

/// Unified persistence service trait
///
/// This is the main interface for all storage operations.
#[async_trait]
pub trait PersistenceService: ConfigPersistence + NamespacePersistence + RegistryPersistence + Send + Sync {
    /// Get the current storage mode
    fn storage_mode(&self) -> StorageMode;

    /// Health check for the storage backend
    async fn health_check(&self) -> anyhow::Result<()>;
}
