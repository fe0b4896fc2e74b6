//! Rcenter Persistence - Database entities and persistence layer
//!
//! This crate provides:
//! - SeaORM entity definitions
//! - Persistence trait abstractions for the registry and config stores
//! - Domain model types for persistence operations
//!
//! The spec targets a single node backed by an external database; there is
//! no embedded or distributed storage mode, replication is the DB's problem.

pub mod entity;
pub mod model;
pub mod sql;
pub mod traits;

// Re-export sea-orm for convenience
pub use sea_orm;

// Re-export entity prelude
pub use entity::prelude::*;

// Re-export persistence traits
pub use traits::{ConfigPersistence, NamespacePersistence, PersistenceService, RegistryPersistence};

// Re-export SQL backend
pub use sql::ExternalDbPersistService;

// Re-export model types
pub use model::{
    ConfigHistoryStorageData, ConfigStorageData, NamespaceInfo, NodeStorageData, Page,
    ServiceEventStorageData, ServiceStorageData, StorageMode,
};
