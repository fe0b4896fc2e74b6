//! Rcenter Config - Configuration Core
//!
//! This crate provides:
//! - Config CRUD (Get/Save/Delete/List)
//! - Append-only history and version rollback
//! - Config watching through the Config Watcher Hub (C5)

pub mod model;
pub mod service;

pub use model::{
    ConfigChangeEvent, ConfigChangeEventType, ConfigChangeType, ConfigData, ConfigHistoryEntry, ConfigKey,
    ConfigSubscriptionKey,
};
pub use service::{ConfigCore, NamespaceTable};
