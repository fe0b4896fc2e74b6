//! Domain model types for the persistence abstraction layer
//!
//! These types are used as return values from the persistence traits,
//! decoupled from specific storage backends.

use serde::{Deserialize, Serialize};

/// Generic paginated result
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub total_count: u64,
    pub page_number: u64,
    pub pages_available: u64,
    pub page_items: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(total_count: u64, page_number: u64, page_size: u64, page_items: Vec<T>) -> Self {
        Self {
            total_count,
            page_number,
            pages_available: if page_size > 0 {
                (total_count as f64 / page_size as f64).ceil() as u64
            } else {
                0
            },
            page_items,
        }
    }

    pub fn empty() -> Self {
        Self {
            total_count: 0,
            page_number: 0,
            pages_available: 0,
            page_items: Vec::new(),
        }
    }
}

/// Storage mode for the persistence layer. The spec targets a single node
/// backed by an external database; replication and failover are the DB's
/// problem, not this crate's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageMode {
    /// External database (MySQL/PostgreSQL via SeaORM)
    ExternalDb,
}

impl std::fmt::Display for StorageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageMode::ExternalDb => write!(f, "external_db"),
        }
    }
}

impl std::str::FromStr for StorageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "external_db" => Ok(StorageMode::ExternalDb),
            _ => Err(format!("Invalid storage mode: {}", s)),
        }
    }
}

/// Namespace row loaded into the registry cache at startup.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceInfo {
    pub tenant_id: String,
    pub namespace_id: String,
    pub namespace_name: String,
    pub active_flag: bool,
}

/// ConfigData row stored in the durable config table.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConfigStorageData {
    pub tenant_id: String,
    pub namespace_id: String,
    pub group_name: String,
    pub data_id: String,
    pub content_type: String,
    pub config_content: String,
    pub md5_value: String,
    pub version: i64,
    pub description: String,
    pub add_time: i64,
    pub add_who: String,
    pub edit_time: i64,
    pub edit_who: String,
}

/// One row per mutation of a ConfigData, newest-first on read.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConfigHistoryStorageData {
    pub tenant_id: String,
    pub namespace_id: String,
    pub group_name: String,
    pub data_id: String,
    pub change_type: String,
    pub old_content: String,
    pub new_content: String,
    pub old_version: i64,
    pub new_version: i64,
    pub old_md5: String,
    pub new_md5: String,
    pub change_reason: String,
    pub changed_by: String,
    pub changed_at: i64,
}

/// Service row stored in the durable registry tables.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ServiceStorageData {
    pub tenant_id: String,
    pub namespace_id: String,
    pub group_name: String,
    pub service_name: String,
    pub protocol: String,
    pub version: String,
    pub description: String,
    pub load_balance_strategy: String,
    pub protect_threshold: f32,
    pub metadata: String,
    pub tags: String,
    pub service_version: i64,
    pub active_flag: bool,
    pub add_time: i64,
    pub add_who: String,
    pub edit_time: i64,
    pub edit_who: String,
    pub opr_seq_flag: String,
}

/// Node row stored in the durable registry tables.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NodeStorageData {
    pub node_id: String,
    pub tenant_id: String,
    pub namespace_id: String,
    pub group_name: String,
    pub service_name: String,
    pub host: String,
    pub port: i32,
    pub weight: f64,
    pub instance_status: String,
    pub healthy_status: String,
    pub ephemeral: bool,
    pub metadata: String,
    pub register_time: i64,
    pub last_beat_time: i64,
    pub last_check_time: i64,
}

/// Append-only row recording a registry mutation for audit/replay.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ServiceEventStorageData {
    pub event_type: String,
    pub tenant_id: String,
    pub namespace_id: String,
    pub group_name: String,
    pub service_name: String,
    pub node_id: String,
    pub created_time: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_mode_display() {
        assert_eq!(StorageMode::ExternalDb.to_string(), "external_db");
    }

    #[test]
    fn test_storage_mode_from_str() {
        assert_eq!(
            "external_db".parse::<StorageMode>().unwrap(),
            StorageMode::ExternalDb
        );
        assert!("invalid".parse::<StorageMode>().is_err());
    }

    #[test]
    fn test_page_new() {
        let page = Page::<String>::new(100, 1, 10, vec!["a".to_string()]);
        assert_eq!(page.total_count, 100);
        assert_eq!(page.page_number, 1);
        assert_eq!(page.pages_available, 10);
        assert_eq!(page.page_items.len(), 1);
    }

    #[test]
    fn test_page_empty() {
        let page = Page::<String>::empty();
        assert_eq!(page.total_count, 0);
        assert!(page.page_items.is_empty());
    }
}
