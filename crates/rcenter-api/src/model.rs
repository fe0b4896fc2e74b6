//! Common API constants and the pagination wrapper shared by the registry
//! and configuration list operations.

use serde::{Deserialize, Serialize};

pub const CLIENT_VERSION: &str = "3.0.0";
pub const DEFAULT_GROUP: &str = "DEFAULT_GROUP";
pub const DEFAULT_NAMESPACE_ID: &str = "public";

pub const APPNAME: &str = "AppName";
pub const CLIENT_VERSION_KEY: &str = "ClientVersion";
pub const CLIENT_IP: &str = "ClientIp";
pub const DATA_ID: &str = "dataId";
pub const TENANT: &str = "tenant";
pub const GROUP: &str = "group";
pub const NAMESPACE_ID: &str = "namespaceId";

pub const CONTENT_MD5: &str = "Content-MD5";

pub const ACCESS_TOKEN: &str = "accessToken";
pub const APP_CONN_PREFIX: &str = "app_";

// Heartbeat/liveness defaults (spec §6 `recommendedHeartbeatSeconds` and
// the node-liveness window a registered node is pruned after).
pub const DEFAULT_HEART_BEAT_INTERVAL_MS: i64 = 5 * 1000;
pub const DEFAULT_HEART_BEAT_TIMEOUT_MS: i64 = 15 * 1000;
pub const DEFAULT_IP_DELETE_TIMEOUT_MS: i64 = 30 * 1000;

pub const CONFIG_MODULE: &str = "config";
pub const NAMING_MODULE: &str = "naming";
pub const INTERNAL_MODULE: &str = "internal";

pub const ADD_CONFIG: &str = "ADD_CONFIG";
pub const DELETE_CONFIG: &str = "DELETE_CONFIG";
pub const CONFIG_CHANGED: &str = "CONFIG_CHANGED";
pub const ADD_SERVICE: &str = "ADD_SERVICE";
pub const DELETE_SERVICE: &str = "DELETE_SERVICE";
pub const INSTANCE_CHANGED: &str = "INSTANCE_CHANGED";

/// Generic pagination wrapper for list operations (`ListConfigs`,
/// `DiscoverNodes`).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub total_count: u64,
    pub page_number: u64,
    pub pages_available: u64,
    pub page_items: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            total_count: 0,
            page_number: 1,
            pages_available: 0,
            page_items: vec![],
        }
    }
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
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_default() {
        let page: Page<String> = Page::default();
        assert_eq!(page.total_count, 0);
        assert_eq!(page.page_number, 1);
        assert!(page.page_items.is_empty());
    }

    #[test]
    fn test_page_new() {
        let items = vec!["a".to_string(), "b".to_string()];
        let page = Page::new(10, 1, 5, items);
        assert_eq!(page.total_count, 10);
        assert_eq!(page.pages_available, 2);
    }
}
