//! Configuration Core (C7) data model: config documents, their history
//! rows, and the watcher event envelope pushed through the Config Watcher
//! Hub (C5).

use rcenter_api::remote::RequestTrait;
use rcenter_core::SubscriptionKey;
use serde::{Deserialize, Serialize};

/// Fully-qualified identity of a configuration document.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigKey {
    pub tenant_id: String,
    pub namespace_id: String,
    pub group_name: String,
    pub data_id: String,
}

impl ConfigKey {
    pub fn new(
        tenant_id: impl Into<String>,
        namespace_id: impl Into<String>,
        group_name: impl Into<String>,
        data_id: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            namespace_id: namespace_id.into(),
            group_name: group_name.into(),
            data_id: data_id.into(),
        }
    }
}

/// A configuration document: content plus its version and audit trail.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigData {
    #[serde(flatten)]
    pub key: ConfigKey,
    pub content_type: String,
    pub config_content: String,
    /// `MD5(config_content)`, computed server-side on every save.
    pub md5_value: String,
    /// Starts at 1, +1 on every successful Save/Rollback. Never skipped.
    pub version: i64,
    pub description: String,
    pub add_time: i64,
    pub add_who: String,
    pub edit_time: i64,
    pub edit_who: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfigChangeType {
    #[default]
    Add,
    Update,
    Rollback,
}

/// One row per mutation of a `ConfigData`. History is append-only, even
/// across rollback: a rollback writes a new row, it never rewrites an old
/// one.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigHistoryEntry {
    #[serde(flatten)]
    pub key: ConfigKey,
    pub change_type: ConfigChangeType,
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

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigChangeEventType {
    ConfigUpdated,
    ConfigDeleted,
}

/// Wire envelope pushed to Config Watcher Hub (C5) subscribers.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigChangeEvent {
    pub event_type: ConfigChangeEventType,
    pub timestamp: i64,
    pub namespace_id: String,
    pub group_name: String,
    pub config_data_id: String,
    pub config: Option<ConfigData>,
    pub content_md5: String,
}

impl RequestTrait for ConfigChangeEvent {
    fn headers(&self) -> std::collections::HashMap<String, String> {
        std::collections::HashMap::new()
    }

    fn request_type(&self) -> &'static str {
        "ConfigChangeEvent"
    }

    fn insert_headers(&mut self, _headers: std::collections::HashMap<String, String>) {}
}

/// Key the Config Watcher Hub (C5) indexes subscriptions by: a single
/// config document, addressed the same way `WatchConfig` addresses it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConfigSubscriptionKey(pub ConfigKey);

impl SubscriptionKey for ConfigSubscriptionKey {
    fn to_key_string(&self) -> String {
        format!(
            "cfg::{}@@{}@@{}@@{}",
            self.0.tenant_id, self.0.namespace_id, self.0.group_name, self.0.data_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_key_identifies_full_path() {
        let key = ConfigKey::new("default", "public", "DEFAULT_GROUP", "app.properties");
        assert_eq!(key.data_id, "app.properties");
    }

    #[test]
    fn subscription_key_string_is_stable_for_equal_keys() {
        let a = ConfigSubscriptionKey(ConfigKey::new("default", "public", "DEFAULT_GROUP", "app"));
        let b = ConfigSubscriptionKey(ConfigKey::new("default", "public", "DEFAULT_GROUP", "app"));
        assert_eq!(a.to_key_string(), b.to_key_string());
    }
}
