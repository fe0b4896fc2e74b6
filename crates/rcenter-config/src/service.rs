//! Configuration Core (C7): Get/Save/Delete/List/History/Rollback/Watch
//! over the config persistence store (C1, direct DB — there is no cache
//! layer on the config side). Mutations publish to the Config Watcher Hub
//! (C5) via the same non-blocking, best-effort delivery the Registry Core
//! uses.

use std::sync::Arc;

use dashmap::DashMap;
use rcenter_api::remote::RequestTrait;
use rcenter_core::Hub;
use rcenter_persistence::{
    ConfigHistoryStorageData, ConfigPersistence, ConfigStorageData, NamespacePersistence,
};
use tonic::{Code, Status};

use crate::model::{
    ConfigChangeEvent, ConfigChangeEventType, ConfigChangeType, ConfigData, ConfigHistoryEntry, ConfigKey,
    ConfigSubscriptionKey,
};

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn md5_hex(content: &str) -> String {
    format!("{:x}", md5::compute(content))
}

fn storage_data(data: &ConfigData) -> ConfigStorageData {
    ConfigStorageData {
        tenant_id: data.key.tenant_id.clone(),
        namespace_id: data.key.namespace_id.clone(),
        group_name: data.key.group_name.clone(),
        data_id: data.key.data_id.clone(),
        content_type: data.content_type.clone(),
        config_content: data.config_content.clone(),
        md5_value: data.md5_value.clone(),
        version: data.version,
        description: data.description.clone(),
        add_time: data.add_time,
        add_who: data.add_who.clone(),
        edit_time: data.edit_time,
        edit_who: data.edit_who.clone(),
    }
}

fn from_storage(key: &ConfigKey, row: ConfigStorageData) -> ConfigData {
    ConfigData {
        key: key.clone(),
        content_type: row.content_type,
        config_content: row.config_content,
        md5_value: row.md5_value,
        version: row.version,
        description: row.description,
        add_time: row.add_time,
        add_who: row.add_who,
        edit_time: row.edit_time,
        edit_who: row.edit_who,
    }
}

fn history_from_storage(key: &ConfigKey, row: ConfigHistoryStorageData) -> ConfigHistoryEntry {
    let change_type = match row.change_type.as_str() {
        "UPDATE" => ConfigChangeType::Update,
        "ROLLBACK" => ConfigChangeType::Rollback,
        _ => ConfigChangeType::Add,
    };
    ConfigHistoryEntry {
        key: key.clone(),
        change_type,
        old_content: row.old_content,
        new_content: row.new_content,
        old_version: row.old_version,
        new_version: row.new_version,
        old_md5: row.old_md5,
        new_md5: row.new_md5,
        change_reason: row.change_reason,
        changed_by: row.changed_by,
        changed_at: row.changed_at,
    }
}

fn history_storage(key: &ConfigKey, entry: &ConfigHistoryEntry) -> ConfigHistoryStorageData {
    let change_type = match entry.change_type {
        ConfigChangeType::Add => "ADD",
        ConfigChangeType::Update => "UPDATE",
        ConfigChangeType::Rollback => "ROLLBACK",
    };
    ConfigHistoryStorageData {
        tenant_id: key.tenant_id.clone(),
        namespace_id: key.namespace_id.clone(),
        group_name: key.group_name.clone(),
        data_id: key.data_id.clone(),
        change_type: change_type.to_string(),
        old_content: entry.old_content.clone(),
        new_content: entry.new_content.clone(),
        old_version: entry.old_version,
        new_version: entry.new_version,
        old_md5: entry.old_md5.clone(),
        new_md5: entry.new_md5.clone(),
        change_reason: entry.change_reason.clone(),
        changed_by: entry.changed_by.clone(),
        changed_at: entry.changed_at,
    }
}

/// Cache-only `(tenantId, namespaceId)` validity table, loaded once at
/// startup. Namespace checks never touch the DB on the hot path.
pub struct NamespaceTable {
    active: DashMap<(String, String), bool>,
}

impl NamespaceTable {
    pub fn new() -> Self {
        Self { active: DashMap::new() }
    }

    pub async fn load(&self, persistence: &dyn NamespacePersistence) -> Result<(), Status> {
        let rows = persistence
            .namespace_find_all()
            .await
            .map_err(|e| Status::new(Code::Internal, format!("namespace load failed: {e}")))?;
        self.active.clear();
        for row in rows {
            self.active.insert((row.tenant_id, row.namespace_id), row.active_flag);
        }
        Ok(())
    }

    fn check(&self, tenant_id: &str, namespace_id: &str) -> Result<(), Status> {
        match self.active.get(&(tenant_id.to_string(), namespace_id.to_string())) {
            Some(active) if *active => Ok(()),
            Some(_) => Err(Status::new(Code::FailedPrecondition, "namespace is inactive")),
            None => Err(Status::new(Code::PermissionDenied, "unknown namespace")),
        }
    }
}

impl Default for NamespaceTable {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ConfigCore {
    persistence: Arc<dyn ConfigPersistence>,
    namespaces: Arc<NamespaceTable>,
    hub: Hub<ConfigSubscriptionKey>,
}

impl ConfigCore {
    pub fn new(
        persistence: Arc<dyn ConfigPersistence>,
        namespaces: Arc<NamespaceTable>,
        hub: Hub<ConfigSubscriptionKey>,
    ) -> Self {
        Self {
            persistence,
            namespaces,
            hub,
        }
    }

    fn validate_key(&self, key: &ConfigKey) -> Result<(), Status> {
        if key.data_id.is_empty() || key.group_name.is_empty() {
            return Err(Status::new(Code::InvalidArgument, "dataId and group are required"));
        }
        self.namespaces.check(&key.tenant_id, &key.namespace_id)
    }

    fn publish(&self, key: &ConfigKey, event: ConfigChangeEvent) {
        let hub = self.hub.clone();
        let sub_key = ConfigSubscriptionKey(key.clone());
        tokio::spawn(async move {
            hub.publish(&sub_key, event.build_server_push_payload()).await;
        });
    }

    pub async fn get_config(&self, key: &ConfigKey) -> Result<Option<ConfigData>, Status> {
        self.validate_key(key)?;
        let row = self
            .persistence
            .config_get(&key.tenant_id, &key.namespace_id, &key.group_name, &key.data_id)
            .await
            .map_err(|e| Status::new(Code::Internal, e.to_string()))?;
        Ok(row.map(|r| from_storage(key, r)))
    }

    pub async fn save_config(
        &self,
        key: ConfigKey,
        content: String,
        content_type: String,
        changed_by: String,
        change_reason: String,
        description: String,
    ) -> Result<ConfigData, Status> {
        self.validate_key(&key)?;
        let now = now_millis();
        let current = self
            .persistence
            .config_get(&key.tenant_id, &key.namespace_id, &key.group_name, &key.data_id)
            .await
            .map_err(|e| Status::new(Code::Internal, e.to_string()))?;

        let new_md5 = md5_hex(&content);
        let (version, add_time, add_who, change_type, old_content, old_version, old_md5) = match &current {
            Some(row) => (
                row.version + 1,
                row.add_time,
                row.add_who.clone(),
                ConfigChangeType::Update,
                row.config_content.clone(),
                row.version,
                row.md5_value.clone(),
            ),
            None => (1, now, changed_by.clone(), ConfigChangeType::Add, String::new(), 0, String::new()),
        };

        let data = ConfigData {
            key: key.clone(),
            content_type,
            config_content: content.clone(),
            md5_value: new_md5.clone(),
            version,
            description,
            add_time,
            add_who,
            edit_time: now,
            edit_who: changed_by.clone(),
        };

        self.persistence
            .config_upsert(&storage_data(&data))
            .await
            .map_err(|e| Status::new(Code::Internal, e.to_string()))?;

        let history = ConfigHistoryEntry {
            key: key.clone(),
            change_type,
            old_content,
            new_content: content,
            old_version,
            new_version: version,
            old_md5,
            new_md5: new_md5.clone(),
            change_reason,
            changed_by,
            changed_at: now,
        };
        if let Err(e) = self.persistence.config_history_append(&history_storage(&key, &history)).await {
            tracing::warn!(error = %e, data_id = %key.data_id, "config history append failed, config row already committed");
        }

        self.publish(
            &key,
            ConfigChangeEvent {
                event_type: ConfigChangeEventType::ConfigUpdated,
                timestamp: now,
                namespace_id: key.namespace_id.clone(),
                group_name: key.group_name.clone(),
                config_data_id: key.data_id.clone(),
                config: Some(data.clone()),
                content_md5: new_md5,
            },
        );

        Ok(data)
    }

    pub async fn delete_config(&self, key: &ConfigKey) -> Result<bool, Status> {
        self.validate_key(key)?;
        let deleted = self
            .persistence
            .config_delete(&key.tenant_id, &key.namespace_id, &key.group_name, &key.data_id)
            .await
            .map_err(|e| Status::new(Code::Internal, e.to_string()))?;

        if deleted {
            self.publish(
                key,
                ConfigChangeEvent {
                    event_type: ConfigChangeEventType::ConfigDeleted,
                    timestamp: now_millis(),
                    namespace_id: key.namespace_id.clone(),
                    group_name: key.group_name.clone(),
                    config_data_id: key.data_id.clone(),
                    config: None,
                    content_md5: String::new(),
                },
            );
        }

        Ok(deleted)
    }

    pub async fn list_configs(
        &self,
        tenant_id: &str,
        namespace_id: &str,
        group_name: &str,
    ) -> Result<Vec<ConfigData>, Status> {
        self.namespaces.check(tenant_id, namespace_id)?;
        let rows = self
            .persistence
            .config_list(tenant_id, namespace_id, group_name)
            .await
            .map_err(|e| Status::new(Code::Internal, e.to_string()))?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let key = ConfigKey::new(tenant_id, namespace_id, row.group_name.clone(), row.data_id.clone());
                from_storage(&key, row)
            })
            .collect())
    }

    pub async fn get_config_history(&self, key: &ConfigKey, limit: u64) -> Result<Vec<ConfigHistoryEntry>, Status> {
        self.validate_key(key)?;
        let rows = self
            .persistence
            .config_history_list(&key.tenant_id, &key.namespace_id, &key.group_name, &key.data_id, limit)
            .await
            .map_err(|e| Status::new(Code::Internal, e.to_string()))?;
        Ok(rows.into_iter().map(|r| history_from_storage(key, r)).collect())
    }

    pub async fn rollback_config(
        &self,
        key: ConfigKey,
        target_version: i64,
        changed_by: String,
        change_reason: String,
    ) -> Result<ConfigData, Status> {
        self.validate_key(&key)?;
        let target = self
            .persistence
            .config_history_get_by_version(&key.tenant_id, &key.namespace_id, &key.group_name, &key.data_id, target_version)
            .await
            .map_err(|e| Status::new(Code::Internal, e.to_string()))?
            .ok_or_else(|| Status::new(Code::NotFound, "target version not found in history"))?;

        let current = self
            .persistence
            .config_get(&key.tenant_id, &key.namespace_id, &key.group_name, &key.data_id)
            .await
            .map_err(|e| Status::new(Code::Internal, e.to_string()))?;

        let now = now_millis();
        let (version, add_time, add_who, old_content, old_version, old_md5) = match &current {
            Some(row) => (row.version + 1, row.add_time, row.add_who.clone(), row.config_content.clone(), row.version, row.md5_value.clone()),
            None => (1, now, changed_by.clone(), String::new(), 0, String::new()),
        };

        let new_content = target.new_content.clone();
        let new_md5 = md5_hex(&new_content);

        let data = ConfigData {
            key: key.clone(),
            content_type: String::new(),
            config_content: new_content.clone(),
            md5_value: new_md5.clone(),
            version,
            description: String::new(),
            add_time,
            add_who,
            edit_time: now,
            edit_who: changed_by.clone(),
        };

        self.persistence
            .config_upsert(&storage_data(&data))
            .await
            .map_err(|e| Status::new(Code::Internal, e.to_string()))?;

        let history = ConfigHistoryEntry {
            key: key.clone(),
            change_type: ConfigChangeType::Rollback,
            old_content,
            new_content,
            old_version,
            new_version: version,
            old_md5,
            new_md5: new_md5.clone(),
            change_reason,
            changed_by,
            changed_at: now,
        };
        if let Err(e) = self.persistence.config_history_append(&history_storage(&key, &history)).await {
            tracing::warn!(error = %e, data_id = %key.data_id, "config history append failed, rollback already committed");
        }

        self.publish(
            &key,
            ConfigChangeEvent {
                event_type: ConfigChangeEventType::ConfigUpdated,
                timestamp: now,
                namespace_id: key.namespace_id.clone(),
                group_name: key.group_name.clone(),
                config_data_id: key.data_id.clone(),
                config: Some(data.clone()),
                content_md5: new_md5,
            },
        );

        Ok(data)
    }

    /// Snapshot-then-stream, mirroring `SubscribeServices`: a config missing
    /// at subscription time produces a `CONFIG_DELETED` snapshot event.
    pub async fn watch_config(
        &self,
        connection_id: &str,
        client_ip: &str,
        keys: &[ConfigKey],
    ) -> Result<Vec<ConfigChangeEvent>, Status> {
        let mut events = Vec::with_capacity(keys.len());
        for key in keys {
            self.validate_key(key)?;
            let row = self
                .persistence
                .config_get(&key.tenant_id, &key.namespace_id, &key.group_name, &key.data_id)
                .await
                .map_err(|e| Status::new(Code::Internal, e.to_string()))?;

            let event = match row {
                Some(r) => {
                    let data = from_storage(key, r);
                    ConfigChangeEvent {
                        event_type: ConfigChangeEventType::ConfigUpdated,
                        timestamp: now_millis(),
                        namespace_id: key.namespace_id.clone(),
                        group_name: key.group_name.clone(),
                        config_data_id: key.data_id.clone(),
                        content_md5: data.md5_value.clone(),
                        config: Some(data),
                    }
                }
                None => ConfigChangeEvent {
                    event_type: ConfigChangeEventType::ConfigDeleted,
                    timestamp: now_millis(),
                    namespace_id: key.namespace_id.clone(),
                    group_name: key.group_name.clone(),
                    config_data_id: key.data_id.clone(),
                    config: None,
                    content_md5: String::new(),
                },
            };

            let sub_key = ConfigSubscriptionKey(key.clone());
            self.hub.subscribe(
                connection_id,
                &sub_key,
                rcenter_core::SubscriberInfo {
                    client_ip: client_ip.to_string(),
                    fingerprint: event.content_md5.clone(),
                },
            );
            events.push(event);
        }
        Ok(events)
    }

    pub fn unsubscribe_all(&self, connection_id: &str) {
        self.hub.unsubscribe_all(connection_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn md5_is_deterministic() {
        assert_eq!(md5_hex("k=1"), md5_hex("k=1"));
        assert_ne!(md5_hex("k=1"), md5_hex("k=2"));
    }

    #[tokio::test]
    async fn namespace_table_rejects_unknown() {
        let table = NamespaceTable::new();
        assert_eq!(table.check("default", "public").unwrap_err().code(), Code::PermissionDenied);
    }

    #[tokio::test]
    async fn namespace_table_rejects_inactive() {
        let table = NamespaceTable::new();
        table.active.insert(("default".to_string(), "public".to_string()), false);
        assert_eq!(table.check("default", "public").unwrap_err().code(), Code::FailedPrecondition);
    }
}
