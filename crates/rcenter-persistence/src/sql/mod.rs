//! SQL-based persistence backend (MySQL/PostgreSQL via SeaORM)
//!
//! The single-node-plus-external-DB backend: replication and failover are
//! the database's problem, not this crate's.

use async_trait::async_trait;
use sea_orm::{prelude::Expr, *};

use crate::entity::{config_history, config_info, instance_info, namespace_info, service_event, service_info};
use crate::model::*;
use crate::traits::*;

/// External database persistence service
///
/// Wraps a SeaORM `DatabaseConnection` and implements all persistence traits
/// by delegating to direct database queries.
pub struct ExternalDbPersistService {
    db: DatabaseConnection,
}

impl ExternalDbPersistService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl PersistenceService for ExternalDbPersistService {
    fn storage_mode(&self) -> StorageMode {
        StorageMode::ExternalDb
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        namespace_info::Entity::find()
            .select_only()
            .column_as(Expr::cust("1"), "health")
            .into_tuple::<i32>()
            .one(&self.db)
            .await?;
        Ok(())
    }
}

// ============================================================================
// NamespacePersistence
// ============================================================================

fn namespace_from_model(m: namespace_info::Model) -> NamespaceInfo {
    NamespaceInfo {
        tenant_id: m.tenant_id,
        namespace_id: m.namespace_id,
        namespace_name: m.namespace_name,
        active_flag: m.active_flag,
    }
}

#[async_trait]
impl NamespacePersistence for ExternalDbPersistService {
    async fn namespace_find_all(&self) -> anyhow::Result<Vec<NamespaceInfo>> {
        let rows = namespace_info::Entity::find().all(&self.db).await?;
        Ok(rows.into_iter().map(namespace_from_model).collect())
    }

    async fn namespace_get(&self, tenant_id: &str, namespace_id: &str) -> anyhow::Result<Option<NamespaceInfo>> {
        let row = namespace_info::Entity::find()
            .filter(namespace_info::Column::TenantId.eq(tenant_id))
            .filter(namespace_info::Column::NamespaceId.eq(namespace_id))
            .one(&self.db)
            .await?;
        Ok(row.map(namespace_from_model))
    }

    async fn namespace_create(&self, tenant_id: &str, namespace_id: &str, namespace_name: &str) -> anyhow::Result<()> {
        let model = namespace_info::ActiveModel {
            id: ActiveValue::NotSet,
            tenant_id: ActiveValue::Set(tenant_id.to_string()),
            namespace_id: ActiveValue::Set(namespace_id.to_string()),
            namespace_name: ActiveValue::Set(namespace_name.to_string()),
            active_flag: ActiveValue::Set(true),
        };
        model.insert(&self.db).await?;
        Ok(())
    }
}

// ============================================================================
// ConfigPersistence
// ============================================================================

fn config_from_model(m: config_info::Model) -> ConfigStorageData {
    ConfigStorageData {
        tenant_id: m.tenant_id,
        namespace_id: m.namespace_id,
        group_name: m.group_name,
        data_id: m.data_id,
        content_type: m.content_type,
        config_content: m.config_content,
        md5_value: m.md5_value,
        version: m.version,
        description: m.description,
        add_time: m.add_time,
        add_who: m.add_who,
        edit_time: m.edit_time,
        edit_who: m.edit_who,
    }
}

fn history_from_model(m: config_history::Model) -> ConfigHistoryStorageData {
    ConfigHistoryStorageData {
        tenant_id: m.tenant_id,
        namespace_id: m.namespace_id,
        group_name: m.group_name,
        data_id: m.data_id,
        change_type: m.change_type,
        old_content: m.old_content,
        new_content: m.new_content,
        old_version: m.old_version,
        new_version: m.new_version,
        old_md5: m.old_md5,
        new_md5: m.new_md5,
        change_reason: m.change_reason,
        changed_by: m.changed_by,
        changed_at: m.changed_at,
    }
}

fn config_key_filter(
    q: Select<config_info::Entity>,
    tenant_id: &str,
    namespace_id: &str,
    group_name: &str,
    data_id: &str,
) -> Select<config_info::Entity> {
    q.filter(config_info::Column::TenantId.eq(tenant_id))
        .filter(config_info::Column::NamespaceId.eq(namespace_id))
        .filter(config_info::Column::GroupName.eq(group_name))
        .filter(config_info::Column::DataId.eq(data_id))
}

#[async_trait]
impl ConfigPersistence for ExternalDbPersistService {
    async fn config_get(
        &self,
        tenant_id: &str,
        namespace_id: &str,
        group_name: &str,
        data_id: &str,
    ) -> anyhow::Result<Option<ConfigStorageData>> {
        let row = config_key_filter(config_info::Entity::find(), tenant_id, namespace_id, group_name, data_id)
            .one(&self.db)
            .await?;
        Ok(row.map(config_from_model))
    }

    async fn config_upsert(&self, config: &ConfigStorageData) -> anyhow::Result<()> {
        let existing = config_key_filter(
            config_info::Entity::find(),
            &config.tenant_id,
            &config.namespace_id,
            &config.group_name,
            &config.data_id,
        )
        .one(&self.db)
        .await?;

        match existing {
            Some(row) => {
                let mut model: config_info::ActiveModel = row.into();
                model.content_type = ActiveValue::Set(config.content_type.clone());
                model.config_content = ActiveValue::Set(config.config_content.clone());
                model.md5_value = ActiveValue::Set(config.md5_value.clone());
                model.version = ActiveValue::Set(config.version);
                model.description = ActiveValue::Set(config.description.clone());
                model.edit_time = ActiveValue::Set(config.edit_time);
                model.edit_who = ActiveValue::Set(config.edit_who.clone());
                model.update(&self.db).await?;
            }
            None => {
                let model = config_info::ActiveModel {
                    id: ActiveValue::NotSet,
                    tenant_id: ActiveValue::Set(config.tenant_id.clone()),
                    namespace_id: ActiveValue::Set(config.namespace_id.clone()),
                    group_name: ActiveValue::Set(config.group_name.clone()),
                    data_id: ActiveValue::Set(config.data_id.clone()),
                    content_type: ActiveValue::Set(config.content_type.clone()),
                    config_content: ActiveValue::Set(config.config_content.clone()),
                    md5_value: ActiveValue::Set(config.md5_value.clone()),
                    version: ActiveValue::Set(config.version),
                    description: ActiveValue::Set(config.description.clone()),
                    add_time: ActiveValue::Set(config.add_time),
                    add_who: ActiveValue::Set(config.add_who.clone()),
                    edit_time: ActiveValue::Set(config.edit_time),
                    edit_who: ActiveValue::Set(config.edit_who.clone()),
                };
                model.insert(&self.db).await?;
            }
        }
        Ok(())
    }

    async fn config_delete(
        &self,
        tenant_id: &str,
        namespace_id: &str,
        group_name: &str,
        data_id: &str,
    ) -> anyhow::Result<bool> {
        let result = config_key_filter(config_info::Entity::delete_many(), tenant_id, namespace_id, group_name, data_id)
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn config_list(
        &self,
        tenant_id: &str,
        namespace_id: &str,
        group_name: &str,
    ) -> anyhow::Result<Vec<ConfigStorageData>> {
        let mut q = config_info::Entity::find()
            .filter(config_info::Column::TenantId.eq(tenant_id))
            .filter(config_info::Column::NamespaceId.eq(namespace_id));
        if !group_name.is_empty() {
            q = q.filter(config_info::Column::GroupName.eq(group_name));
        }
        let rows = q.all(&self.db).await?;
        Ok(rows.into_iter().map(config_from_model).collect())
    }

    async fn config_history_append(&self, history: &ConfigHistoryStorageData) -> anyhow::Result<()> {
        let model = config_history::ActiveModel {
            id: ActiveValue::NotSet,
            tenant_id: ActiveValue::Set(history.tenant_id.clone()),
            namespace_id: ActiveValue::Set(history.namespace_id.clone()),
            group_name: ActiveValue::Set(history.group_name.clone()),
            data_id: ActiveValue::Set(history.data_id.clone()),
            change_type: ActiveValue::Set(history.change_type.clone()),
            old_content: ActiveValue::Set(history.old_content.clone()),
            new_content: ActiveValue::Set(history.new_content.clone()),
            old_version: ActiveValue::Set(history.old_version),
            new_version: ActiveValue::Set(history.new_version),
            old_md5: ActiveValue::Set(history.old_md5.clone()),
            new_md5: ActiveValue::Set(history.new_md5.clone()),
            change_reason: ActiveValue::Set(history.change_reason.clone()),
            changed_by: ActiveValue::Set(history.changed_by.clone()),
            changed_at: ActiveValue::Set(history.changed_at),
        };
        model.insert(&self.db).await?;
        Ok(())
    }

    async fn config_history_list(
        &self,
        tenant_id: &str,
        namespace_id: &str,
        group_name: &str,
        data_id: &str,
        limit: u64,
    ) -> anyhow::Result<Vec<ConfigHistoryStorageData>> {
        let rows = config_history::Entity::find()
            .filter(config_history::Column::TenantId.eq(tenant_id))
            .filter(config_history::Column::NamespaceId.eq(namespace_id))
            .filter(config_history::Column::GroupName.eq(group_name))
            .filter(config_history::Column::DataId.eq(data_id))
            .order_by_desc(config_history::Column::ChangedAt)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(history_from_model).collect())
    }

    async fn config_history_get_by_version(
        &self,
        tenant_id: &str,
        namespace_id: &str,
        group_name: &str,
        data_id: &str,
        target_version: i64,
    ) -> anyhow::Result<Option<ConfigHistoryStorageData>> {
        let row = config_history::Entity::find()
            .filter(config_history::Column::TenantId.eq(tenant_id))
            .filter(config_history::Column::NamespaceId.eq(namespace_id))
            .filter(config_history::Column::GroupName.eq(group_name))
            .filter(config_history::Column::DataId.eq(data_id))
            .filter(config_history::Column::NewVersion.eq(target_version))
            .one(&self.db)
            .await?;
        Ok(row.map(history_from_model))
    }
}

// ============================================================================
// RegistryPersistence
// ============================================================================

fn service_from_model(m: service_info::Model) -> ServiceStorageData {
    ServiceStorageData {
        tenant_id: m.tenant_id,
        namespace_id: m.namespace_id,
        group_name: m.group_name,
        service_name: m.service_name,
        protocol: m.protocol,
        version: m.version,
        description: m.description,
        load_balance_strategy: m.load_balance_strategy,
        protect_threshold: m.protect_threshold,
        metadata: m.metadata,
        tags: m.tags,
        service_version: m.service_version,
        active_flag: m.active_flag,
        add_time: m.add_time,
        add_who: m.add_who,
        edit_time: m.edit_time,
        edit_who: m.edit_who,
        opr_seq_flag: m.opr_seq_flag,
    }
}

fn node_from_model(m: instance_info::Model) -> NodeStorageData {
    NodeStorageData {
        node_id: m.node_id,
        tenant_id: m.tenant_id,
        namespace_id: m.namespace_id,
        group_name: m.group_name,
        service_name: m.service_name,
        host: m.host,
        port: m.port,
        weight: m.weight,
        instance_status: m.instance_status,
        healthy_status: m.healthy_status,
        ephemeral: m.ephemeral,
        metadata: m.metadata,
        register_time: m.register_time,
        last_beat_time: m.last_beat_time,
        last_check_time: m.last_check_time,
    }
}

fn service_key_filter(
    q: Select<service_info::Entity>,
    tenant_id: &str,
    namespace_id: &str,
    group_name: &str,
    service_name: &str,
) -> Select<service_info::Entity> {
    q.filter(service_info::Column::TenantId.eq(tenant_id))
        .filter(service_info::Column::NamespaceId.eq(namespace_id))
        .filter(service_info::Column::GroupName.eq(group_name))
        .filter(service_info::Column::ServiceName.eq(service_name))
}

#[async_trait]
impl RegistryPersistence for ExternalDbPersistService {
    async fn service_get(
        &self,
        tenant_id: &str,
        namespace_id: &str,
        group_name: &str,
        service_name: &str,
    ) -> anyhow::Result<Option<ServiceStorageData>> {
        let row = service_key_filter(service_info::Entity::find(), tenant_id, namespace_id, group_name, service_name)
            .one(&self.db)
            .await?;
        Ok(row.map(service_from_model))
    }

    async fn service_upsert(&self, service: &ServiceStorageData) -> anyhow::Result<()> {
        let existing = service_key_filter(
            service_info::Entity::find(),
            &service.tenant_id,
            &service.namespace_id,
            &service.group_name,
            &service.service_name,
        )
        .one(&self.db)
        .await?;

        match existing {
            Some(row) => {
                let mut model: service_info::ActiveModel = row.into();
                model.protocol = ActiveValue::Set(service.protocol.clone());
                model.version = ActiveValue::Set(service.version.clone());
                model.description = ActiveValue::Set(service.description.clone());
                model.load_balance_strategy = ActiveValue::Set(service.load_balance_strategy.clone());
                model.protect_threshold = ActiveValue::Set(service.protect_threshold);
                model.metadata = ActiveValue::Set(service.metadata.clone());
                model.tags = ActiveValue::Set(service.tags.clone());
                model.service_version = ActiveValue::Set(service.service_version);
                model.active_flag = ActiveValue::Set(service.active_flag);
                model.edit_time = ActiveValue::Set(service.edit_time);
                model.edit_who = ActiveValue::Set(service.edit_who.clone());
                model.opr_seq_flag = ActiveValue::Set(service.opr_seq_flag.clone());
                model.update(&self.db).await?;
            }
            None => {
                let model = service_info::ActiveModel {
                    id: ActiveValue::NotSet,
                    tenant_id: ActiveValue::Set(service.tenant_id.clone()),
                    namespace_id: ActiveValue::Set(service.namespace_id.clone()),
                    group_name: ActiveValue::Set(service.group_name.clone()),
                    service_name: ActiveValue::Set(service.service_name.clone()),
                    protocol: ActiveValue::Set(service.protocol.clone()),
                    version: ActiveValue::Set(service.version.clone()),
                    description: ActiveValue::Set(service.description.clone()),
                    load_balance_strategy: ActiveValue::Set(service.load_balance_strategy.clone()),
                    protect_threshold: ActiveValue::Set(service.protect_threshold),
                    metadata: ActiveValue::Set(service.metadata.clone()),
                    tags: ActiveValue::Set(service.tags.clone()),
                    service_version: ActiveValue::Set(service.service_version),
                    active_flag: ActiveValue::Set(service.active_flag),
                    add_time: ActiveValue::Set(service.add_time),
                    add_who: ActiveValue::Set(service.add_who.clone()),
                    edit_time: ActiveValue::Set(service.edit_time),
                    edit_who: ActiveValue::Set(service.edit_who.clone()),
                    opr_seq_flag: ActiveValue::Set(service.opr_seq_flag.clone()),
                };
                model.insert(&self.db).await?;
            }
        }
        Ok(())
    }

    async fn service_delete(
        &self,
        tenant_id: &str,
        namespace_id: &str,
        group_name: &str,
        service_name: &str,
    ) -> anyhow::Result<bool> {
        let result =
            service_key_filter(service_info::Entity::delete_many(), tenant_id, namespace_id, group_name, service_name)
                .exec(&self.db)
                .await?;
        Ok(result.rows_affected > 0)
    }

    async fn service_list(
        &self,
        tenant_id: &str,
        namespace_id: &str,
        group_name: &str,
    ) -> anyhow::Result<Vec<ServiceStorageData>> {
        let mut q = service_info::Entity::find()
            .filter(service_info::Column::TenantId.eq(tenant_id))
            .filter(service_info::Column::NamespaceId.eq(namespace_id));
        if !group_name.is_empty() {
            q = q.filter(service_info::Column::GroupName.eq(group_name));
        }
        let rows = q.all(&self.db).await?;
        Ok(rows.into_iter().map(service_from_model).collect())
    }

    async fn node_upsert(&self, node: &NodeStorageData) -> anyhow::Result<()> {
        let existing = instance_info::Entity::find_by_id(node.node_id.clone()).one(&self.db).await?;
        match existing {
            Some(row) => {
                let mut model: instance_info::ActiveModel = row.into();
                model.host = ActiveValue::Set(node.host.clone());
                model.port = ActiveValue::Set(node.port);
                model.weight = ActiveValue::Set(node.weight);
                model.instance_status = ActiveValue::Set(node.instance_status.clone());
                model.healthy_status = ActiveValue::Set(node.healthy_status.clone());
                model.metadata = ActiveValue::Set(node.metadata.clone());
                model.last_beat_time = ActiveValue::Set(node.last_beat_time);
                model.last_check_time = ActiveValue::Set(node.last_check_time);
                model.update(&self.db).await?;
            }
            None => {
                let model = instance_info::ActiveModel {
                    node_id: ActiveValue::Set(node.node_id.clone()),
                    tenant_id: ActiveValue::Set(node.tenant_id.clone()),
                    namespace_id: ActiveValue::Set(node.namespace_id.clone()),
                    group_name: ActiveValue::Set(node.group_name.clone()),
                    service_name: ActiveValue::Set(node.service_name.clone()),
                    host: ActiveValue::Set(node.host.clone()),
                    port: ActiveValue::Set(node.port),
                    weight: ActiveValue::Set(node.weight),
                    instance_status: ActiveValue::Set(node.instance_status.clone()),
                    healthy_status: ActiveValue::Set(node.healthy_status.clone()),
                    ephemeral: ActiveValue::Set(node.ephemeral),
                    metadata: ActiveValue::Set(node.metadata.clone()),
                    register_time: ActiveValue::Set(node.register_time),
                    last_beat_time: ActiveValue::Set(node.last_beat_time),
                    last_check_time: ActiveValue::Set(node.last_check_time),
                };
                model.insert(&self.db).await?;
            }
        }
        Ok(())
    }

    async fn node_delete(&self, node_id: &str) -> anyhow::Result<bool> {
        let result = instance_info::Entity::delete_by_id(node_id.to_string()).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn node_list_by_service(
        &self,
        tenant_id: &str,
        namespace_id: &str,
        group_name: &str,
        service_name: &str,
    ) -> anyhow::Result<Vec<NodeStorageData>> {
        let rows = instance_info::Entity::find()
            .filter(instance_info::Column::TenantId.eq(tenant_id))
            .filter(instance_info::Column::NamespaceId.eq(namespace_id))
            .filter(instance_info::Column::GroupName.eq(group_name))
            .filter(instance_info::Column::ServiceName.eq(service_name))
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(node_from_model).collect())
    }

    async fn service_event_append(&self, event: &ServiceEventStorageData) -> anyhow::Result<()> {
        let model = service_event::ActiveModel {
            id: ActiveValue::NotSet,
            event_type: ActiveValue::Set(event.event_type.clone()),
            tenant_id: ActiveValue::Set(event.tenant_id.clone()),
            namespace_id: ActiveValue::Set(event.namespace_id.clone()),
            group_name: ActiveValue::Set(event.group_name.clone()),
            service_name: ActiveValue::Set(event.service_name.clone()),
            node_id: ActiveValue::Set(event.node_id.clone()),
            created_time: ActiveValue::Set(event.created_time),
        };
        model.insert(&self.db).await?;
        Ok(())
    }
}
