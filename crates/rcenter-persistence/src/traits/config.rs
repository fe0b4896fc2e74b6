//! Config persistence trait
//!
//! Defines the database-of-record interface the Configuration Core (C7)
//! reads and writes directly — there is no cache layer on the config side.

use async_trait::async_trait;

use crate::model::{ConfigHistoryStorageData, ConfigStorageData};

/// Configuration persistence operations
#[async_trait]
pub trait ConfigPersistence: Send + Sync {
    /// Fetch the current row for a config key.
    async fn config_get(
        &self,
        tenant_id: &str,
        namespace_id: &str,
        group_name: &str,
        data_id: &str,
    ) -> anyhow::Result<Option<ConfigStorageData>>;

    /// Insert or update a config row.
    async fn config_upsert(&self, config: &ConfigStorageData) -> anyhow::Result<()>;

    /// Delete a config row. History rows are retained.
    async fn config_delete(
        &self,
        tenant_id: &str,
        namespace_id: &str,
        group_name: &str,
        data_id: &str,
    ) -> anyhow::Result<bool>;

    /// List every config row in a namespace, optionally narrowed to one group.
    async fn config_list(
        &self,
        tenant_id: &str,
        namespace_id: &str,
        group_name: &str,
    ) -> anyhow::Result<Vec<ConfigStorageData>>;

    /// Append a history row. Best-effort: failures are logged, never
    /// propagated as a failure of the config mutation itself.
    async fn config_history_append(&self, history: &ConfigHistoryStorageData) -> anyhow::Result<()>;

    /// Newest-first history for a config key, capped at `limit`.
    async fn config_history_list(
        &self,
        tenant_id: &str,
        namespace_id: &str,
        group_name: &str,
        data_id: &str,
        limit: u64,
    ) -> anyhow::Result<Vec<ConfigHistoryStorageData>>;

    /// Fetch the single history row for `target_version`, used by rollback.
    async fn config_history_get_by_version(
        &self,
        tenant_id: &str,
        namespace_id: &str,
        group_name: &str,
        data_id: &str,
        target_version: i64,
    ) -> anyhow::Result<Option<ConfigHistoryStorageData>>;
}
