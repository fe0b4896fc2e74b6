//! Registry persistence trait
//!
//! Defines the interface the Event Sync Worker (C2) and read paths use to
//! durably store service/node rows. The Registry Cache is the source of
//! truth for reads; this trait exists purely for async flush-and-replay.

use async_trait::async_trait;

use crate::model::{NodeStorageData, ServiceEventStorageData, ServiceStorageData};

/// Registry persistence operations
#[async_trait]
pub trait RegistryPersistence: Send + Sync {
    /// Fetch a single service row, without its nodes.
    async fn service_get(
        &self,
        tenant_id: &str,
        namespace_id: &str,
        group_name: &str,
        service_name: &str,
    ) -> anyhow::Result<Option<ServiceStorageData>>;

    /// Insert or update a service row.
    async fn service_upsert(&self, service: &ServiceStorageData) -> anyhow::Result<()>;

    /// Delete a service row (nodes are removed separately).
    async fn service_delete(
        &self,
        tenant_id: &str,
        namespace_id: &str,
        group_name: &str,
        service_name: &str,
    ) -> anyhow::Result<bool>;

    /// List every service row for a tenant/namespace, optionally narrowed to one group.
    async fn service_list(
        &self,
        tenant_id: &str,
        namespace_id: &str,
        group_name: &str,
    ) -> anyhow::Result<Vec<ServiceStorageData>>;

    /// Insert or update a node row.
    async fn node_upsert(&self, node: &NodeStorageData) -> anyhow::Result<()>;

    /// Delete a node row by its globally unique id.
    async fn node_delete(&self, node_id: &str) -> anyhow::Result<bool>;

    /// List every node row belonging to a service.
    async fn node_list_by_service(
        &self,
        tenant_id: &str,
        namespace_id: &str,
        group_name: &str,
        service_name: &str,
    ) -> anyhow::Result<Vec<NodeStorageData>>;

    /// Append an audit row for a registry mutation. Best-effort: failures
    /// here must never surface as a failure of the mutation itself.
    async fn service_event_append(&self, event: &ServiceEventStorageData) -> anyhow::Result<()>;
}
