//! Namespace persistence trait
//!
//! Namespaces are loaded into the registry cache once at startup; validation
//! afterwards is cache-only (see the Registry Core). This trait only covers
//! that bulk load plus administrative mutation.

use async_trait::async_trait;

use crate::model::NamespaceInfo;

/// Namespace persistence operations
#[async_trait]
pub trait NamespacePersistence: Send + Sync {
    /// Load every namespace row, used once at startup.
    async fn namespace_find_all(&self) -> anyhow::Result<Vec<NamespaceInfo>>;

    /// Get a namespace by its composite key.
    async fn namespace_get(
        &self,
        tenant_id: &str,
        namespace_id: &str,
    ) -> anyhow::Result<Option<NamespaceInfo>>;

    /// Create a new namespace.
    async fn namespace_create(
        &self,
        tenant_id: &str,
        namespace_id: &str,
        namespace_name: &str,
    ) -> anyhow::Result<()>;
}
