//! Registry Core (C6): register/unregister/heartbeat/discover/subscribe
//! business operations over the Registry Cache (C3). Mutations publish to
//! the Service Subscriber Hub (C4) and enqueue durable writes for the Event
//! Sync Worker (C2); neither step ever touches the DB while a service lock
//! is held.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use rcenter_api::remote::RequestTrait;
use rcenter_core::{Hub, SubscriberInfo};
use rcenter_persistence::{
    NamespacePersistence, NodeStorageData, RegistryPersistence, ServiceEventStorageData, ServiceStorageData,
};
use tokio::sync::{Mutex, mpsc};
use tonic::{Code, Status};
use tracing::warn;

use crate::model::{
    HealthyStatus, InstanceStatus, Namespace, Service, ServiceEvent, ServiceEventType, ServiceKey, ServiceNode,
    ServiceSubscriptionKey,
};

/// Bound on the Event Sync Worker's inbound queue. Enqueue never blocks;
/// once full, new tasks are dropped (the cache stays the source of truth,
/// see the spec's sync-worker overflow open question).
const SYNC_QUEUE_CAPACITY: usize = 4096;

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn new_opaque_token() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Fields a caller supplies when registering or updating service metadata.
#[derive(Clone, Debug, Default)]
pub struct ServiceMeta {
    pub protocol: String,
    pub version: String,
    pub description: String,
    pub load_balance_strategy: String,
    pub protect_threshold: f32,
    pub metadata: HashMap<String, String>,
    pub tags: Vec<String>,
}

/// Fields a caller supplies when registering or reconnecting a node.
#[derive(Clone, Debug, Default)]
pub struct NodeInput {
    pub node_id: String,
    pub host: String,
    pub port: u16,
    pub weight: f64,
    pub instance_status: InstanceStatus,
    pub metadata: HashMap<String, String>,
    pub ephemeral: bool,
}

/// Result of `register_node`/`register_service`: the node's identity and
/// whether it was newly created or updated in place.
#[derive(Clone, Debug)]
pub struct RegisterOutcome {
    pub node_id: String,
    pub reconnected: bool,
}

#[derive(Debug)]
enum SyncTask {
    UpsertService(ServiceStorageData),
    DeleteService(ServiceKey),
    UpsertNode(NodeStorageData),
    DeleteNode(String),
    AppendEvent(ServiceEventStorageData),
}

fn service_storage_data(svc: &Service) -> ServiceStorageData {
    ServiceStorageData {
        tenant_id: svc.key.tenant_id.clone(),
        namespace_id: svc.key.namespace_id.clone(),
        group_name: svc.key.group_name.clone(),
        service_name: svc.key.service_name.clone(),
        protocol: svc.protocol.clone(),
        version: svc.version.clone(),
        description: svc.description.clone(),
        load_balance_strategy: svc.load_balance_strategy.clone(),
        protect_threshold: svc.protect_threshold,
        metadata: serde_json::to_string(&svc.metadata).unwrap_or_default(),
        tags: serde_json::to_string(&svc.tags).unwrap_or_default(),
        service_version: svc.service_version,
        active_flag: svc.active_flag,
        add_time: svc.add_time,
        add_who: svc.add_who.clone(),
        edit_time: svc.edit_time,
        edit_who: svc.edit_who.clone(),
        opr_seq_flag: svc.opr_seq_flag.clone(),
    }
}

fn node_storage_data(node: &ServiceNode) -> NodeStorageData {
    NodeStorageData {
        node_id: node.node_id.clone(),
        tenant_id: node.service_key.tenant_id.clone(),
        namespace_id: node.service_key.namespace_id.clone(),
        group_name: node.service_key.group_name.clone(),
        service_name: node.service_key.service_name.clone(),
        host: node.host.clone(),
        port: node.port as i32,
        weight: node.weight,
        instance_status: format!("{:?}", node.instance_status).to_uppercase(),
        healthy_status: format!("{:?}", node.healthy_status).to_uppercase(),
        ephemeral: node.ephemeral,
        metadata: serde_json::to_string(&node.metadata).unwrap_or_default(),
        register_time: node.register_time,
        last_beat_time: node.last_beat_time,
        last_check_time: node.last_check_time,
    }
}

fn event_storage_data(event_type: ServiceEventType, key: &ServiceKey, node_id: &str) -> ServiceEventStorageData {
    ServiceEventStorageData {
        event_type: format!("{event_type:?}"),
        tenant_id: key.tenant_id.clone(),
        namespace_id: key.namespace_id.clone(),
        group_name: key.group_name.clone(),
        service_name: key.service_name.clone(),
        node_id: node_id.to_string(),
        created_time: now_millis(),
    }
}

/// Tenant→namespace→group→service→nodes tree plus the global `nodeId`
/// index. Source of truth for every read; writes are serialized per
/// service via the per-entry `Mutex`.
pub struct RegistryCache {
    namespaces: DashMap<(String, String), Namespace>,
    services: DashMap<ServiceKey, Arc<Mutex<Service>>>,
    node_index: DashMap<String, ServiceKey>,
}

impl RegistryCache {
    pub fn new() -> Self {
        Self {
            namespaces: DashMap::new(),
            services: DashMap::new(),
            node_index: DashMap::new(),
        }
    }

    /// Load the namespace table once at startup. Reload-on-change is out of
    /// scope; namespace validation never touches the DB after this call.
    pub async fn load_namespaces(&self, persistence: &dyn NamespacePersistence) -> anyhow::Result<()> {
        for ns in persistence.namespace_find_all().await? {
            self.namespaces.insert(
                (ns.tenant_id.clone(), ns.namespace_id.clone()),
                Namespace {
                    tenant_id: ns.tenant_id,
                    namespace_id: ns.namespace_id,
                    namespace_name: ns.namespace_name,
                    active_flag: ns.active_flag,
                },
            );
        }
        Ok(())
    }

    fn namespace_active(&self, tenant_id: &str, namespace_id: &str) -> bool {
        self.namespaces
            .get(&(tenant_id.to_string(), namespace_id.to_string()))
            .map(|ns| ns.active_flag)
            .unwrap_or(false)
    }

    fn service_entry(&self, key: &ServiceKey, editor: &str) -> Arc<Mutex<Service>> {
        self.services
            .entry(key.clone())
            .or_insert_with(|| {
                let mut svc = Service::new(key.clone(), now_millis(), new_opaque_token());
                svc.add_who = editor.to_string();
                svc.edit_who = editor.to_string();
                Arc::new(Mutex::new(svc))
            })
            .clone()
    }

    fn services_in(&self, tenant_id: &str, namespace_id: &str, group_name: &str) -> Vec<ServiceKey> {
        self.services
            .iter()
            .filter(|e| {
                let k = e.key();
                k.tenant_id == tenant_id
                    && k.namespace_id == namespace_id
                    && (group_name.is_empty() || k.group_name == group_name)
            })
            .map(|e| e.key().clone())
            .collect()
    }
}

impl Default for RegistryCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Business operations over the Registry Cache (C3). Holds the Service
/// Subscriber Hub (C4) and a handle to the Event Sync Worker (C2) queue.
pub struct NamingCore {
    cache: Arc<RegistryCache>,
    hub: Hub<ServiceSubscriptionKey>,
    sync_tx: mpsc::Sender<SyncTask>,
}

impl NamingCore {
    /// Spawns the Event Sync Worker task on the current Tokio runtime and
    /// returns the core bound to it. Callers are expected to have already
    /// called `cache.load_namespaces` before serving requests.
    pub fn new(cache: Arc<RegistryCache>, hub: Hub<ServiceSubscriptionKey>, persistence: Arc<dyn RegistryPersistence>) -> Self {
        let (sync_tx, sync_rx) = mpsc::channel(SYNC_QUEUE_CAPACITY);
        tokio::spawn(run_sync_worker(sync_rx, persistence));
        Self { cache, hub, sync_tx }
    }

    fn enqueue(&self, task: SyncTask) {
        if self.sync_tx.try_send(task).is_err() {
            warn!("event sync worker queue full, dropping durable-write task");
        }
    }

    fn validate_key(&self, key: &ServiceKey) -> Result<(), Status> {
        if key.namespace_id.is_empty() || key.service_name.is_empty() {
            return Err(Status::new(Code::InvalidArgument, "namespaceId and serviceName are required"));
        }
        if !self.cache.namespace_active(&key.tenant_id, &key.namespace_id) {
            return Err(Status::new(Code::PermissionDenied, "namespace unknown or disabled"));
        }
        Ok(())
    }

    fn publish(&self, key: &ServiceKey, event: ServiceEvent) {
        let hub = self.hub.clone();
        let svc_key = ServiceSubscriptionKey::Service(key.clone());
        let ns_key = ServiceSubscriptionKey::Namespace {
            tenant_id: key.tenant_id.clone(),
            namespace_id: key.namespace_id.clone(),
            group_name: key.group_name.clone(),
        };
        let ns_wildcard_key = ServiceSubscriptionKey::Namespace {
            tenant_id: key.tenant_id.clone(),
            namespace_id: key.namespace_id.clone(),
            group_name: String::new(),
        };
        let payload = event.build_server_push_payload();
        tokio::spawn(async move {
            hub.publish(&svc_key, payload.clone()).await;
            hub.publish(&ns_key, payload.clone()).await;
            if ns_wildcard_key.to_key_string() != ns_key.to_key_string() {
                hub.publish(&ns_wildcard_key, payload).await;
            }
        });
    }

    fn apply_mutable(service: &mut Service, meta: &ServiceMeta, editor: &str) {
        service.protocol = meta.protocol.clone();
        service.version = meta.version.clone();
        service.description = meta.description.clone();
        if !meta.load_balance_strategy.is_empty() {
            service.load_balance_strategy = meta.load_balance_strategy.clone();
        }
        service.protect_threshold = meta.protect_threshold;
        service.metadata = meta.metadata.clone();
        service.tags = meta.tags.clone();
        service.touch(now_millis(), editor, new_opaque_token());
    }

    /// RegisterService(service, optional node).
    pub async fn register_service(
        &self,
        key: ServiceKey,
        meta: ServiceMeta,
        node: Option<NodeInput>,
        editor: &str,
    ) -> Result<RegisterOutcome, Status> {
        self.validate_key(&key)?;

        let entry = self.cache.service_entry(&key, editor);
        let mut guard = entry.lock().await;
        Self::apply_mutable(&mut guard, &meta, editor);
        self.enqueue(SyncTask::UpsertService(service_storage_data(&guard)));

        let outcome = if let Some(node_input) = node {
            self.register_node_locked(&key, &mut guard, node_input, editor)
        } else {
            let event = ServiceEvent {
                event_type: ServiceEventType::ServiceInitialized,
                timestamp: now_millis(),
                namespace_id: key.namespace_id.clone(),
                group_name: key.group_name.clone(),
                service_name: key.service_name.clone(),
                service: Some(guard.clone()),
                nodes: guard.nodes.clone(),
                changed_node: None,
            };
            drop(guard);
            self.publish(&key, event);
            RegisterOutcome { node_id: String::new(), reconnected: false }
        };

        Ok(outcome)
    }

    /// RegisterNode(node). Three cases on the client-supplied `nodeId`: empty
    /// (fresh id), known (reconnect, update in place), unknown (accept as-is).
    pub async fn register_node(&self, key: ServiceKey, node: NodeInput, editor: &str) -> Result<RegisterOutcome, Status> {
        self.validate_key(&key)?;
        if node.host.is_empty() || node.port == 0 {
            return Err(Status::new(Code::InvalidArgument, "host and port are required"));
        }

        let entry = self.cache.service_entry(&key, editor);
        let mut guard = entry.lock().await;
        let outcome = self.register_node_locked(&key, &mut guard, node, editor);
        drop(guard);
        Ok(outcome)
    }

    /// Runs under the caller's held service lock; the event and enqueue
    /// always reflect the post-mutation state.
    fn register_node_locked(&self, key: &ServiceKey, service: &mut Service, input: NodeInput, _editor: &str) -> RegisterOutcome {
        let now = now_millis();

        // Node carries an id claimed by a different service: transfer it here
        // so the `nodeId -> ServiceKey` index stays a total, unique mapping.
        if !input.node_id.is_empty() {
            if let Some(prev_key) = self.cache.node_index.get(&input.node_id).map(|e| e.clone()) {
                if prev_key != *key {
                    if let Some(prev_entry) = self.cache.services.get(&prev_key) {
                        if let Ok(mut prev_guard) = prev_entry.try_lock() {
                            prev_guard.nodes.retain(|n| n.node_id != input.node_id);
                        }
                    }
                }
            }
        }

        let (node_id, reconnected, event_type) = if input.node_id.is_empty() {
            (uuid::Uuid::new_v4().simple().to_string(), false, ServiceEventType::NodeAdded)
        } else if let Some(existing) = service.nodes.iter_mut().find(|n| n.node_id == input.node_id) {
            let mut incoming = ServiceNode::new(input.node_id.clone(), key.clone(), input.host.clone(), input.port, now);
            incoming.weight = input.weight;
            incoming.instance_status = input.instance_status;
            incoming.metadata = input.metadata.clone();
            existing.apply_mutable(&incoming, now);
            (input.node_id.clone(), true, ServiceEventType::NodeUpdated)
        } else {
            (input.node_id.clone(), false, ServiceEventType::NodeAdded)
        };

        if !reconnected {
            let mut new_node = ServiceNode::new(node_id.clone(), key.clone(), input.host.clone(), input.port, now);
            new_node.weight = if input.weight > 0.0 { input.weight } else { 1.0 };
            new_node.instance_status = input.instance_status;
            new_node.metadata = input.metadata.clone();
            new_node.ephemeral = input.ephemeral;
            service.nodes.push(new_node);
        }

        self.cache.node_index.insert(node_id.clone(), key.clone());

        let changed_node = service.nodes.iter().find(|n| n.node_id == node_id).cloned();
        if let Some(ref node) = changed_node {
            self.enqueue(SyncTask::UpsertNode(node_storage_data(node)));
        }
        self.enqueue(SyncTask::AppendEvent(event_storage_data(event_type, key, &node_id)));

        let event = ServiceEvent {
            event_type,
            timestamp: now,
            namespace_id: key.namespace_id.clone(),
            group_name: key.group_name.clone(),
            service_name: key.service_name.clone(),
            service: Some(service.clone()),
            nodes: service.nodes.clone(),
            changed_node,
        };
        self.publish(key, event);

        RegisterOutcome { node_id, reconnected }
    }

    /// UnregisterNode(nodeId). O(1) index lookup; idempotent on an unknown id.
    pub async fn unregister_node(&self, node_id: &str) -> Result<(), Status> {
        let Some((_, key)) = self.cache.node_index.remove(node_id) else {
            return Ok(());
        };
        let Some(entry) = self.cache.services.get(&key).map(|e| e.clone()) else {
            return Ok(());
        };

        let mut guard = entry.lock().await;
        let before = guard.nodes.len();
        guard.nodes.retain(|n| n.node_id != node_id);
        if guard.nodes.len() == before {
            return Ok(());
        }

        self.enqueue(SyncTask::DeleteNode(node_id.to_string()));
        self.enqueue(SyncTask::AppendEvent(event_storage_data(ServiceEventType::NodeRemoved, &key, node_id)));

        let event = ServiceEvent {
            event_type: ServiceEventType::NodeRemoved,
            timestamp: now_millis(),
            namespace_id: key.namespace_id.clone(),
            group_name: key.group_name.clone(),
            service_name: key.service_name.clone(),
            service: Some(guard.clone()),
            nodes: guard.nodes.clone(),
            changed_node: None,
        };
        drop(guard);
        self.publish(&key, event);
        Ok(())
    }

    /// UnregisterService(key, optional nodeId). With `nodeId`, behaves as
    /// `unregister_node`; otherwise deletes the service and all its nodes.
    pub async fn unregister_service(&self, key: ServiceKey, node_id: Option<String>) -> Result<(), Status> {
        if let Some(node_id) = node_id {
            return self.unregister_node(&node_id).await;
        }
        self.validate_key(&key)?;

        let Some((_, entry)) = self.cache.services.remove(&key) else {
            return Ok(());
        };
        let guard = entry.lock().await;
        for node in &guard.nodes {
            self.cache.node_index.remove(&node.node_id);
        }
        drop(guard);

        self.enqueue(SyncTask::DeleteService(key.clone()));
        self.enqueue(SyncTask::AppendEvent(event_storage_data(ServiceEventType::ServiceRemoved, &key, "")));

        let event = ServiceEvent {
            event_type: ServiceEventType::ServiceRemoved,
            timestamp: now_millis(),
            namespace_id: key.namespace_id.clone(),
            group_name: key.group_name.clone(),
            service_name: key.service_name.clone(),
            service: None,
            nodes: Vec::new(),
            changed_node: None,
        };
        self.publish(&key, event);
        Ok(())
    }

    /// DiscoverNodes(key, healthyOnly). Read-only; an absent service yields
    /// an empty list, never an error.
    pub async fn discover_nodes(&self, key: &ServiceKey, healthy_only: bool) -> Result<Vec<ServiceNode>, Status> {
        self.validate_key(key)?;
        let Some(entry) = self.cache.services.get(key).map(|e| e.clone()) else {
            return Ok(Vec::new());
        };
        let guard = entry.lock().await;
        let nodes = if healthy_only {
            guard.nodes.iter().filter(|n| n.healthy_status == HealthyStatus::Healthy).cloned().collect()
        } else {
            guard.nodes.clone()
        };
        Ok(nodes)
    }

    /// Heartbeat(nodeId, optional full Service). Reconstructs the service
    /// and node when the payload is supplied and the node is unknown.
    pub async fn heartbeat(&self, node_id: &str, recovery: Option<(ServiceKey, ServiceMeta, NodeInput)>) -> Result<(), Status> {
        if let Some(key) = self.cache.node_index.get(node_id).map(|e| e.clone()) {
            let Some(entry) = self.cache.services.get(&key).map(|e| e.clone()) else {
                return Err(Status::new(Code::NotFound, "node has no parent service"));
            };
            let mut guard = entry.lock().await;
            let now = now_millis();
            return match guard.nodes.iter_mut().find(|n| n.node_id == node_id) {
                Some(node) => {
                    node.heartbeat(now);
                    let storage = node_storage_data(node);
                    self.enqueue(SyncTask::UpsertNode(storage));
                    Ok(())
                }
                None => Err(Status::new(Code::NotFound, "node not found for heartbeat")),
            };
        }

        let Some((key, meta, node_input)) = recovery else {
            return Err(Status::new(Code::NotFound, "unknown nodeId and no recovery payload"));
        };
        if !node_input.node_id.is_empty() && node_input.node_id != node_id {
            return Err(Status::new(Code::FailedPrecondition, "heartbeat payload carries a mismatched nodeId"));
        }
        self.validate_key(&key)?;
        let entry = self.cache.service_entry(&key, "heartbeat");

        let mut guard = entry.lock().await;
        // An existing service at this key whose identity already diverges
        // from the recovery payload (different protocol) is a conflict, not
        // a reconstruction target.
        if guard.service_version > 1 && !meta.protocol.is_empty() && guard.protocol != meta.protocol {
            return Err(Status::new(Code::FailedPrecondition, "service identity mismatch on heartbeat recovery"));
        }

        Self::apply_mutable(&mut guard, &meta, "heartbeat");
        self.enqueue(SyncTask::UpsertService(service_storage_data(&guard)));
        let mut input = node_input;
        input.node_id = node_id.to_string();
        self.register_node_locked(&key, &mut guard, input, "heartbeat");
        Ok(())
    }

    /// SubscribeServices(namespace, group, serviceNames[]). Returns the
    /// snapshot to send before live delivery begins.
    pub async fn subscribe_services(&self, connection_id: &str, client_ip: &str, keys: &[ServiceKey]) -> Vec<ServiceEvent> {
        let mut snapshot = Vec::with_capacity(keys.len());
        for key in keys {
            let sub_key = ServiceSubscriptionKey::Service(key.clone());
            self.hub.subscribe(
                connection_id,
                &sub_key,
                SubscriberInfo { client_ip: client_ip.to_string(), fingerprint: String::new() },
            );
            snapshot.push(self.snapshot_event(key).await);
        }
        snapshot
    }

    /// SubscribeNamespace(namespace, group). `group_name` empty means every
    /// group in the namespace.
    pub async fn subscribe_namespace(
        &self,
        connection_id: &str,
        client_ip: &str,
        tenant_id: &str,
        namespace_id: &str,
        group_name: &str,
    ) -> Vec<ServiceEvent> {
        let sub_key = ServiceSubscriptionKey::Namespace {
            tenant_id: tenant_id.to_string(),
            namespace_id: namespace_id.to_string(),
            group_name: group_name.to_string(),
        };
        self.hub.subscribe(
            connection_id,
            &sub_key,
            SubscriberInfo { client_ip: client_ip.to_string(), fingerprint: String::new() },
        );

        let keys = self.cache.services_in(tenant_id, namespace_id, group_name);
        let mut snapshot = Vec::with_capacity(keys.len());
        for key in &keys {
            snapshot.push(self.snapshot_event(key).await);
        }
        snapshot
    }

    async fn snapshot_event(&self, key: &ServiceKey) -> ServiceEvent {
        match self.cache.services.get(key).map(|e| e.clone()) {
            Some(entry) => {
                let guard = entry.lock().await;
                ServiceEvent {
                    event_type: ServiceEventType::ServiceInitialized,
                    timestamp: now_millis(),
                    namespace_id: key.namespace_id.clone(),
                    group_name: key.group_name.clone(),
                    service_name: key.service_name.clone(),
                    service: Some(guard.clone()),
                    nodes: guard.nodes.clone(),
                    changed_node: None,
                }
            }
            None => ServiceEvent {
                event_type: ServiceEventType::ServiceNotFound,
                timestamp: now_millis(),
                namespace_id: key.namespace_id.clone(),
                group_name: key.group_name.clone(),
                service_name: key.service_name.clone(),
                service: None,
                nodes: Vec::new(),
                changed_node: None,
            },
        }
    }

    pub fn unsubscribe_all(&self, connection_id: &str) {
        self.hub.unsubscribe_all(connection_id);
    }
}

/// Drains sync tasks and flushes them to the durable store. Failures are
/// logged and the task dropped; the cache is already the source of truth.
async fn run_sync_worker(mut rx: mpsc::Receiver<SyncTask>, persistence: Arc<dyn RegistryPersistence>) {
    while let Some(task) = rx.recv().await {
        let result = match &task {
            SyncTask::UpsertService(data) => persistence.service_upsert(data).await,
            SyncTask::DeleteService(key) => persistence
                .service_delete(&key.tenant_id, &key.namespace_id, &key.group_name, &key.service_name)
                .await
                .map(|_| ()),
            SyncTask::UpsertNode(data) => persistence.node_upsert(data).await,
            SyncTask::DeleteNode(node_id) => persistence.node_delete(node_id).await.map(|_| ()),
            SyncTask::AppendEvent(data) => persistence.service_event_append(data).await,
        };
        if let Err(err) = result {
            warn!(error = %err, ?task, "event sync worker failed to flush, will not be retried this cycle");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_namespace(tenant_id: &str, namespace_id: &str) -> Namespace {
        Namespace {
            tenant_id: tenant_id.to_string(),
            namespace_id: namespace_id.to_string(),
            namespace_name: namespace_id.to_string(),
            active_flag: true,
        }
    }

    fn active_cache() -> Arc<RegistryCache> {
        let cache = RegistryCache::new();
        cache
            .namespaces
            .insert(("default".to_string(), "public".to_string()), test_namespace("default", "public"));
        Arc::new(cache)
    }

    #[test]
    fn namespace_check_rejects_unknown() {
        let cache = active_cache();
        assert!(!cache.namespace_active("default", "unknown"));
        assert!(cache.namespace_active("default", "public"));
    }

    #[test]
    fn service_entry_is_created_once() {
        let cache = active_cache();
        let key = ServiceKey::new("default", "public", "DEFAULT_GROUP", "orders");
        let a = cache.service_entry(&key, "tester");
        let b = cache.service_entry(&key, "tester");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn services_in_filters_by_namespace_and_group() {
        let cache = active_cache();
        let key = ServiceKey::new("default", "public", "DEFAULT_GROUP", "orders");
        cache.service_entry(&key, "tester");
        let matches = cache.services_in("default", "public", "DEFAULT_GROUP");
        assert_eq!(matches, vec![key]);
        assert!(cache.services_in("default", "public", "OTHER_GROUP").is_empty());
    }
}
