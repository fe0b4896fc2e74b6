//! Registry Core (C6) data model: services, their nodes, and the namespace
//! table they are validated against.
//!
//! Field names and the `oprSeqFlag`/audit-field convention mirror the
//! config-side `ConfigData` model so both cores read the same way.

use std::collections::HashMap;

use rcenter_api::remote::RequestTrait;
use rcenter_core::SubscriptionKey;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CLUSTER_NAME: &str = "DEFAULT";

/// Node lifecycle status as reported by the owner (register/heartbeat), as
/// opposed to `HealthyStatus` which the server derives from heartbeat recency.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InstanceStatus {
    #[default]
    Up,
    Down,
    Starting,
    OutOfService,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthyStatus {
    Healthy,
    Unhealthy,
    #[default]
    Unknown,
}

/// `(tenantId, namespaceId, activeFlag)` row loaded into the registry cache
/// at startup. Namespace validity checks never touch the DB on the hot path.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
    pub tenant_id: String,
    pub namespace_id: String,
    pub namespace_name: String,
    pub active_flag: bool,
}

/// Fully-qualified identity of a service: the key every Registry Core
/// operation addresses by.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceKey {
    pub tenant_id: String,
    pub namespace_id: String,
    pub group_name: String,
    pub service_name: String,
}

impl ServiceKey {
    pub fn new(
        tenant_id: impl Into<String>,
        namespace_id: impl Into<String>,
        group_name: impl Into<String>,
        service_name: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            namespace_id: namespace_id.into(),
            group_name: group_name.into(),
            service_name: service_name.into(),
        }
    }
}

/// A registered service and its current node set.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(flatten)]
    pub key: ServiceKey,
    pub protocol: String,
    pub version: String,
    pub description: String,
    pub load_balance_strategy: String,
    /// Portion of nodes allowed to be unhealthy before protect-threshold
    /// kicks in client-side; range [0, 1].
    pub protect_threshold: f32,
    pub metadata: HashMap<String, String>,
    pub tags: Vec<String>,
    /// Monotonically non-decreasing, bumped on every mutation.
    pub service_version: i64,
    pub active_flag: bool,
    pub add_time: i64,
    pub add_who: String,
    pub edit_time: i64,
    pub edit_who: String,
    /// 32-char opaque token regenerated on every mutation.
    pub opr_seq_flag: String,
    #[serde(skip)]
    pub nodes: Vec<ServiceNode>,
}

impl Service {
    pub fn new(key: ServiceKey, now_millis: i64, opr_seq_flag: String) -> Self {
        Self {
            key,
            load_balance_strategy: "WEIGHT_RANDOM".to_string(),
            protect_threshold: 0.0,
            service_version: 1,
            active_flag: true,
            add_time: now_millis,
            edit_time: now_millis,
            opr_seq_flag,
            ..Default::default()
        }
    }

    pub fn healthy_nodes(&self) -> Vec<&ServiceNode> {
        self.nodes
            .iter()
            .filter(|n| n.healthy_status == HealthyStatus::Healthy)
            .collect()
    }

    pub fn touch(&mut self, now_millis: i64, editor: &str, opr_seq_flag: String) {
        self.service_version += 1;
        self.edit_time = now_millis;
        self.edit_who = editor.to_string();
        self.opr_seq_flag = opr_seq_flag;
    }
}

/// A single service instance, identified by a globally unique `nodeId`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceNode {
    pub node_id: String,
    #[serde(flatten)]
    pub service_key: ServiceKey,
    pub host: String,
    pub port: u16,
    pub weight: f64,
    pub instance_status: InstanceStatus,
    pub healthy_status: HealthyStatus,
    pub ephemeral: bool,
    pub metadata: HashMap<String, String>,
    pub register_time: i64,
    pub last_beat_time: i64,
    pub last_check_time: i64,
}

impl ServiceNode {
    pub fn new(node_id: String, service_key: ServiceKey, host: String, port: u16, now_millis: i64) -> Self {
        Self {
            node_id,
            service_key,
            host,
            port,
            weight: 1.0,
            instance_status: InstanceStatus::Up,
            healthy_status: HealthyStatus::Healthy,
            ephemeral: true,
            metadata: HashMap::new(),
            register_time: now_millis,
            last_beat_time: now_millis,
            last_check_time: now_millis,
        }
    }

    /// Apply the mutable fields a reconnect/heartbeat-with-node carries,
    /// leaving identity (`nodeId`, register_time) untouched.
    pub fn apply_mutable(&mut self, other: &ServiceNode, now_millis: i64) {
        self.host = other.host.clone();
        self.port = other.port;
        self.weight = if other.weight > 0.0 { other.weight } else { 1.0 };
        self.instance_status = other.instance_status;
        self.metadata = other.metadata.clone();
        self.last_beat_time = now_millis;
        self.healthy_status = HealthyStatus::Healthy;
    }

    pub fn heartbeat(&mut self, now_millis: i64) {
        self.last_beat_time = now_millis;
        self.last_check_time = now_millis;
        self.healthy_status = HealthyStatus::Healthy;
    }
}

/// Key the Service Subscriber Hub (C4) indexes subscriptions by: either a
/// single service, or every service in a namespace (optionally narrowed to
/// one group; empty group means "every group").
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ServiceSubscriptionKey {
    Service(ServiceKey),
    Namespace {
        tenant_id: String,
        namespace_id: String,
        group_name: String,
    },
}

impl SubscriptionKey for ServiceSubscriptionKey {
    fn to_key_string(&self) -> String {
        match self {
            ServiceSubscriptionKey::Service(key) => format!(
                "svc::{}@@{}@@{}@@{}",
                key.tenant_id, key.namespace_id, key.group_name, key.service_name
            ),
            ServiceSubscriptionKey::Namespace {
                tenant_id,
                namespace_id,
                group_name,
            } => format!("ns::{tenant_id}@@{namespace_id}@@{group_name}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceEventType {
    ServiceInitialized,
    ServiceNotFound,
    ServiceRemoved,
    NodeAdded,
    NodeUpdated,
    NodeRemoved,
}

/// Wire envelope pushed to Service Subscriber Hub (C4) subscribers. Always
/// carries the authoritative post-mutation state, never a diff.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEvent {
    pub event_type: ServiceEventType,
    pub timestamp: i64,
    pub namespace_id: String,
    pub group_name: String,
    pub service_name: String,
    pub service: Option<Service>,
    pub nodes: Vec<ServiceNode>,
    pub changed_node: Option<ServiceNode>,
}

/// Server-initiated push, same envelope convention as a client request: a
/// fresh `requestId` the client's `PushAckRequest` echoes back.
impl RequestTrait for ServiceEvent {
    fn headers(&self) -> HashMap<String, String> {
        HashMap::new()
    }

    fn request_type(&self) -> &'static str {
        "ServiceChangeEvent"
    }

    fn insert_headers(&mut self, _headers: HashMap<String, String>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_key_identifies_full_path() {
        let key = ServiceKey::new("default", "public", "DEFAULT_GROUP", "orders");
        assert_eq!(key.service_name, "orders");
    }

    #[test]
    fn new_service_starts_at_version_one() {
        let svc = Service::new(
            ServiceKey::new("default", "public", "DEFAULT_GROUP", "orders"),
            1000,
            "abc".to_string(),
        );
        assert_eq!(svc.service_version, 1);
        assert!(svc.active_flag);
    }

    #[test]
    fn touch_bumps_version_and_stamps() {
        let mut svc = Service::new(
            ServiceKey::new("default", "public", "DEFAULT_GROUP", "orders"),
            1000,
            "abc".to_string(),
        );
        svc.touch(2000, "admin", "def".to_string());
        assert_eq!(svc.service_version, 2);
        assert_eq!(svc.edit_time, 2000);
        assert_eq!(svc.opr_seq_flag, "def");
    }

    #[test]
    fn apply_mutable_preserves_identity() {
        let key = ServiceKey::new("default", "public", "DEFAULT_GROUP", "orders");
        let mut node = ServiceNode::new("n1".to_string(), key.clone(), "10.0.0.1".to_string(), 8080, 1000);
        let incoming = ServiceNode::new("n1".to_string(), key, "10.0.0.2".to_string(), 9090, 2000);
        node.apply_mutable(&incoming, 3000);
        assert_eq!(node.node_id, "n1");
        assert_eq!(node.register_time, 1000);
        assert_eq!(node.host, "10.0.0.2");
        assert_eq!(node.port, 9090);
        assert_eq!(node.last_beat_time, 3000);
    }

    #[test]
    fn healthy_nodes_filters_by_status() {
        let key = ServiceKey::new("default", "public", "DEFAULT_GROUP", "orders");
        let mut svc = Service::new(key.clone(), 1000, "abc".to_string());
        let mut healthy = ServiceNode::new("n1".to_string(), key.clone(), "10.0.0.1".to_string(), 8080, 1000);
        healthy.healthy_status = HealthyStatus::Healthy;
        let mut unhealthy = ServiceNode::new("n2".to_string(), key, "10.0.0.2".to_string(), 8081, 1000);
        unhealthy.healthy_status = HealthyStatus::Unhealthy;
        svc.nodes = vec![healthy, unhealthy];
        assert_eq!(svc.healthy_nodes().len(), 1);
    }
}
