//! Rcenter Naming - Registry Core (service discovery)
//!
//! This crate provides:
//! - The Registry Cache (C3): tenant/namespace/group/service tree plus the
//!   global `nodeId` index
//! - The Registry Core (C6): register/unregister/heartbeat/discover/subscribe

pub mod model;
pub mod service;

pub use model::{
    HealthyStatus, InstanceStatus, Namespace, Service, ServiceEvent, ServiceEventType, ServiceKey, ServiceNode,
    ServiceSubscriptionKey, DEFAULT_CLUSTER_NAME,
};
pub use service::{NamingCore, NodeInput, RegisterOutcome, RegistryCache, ServiceMeta};
