//! Rcenter Core - streaming infrastructure shared by the registry and
//! configuration cores.
//!
//! This crate provides:
//! - The connection registry and generic subscription hub (C4/C5 shared base)
//! - IP policy and authentication checks for the Request Pipeline (C9)
//! - Connection and instance configuration models

pub mod model;
pub mod service;

pub use model::{CertStorageType, Configuration, Connection, ConnectionMeta, GrpcClient, PageParam};
pub use service::{
    AuthChecker, AuthContext, ConnectionManager, Hub, IpPolicy, PushResult, StaticTokenAuthChecker,
    SubscriberInfo, SubscriptionIndex, SubscriptionKey, context_interceptor,
};

pub use rcenter_common::local_ip;
