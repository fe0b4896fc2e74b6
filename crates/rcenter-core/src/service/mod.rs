//! Streaming infrastructure shared by the registry and configuration cores:
//! connection registry, generic subscription hubs, auth/IP policy checks.

pub mod auth;
pub mod hub;
pub mod ip_policy;
pub mod remote;

pub use auth::{AuthChecker, AuthContext, StaticTokenAuthChecker};
pub use hub::{Hub, SubscriberInfo, SubscriptionIndex, SubscriptionKey};
pub use ip_policy::IpPolicy;
pub use remote::{ConnectionManager, PushResult, context_interceptor};
