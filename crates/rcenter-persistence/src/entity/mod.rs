//! SeaORM entity definitions for the registry and config tables.

pub mod config_history;
pub mod config_info;
pub mod instance_info;
pub mod namespace_info;
pub mod service_event;
pub mod service_info;

pub mod prelude {
    pub use super::config_history::Entity as ConfigHistory;
    pub use super::config_info::Entity as ConfigInfo;
    pub use super::instance_info::Entity as InstanceInfo;
    pub use super::namespace_info::Entity as NamespaceInfo;
    pub use super::service_event::Entity as ServiceEvent;
    pub use super::service_info::Entity as ServiceInfo;
}
