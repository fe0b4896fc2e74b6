//! Application state shared across the gRPC request dispatcher.

use std::sync::Arc;

use rcenter_config::ConfigCore;
use rcenter_core::{AuthChecker, ConnectionManager, IpPolicy};
use rcenter_naming::NamingCore;

use super::config::Configuration;
use super::server_status::ServerStatusManager;

/// Everything a request handler needs: the two domain cores, the connection
/// registry streams are pushed through, the Request Pipeline's (C9) policy
/// inputs, and server lifecycle state.
#[derive(Clone)]
pub struct AppState {
    pub configuration: Configuration,
    pub instance_config: Arc<rcenter_core::Configuration>,
    pub naming_core: Arc<NamingCore>,
    pub config_core: Arc<ConfigCore>,
    pub connections: Arc<ConnectionManager>,
    pub ip_policy: Arc<IpPolicy>,
    pub auth_checker: Arc<dyn AuthChecker>,
    pub server_status: Arc<ServerStatusManager>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("configuration", &self.configuration)
            .field("naming_core", &"<NamingCore>")
            .field("config_core", &"<ConfigCore>")
            .field("connections", &"<ConnectionManager>")
            .field("server_status", &self.server_status)
            .finish()
    }
}
