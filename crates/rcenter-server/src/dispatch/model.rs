//! Wire request/response shapes for every operation the session dispatch
//! loop (C8) routes by `Metadata.type`. Envelope conventions (the
//! `Request`/`Response` flatten, `RequestTrait`/`ResponseTrait`) are
//! `rcenter-api`'s; the domain fields are `rcenter-naming`'s and
//! `rcenter-config`'s own types reused directly rather than re-declared.

use std::collections::HashMap;

use rcenter_api::remote::{Request, RequestTrait, Response, ResponseTrait};
use rcenter_config::{ConfigChangeEvent, ConfigData, ConfigHistoryEntry, ConfigKey};
use rcenter_naming::{InstanceStatus, ServiceEvent, ServiceKey, ServiceNode};
use serde::{Deserialize, Serialize};

macro_rules! impl_request {
    ($ty:ident, $field:ident, $type_name:literal) => {
        impl RequestTrait for $ty {
            fn headers(&self) -> HashMap<String, String> {
                self.$field.headers()
            }

            fn request_type(&self) -> &'static str {
                $type_name
            }

            fn insert_headers(&mut self, headers: HashMap<String, String>) {
                self.$field.insert_headers(headers);
            }

            fn request_id(&self) -> String {
                self.$field.request_id()
            }
        }
    };
}

macro_rules! impl_response {
    ($ty:ident, $field:ident, $type_name:literal) => {
        impl ResponseTrait for $ty {
            fn response_type(&self) -> &'static str {
                $type_name
            }

            fn request_id(&mut self, request_id: String) {
                self.$field.request_id = request_id;
            }

            fn error_code(&self) -> i32 {
                self.$field.error_code
            }

            fn result_code(&self) -> i32 {
                self.$field.result_code
            }

            fn message(&self) -> String {
                self.$field.message.clone()
            }
        }
    };
}

// ---------------------------------------------------------------------
// Connection layer: HANDSHAKE, PING/PONG
// ---------------------------------------------------------------------

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandshakeRequest {
    #[serde(flatten)]
    pub request: Request,
    pub client_version: String,
    pub tenant: String,
    pub labels: HashMap<String, String>,
}
impl_request!(HandshakeRequest, request, "Handshake");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerHandshakeResponse {
    #[serde(flatten)]
    pub response: Response,
    pub connection_id: String,
    pub server_time: i64,
    pub recommended_heartbeat_seconds: u32,
    pub tenant_id: String,
}
impl_response!(ServerHandshakeResponse, response, "ServerHandshake");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PingRequest {
    #[serde(flatten)]
    pub request: Request,
}
impl_request!(PingRequest, request, "Ping");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PongResponse {
    #[serde(flatten)]
    pub response: Response,
}
impl_response!(PongResponse, response, "Pong");

// ---------------------------------------------------------------------
// Registry Core (C6) operations
// ---------------------------------------------------------------------

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInputWire {
    #[serde(default)]
    pub node_id: String,
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub instance_status: InstanceStatus,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    #[serde(default = "default_true")]
    pub ephemeral: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterServiceRequest {
    #[serde(flatten)]
    pub request: Request,
    #[serde(flatten)]
    pub key: ServiceKey,
    #[serde(default)]
    pub protocol: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub load_balance_strategy: String,
    #[serde(default)]
    pub protect_threshold: f32,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub node: Option<NodeInputWire>,
}
impl_request!(RegisterServiceRequest, request, "RegisterService");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOutcomeResponse {
    #[serde(flatten)]
    pub response: Response,
    pub node_id: String,
    pub reconnected: bool,
}
impl_response!(RegisterOutcomeResponse, response, "RegisterServiceResult");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterNodeRequest {
    #[serde(flatten)]
    pub request: Request,
    #[serde(flatten)]
    pub key: ServiceKey,
    #[serde(flatten)]
    pub node: NodeInputWire,
}
impl_request!(RegisterNodeRequest, request, "RegisterNode");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnregisterNodeRequest {
    #[serde(flatten)]
    pub request: Request,
    pub node_id: String,
}
impl_request!(UnregisterNodeRequest, request, "UnregisterNode");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnregisterServiceRequest {
    #[serde(flatten)]
    pub request: Request,
    #[serde(flatten)]
    pub key: ServiceKey,
    #[serde(default)]
    pub node_id: Option<String>,
}
impl_request!(UnregisterServiceRequest, request, "UnregisterService");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AckResponse {
    #[serde(flatten)]
    pub response: Response,
}
impl_response!(AckResponse, response, "Ack");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverNodesRequest {
    #[serde(flatten)]
    pub request: Request,
    #[serde(flatten)]
    pub key: ServiceKey,
    #[serde(default)]
    pub healthy_only: bool,
}
impl_request!(DiscoverNodesRequest, request, "DiscoverNodes");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverNodesResponse {
    #[serde(flatten)]
    pub response: Response,
    pub nodes: Vec<ServiceNode>,
}
impl_response!(DiscoverNodesResponse, response, "DiscoverNodesResult");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatRecoveryWire {
    #[serde(flatten)]
    pub key: ServiceKey,
    #[serde(default)]
    pub protocol: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub load_balance_strategy: String,
    #[serde(default)]
    pub protect_threshold: f32,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub node: NodeInputWire,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatRequest {
    #[serde(flatten)]
    pub request: Request,
    pub node_id: String,
    #[serde(default)]
    pub recovery: Option<HeartbeatRecoveryWire>,
}
impl_request!(HeartbeatRequest, request, "Heartbeat");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeServicesRequest {
    #[serde(flatten)]
    pub request: Request,
    pub keys: Vec<ServiceKey>,
}
impl_request!(SubscribeServicesRequest, request, "SubscribeServices");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEventsResponse {
    #[serde(flatten)]
    pub response: Response,
    pub events: Vec<ServiceEvent>,
}
impl_response!(ServiceEventsResponse, response, "SubscribeServicesResult");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeNamespaceRequest {
    #[serde(flatten)]
    pub request: Request,
    pub tenant_id: String,
    pub namespace_id: String,
    #[serde(default)]
    pub group_name: String,
}
impl_request!(SubscribeNamespaceRequest, request, "SubscribeNamespace");

// ---------------------------------------------------------------------
// Configuration Core (C7) operations
// ---------------------------------------------------------------------

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigRequest {
    #[serde(flatten)]
    pub request: Request,
    #[serde(flatten)]
    pub key: ConfigKey,
}
impl_request!(GetConfigRequest, request, "GetConfig");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigResponse {
    #[serde(flatten)]
    pub response: Response,
    pub config: Option<ConfigData>,
}
impl_response!(GetConfigResponse, response, "GetConfigResult");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveConfigRequest {
    #[serde(flatten)]
    pub request: Request,
    #[serde(flatten)]
    pub key: ConfigKey,
    pub content: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub changed_by: String,
    #[serde(default)]
    pub change_reason: String,
    #[serde(default)]
    pub description: String,
}
impl_request!(SaveConfigRequest, request, "SaveConfig");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDataResponse {
    #[serde(flatten)]
    pub response: Response,
    pub config: ConfigData,
}
impl_response!(ConfigDataResponse, response, "SaveConfigResult");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteConfigRequest {
    #[serde(flatten)]
    pub request: Request,
    #[serde(flatten)]
    pub key: ConfigKey,
}
impl_request!(DeleteConfigRequest, request, "DeleteConfig");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteConfigResponse {
    #[serde(flatten)]
    pub response: Response,
    pub deleted: bool,
}
impl_response!(DeleteConfigResponse, response, "DeleteConfigResult");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListConfigsRequest {
    #[serde(flatten)]
    pub request: Request,
    pub tenant_id: String,
    pub namespace_id: String,
    #[serde(default)]
    pub group_name: String,
}
impl_request!(ListConfigsRequest, request, "ListConfigs");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListConfigsResponse {
    #[serde(flatten)]
    pub response: Response,
    pub configs: Vec<ConfigData>,
}
impl_response!(ListConfigsResponse, response, "ListConfigsResult");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchConfigRequest {
    #[serde(flatten)]
    pub request: Request,
    pub keys: Vec<ConfigKey>,
}
impl_request!(WatchConfigRequest, request, "WatchConfig");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigEventsResponse {
    #[serde(flatten)]
    pub response: Response,
    pub events: Vec<ConfigChangeEvent>,
}
impl_response!(ConfigEventsResponse, response, "WatchConfigResult");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigHistoryRequest {
    #[serde(flatten)]
    pub request: Request,
    #[serde(flatten)]
    pub key: ConfigKey,
    #[serde(default = "default_history_limit")]
    pub limit: u64,
}

fn default_history_limit() -> u64 {
    20
}
impl_request!(GetConfigHistoryRequest, request, "GetConfigHistory");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigHistoryResponse {
    #[serde(flatten)]
    pub response: Response,
    pub history: Vec<ConfigHistoryEntry>,
}
impl_response!(ConfigHistoryResponse, response, "GetConfigHistoryResult");

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollbackConfigRequest {
    #[serde(flatten)]
    pub request: Request,
    #[serde(flatten)]
    pub key: ConfigKey,
    pub target_version: i64,
    #[serde(default)]
    pub changed_by: String,
    #[serde(default)]
    pub change_reason: String,
}
impl_request!(RollbackConfigRequest, request, "RollbackConfig");

// ---------------------------------------------------------------------
// Error envelope (spec §5: `ERROR{code, message}`)
// ---------------------------------------------------------------------

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[serde(flatten)]
    pub response: Response,
    pub code: String,
    pub message: String,
}
impl_response!(ErrorResponse, response, "Error");

impl ErrorResponse {
    pub fn from_status(status: &tonic::Status) -> Self {
        let response = Response {
            success: false,
            result_code: rcenter_api::remote::ResponseCode::Fail.code(),
            message: status.message().to_string(),
            ..Response::new()
        };
        Self {
            code: format!("{:?}", status.code()),
            message: status.message().to_string(),
            response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handshake_request_type_is_stable() {
        let req = HandshakeRequest::default();
        assert_eq!(req.request_type(), "Handshake");
    }

    #[test]
    fn error_response_carries_status_message() {
        let status = tonic::Status::not_found("no such service");
        let err = ErrorResponse::from_status(&status);
        assert_eq!(err.code, "NotFound");
        assert_eq!(err.message, "no such service");
    }
}
