//! Request Pipeline (C9): IP Policy -> Authentication -> Access Log ->
//! Handler, then routing by `Metadata.type` into the Registry Core (C6) or
//! Configuration Core (C7). Panic Recovery wraps the call to `run_pipeline`
//! at the call site (the per-payload read loop in `startup::grpc`), since
//! it has to catch panics from this whole pipeline, not just the handler.

use std::net::IpAddr;
use std::str::FromStr;

use rcenter_api::grpc::Payload;
use rcenter_api::remote::{RequestTrait, ResponseTrait};
use rcenter_naming::{NodeInput, ServiceKey, ServiceMeta};
use tonic::{Code, Status};
use tracing::{info, warn};

use rcenter_server_common::AppState;

use super::model::*;
use super::session::SessionState;

fn node_input(wire: NodeInputWire) -> NodeInput {
    NodeInput {
        node_id: wire.node_id,
        host: wire.host,
        port: wire.port,
        weight: wire.weight,
        instance_status: wire.instance_status,
        metadata: wire.metadata,
        ephemeral: wire.ephemeral,
    }
}

fn service_meta_from_request(
    protocol: String,
    version: String,
    description: String,
    load_balance_strategy: String,
    protect_threshold: f32,
    metadata: std::collections::HashMap<String, String>,
    tags: Vec<String>,
) -> ServiceMeta {
    ServiceMeta {
        protocol,
        version,
        description,
        load_balance_strategy,
        protect_threshold,
        metadata,
        tags,
    }
}

fn build_payload<R: ResponseTrait + serde::Serialize>(mut response: R, request_id: String) -> Payload {
    response.request_id(request_id);
    response.build_payload()
}

/// Full request pipeline: IP Policy, Authentication, Access Log, then the
/// handler routed by `Metadata.type`. Never panics; routing/handler errors
/// come back as an `ERROR` payload so the session loop always has something
/// to write to the stream.
pub async fn run_pipeline(app: &AppState, session: &SessionState, payload: Payload) -> Payload {
    session.touch();

    let message_type = payload.metadata.as_ref().map(|m| m.r#type.clone()).unwrap_or_default();

    if let Ok(ip) = IpAddr::from_str(&session.client_ip) {
        if !app.ip_policy.is_allowed(&ip) {
            warn!(connection_id = %session.connection_id, ip = %session.client_ip, "rejected by ip policy");
            return ErrorResponse::from_status(&Status::new(Code::PermissionDenied, "ip not allowed")).build_payload();
        }
    }

    let headers = payload.metadata.as_ref().map(|m| m.headers.clone()).unwrap_or_default();
    let auth = app.auth_checker.check(&headers);
    if !auth.passed() {
        warn!(connection_id = %session.connection_id, "rejected by authentication");
        return ErrorResponse::from_status(&Status::new(Code::Unauthenticated, "authentication failed")).build_payload();
    }

    info!(connection_id = %session.connection_id, message_type = %message_type, "handling request");

    match route(app, session, &message_type, &payload).await {
        Ok(response) => response,
        Err(status) => ErrorResponse::from_status(&status).build_payload(),
    }
}

async fn route(app: &AppState, session: &SessionState, message_type: &str, payload: &Payload) -> Result<Payload, Status> {
    match message_type {
        "Handshake" => handshake(app, session, payload),
        "Ping" => ping(payload),
        "RegisterService" => register_service(app, session, payload).await,
        "RegisterNode" => register_node(app, session, payload).await,
        "UnregisterNode" => unregister_node(app, session, payload).await,
        "UnregisterService" => unregister_service(app, session, payload).await,
        "DiscoverNodes" => discover_nodes(app, payload).await,
        "Heartbeat" => heartbeat(app, session, payload).await,
        "SubscribeServices" => subscribe_services(app, session, payload).await,
        "SubscribeNamespace" => subscribe_namespace(app, session, payload).await,
        "GetConfig" => get_config(app, payload).await,
        "SaveConfig" => save_config(app, payload).await,
        "DeleteConfig" => delete_config(app, payload).await,
        "ListConfigs" => list_configs(app, payload).await,
        "WatchConfig" => watch_config(app, session, payload).await,
        "GetConfigHistory" => get_config_history(app, payload).await,
        "RollbackConfig" => rollback_config(app, payload).await,
        "PushAckRequest" => Ok(build_payload(AckResponse::default(), String::new())),
        other => Err(Status::new(Code::InvalidArgument, format!("unknown message type: {other}"))),
    }
}

fn handshake(app: &AppState, session: &SessionState, payload: &Payload) -> Result<Payload, Status> {
    let req = HandshakeRequest::from_payload(payload);
    session.set_tenant(req.tenant.clone());
    let response = ServerHandshakeResponse {
        connection_id: session.connection_id.clone(),
        server_time: chrono::Utc::now().timestamp_millis(),
        recommended_heartbeat_seconds: app.instance_config.recommended_heartbeat_seconds(),
        tenant_id: req.tenant.clone(),
        ..Default::default()
    };
    Ok(build_payload(response, req.request_id()))
}

fn ping(payload: &Payload) -> Result<Payload, Status> {
    let req = PingRequest::from_payload(payload);
    Ok(build_payload(PongResponse::default(), req.request_id()))
}

async fn register_service(app: &AppState, session: &SessionState, payload: &Payload) -> Result<Payload, Status> {
    let req = RegisterServiceRequest::from_payload(payload);
    let request_id = req.request_id();
    let meta = service_meta_from_request(
        req.protocol,
        req.version,
        req.description,
        req.load_balance_strategy,
        req.protect_threshold,
        req.metadata,
        req.tags,
    );
    let node = req.node.map(node_input);
    let outcome = app.naming_core.register_service(req.key, meta, node, &session.tenant_id()).await?;
    session.remember_node(outcome.node_id.clone());
    Ok(build_payload(
        RegisterOutcomeResponse { node_id: outcome.node_id, reconnected: outcome.reconnected, ..Default::default() },
        request_id,
    ))
}

async fn register_node(app: &AppState, session: &SessionState, payload: &Payload) -> Result<Payload, Status> {
    let req = RegisterNodeRequest::from_payload(payload);
    let request_id = req.request_id();
    let outcome = app
        .naming_core
        .register_node(req.key, node_input(req.node), &session.tenant_id())
        .await?;
    session.remember_node(outcome.node_id.clone());
    Ok(build_payload(
        RegisterOutcomeResponse { node_id: outcome.node_id, reconnected: outcome.reconnected, ..Default::default() },
        request_id,
    ))
}

async fn unregister_node(app: &AppState, session: &SessionState, payload: &Payload) -> Result<Payload, Status> {
    let req = UnregisterNodeRequest::from_payload(payload);
    let request_id = req.request_id();
    app.naming_core.unregister_node(&req.node_id).await?;
    session.forget_node(&req.node_id);
    Ok(build_payload(AckResponse::default(), request_id))
}

async fn unregister_service(app: &AppState, session: &SessionState, payload: &Payload) -> Result<Payload, Status> {
    let req = UnregisterServiceRequest::from_payload(payload);
    let request_id = req.request_id();
    if let Some(node_id) = &req.node_id {
        session.forget_node(node_id);
    }
    app.naming_core.unregister_service(req.key, req.node_id).await?;
    Ok(build_payload(AckResponse::default(), request_id))
}

async fn discover_nodes(app: &AppState, payload: &Payload) -> Result<Payload, Status> {
    let req = DiscoverNodesRequest::from_payload(payload);
    let request_id = req.request_id();
    let nodes = app.naming_core.discover_nodes(&req.key, req.healthy_only).await?;
    Ok(build_payload(DiscoverNodesResponse { nodes, ..Default::default() }, request_id))
}

async fn heartbeat(app: &AppState, session: &SessionState, payload: &Payload) -> Result<Payload, Status> {
    let req = HeartbeatRequest::from_payload(payload);
    let request_id = req.request_id();
    let recovery = req.recovery.map(|r| {
        let key: ServiceKey = r.key;
        let meta = service_meta_from_request(
            r.protocol,
            r.version,
            r.description,
            r.load_balance_strategy,
            r.protect_threshold,
            r.metadata,
            r.tags,
        );
        (key, meta, node_input(r.node))
    });
    app.naming_core.heartbeat(&req.node_id, recovery).await?;
    session.remember_node(req.node_id.clone());
    Ok(build_payload(AckResponse::default(), request_id))
}

async fn subscribe_services(app: &AppState, session: &SessionState, payload: &Payload) -> Result<Payload, Status> {
    let req = SubscribeServicesRequest::from_payload(payload);
    let request_id = req.request_id();
    let events = app
        .naming_core
        .subscribe_services(&session.connection_id, &session.client_ip, &req.keys)
        .await;
    Ok(build_payload(ServiceEventsResponse { events, ..Default::default() }, request_id))
}

async fn subscribe_namespace(app: &AppState, session: &SessionState, payload: &Payload) -> Result<Payload, Status> {
    let req = SubscribeNamespaceRequest::from_payload(payload);
    let request_id = req.request_id();
    let events = app
        .naming_core
        .subscribe_namespace(&session.connection_id, &session.client_ip, &req.tenant_id, &req.namespace_id, &req.group_name)
        .await;
    Ok(build_payload(ServiceEventsResponse { events, ..Default::default() }, request_id))
}

async fn get_config(app: &AppState, payload: &Payload) -> Result<Payload, Status> {
    let req = GetConfigRequest::from_payload(payload);
    let request_id = req.request_id();
    let config = app.config_core.get_config(&req.key).await?;
    Ok(build_payload(GetConfigResponse { config, ..Default::default() }, request_id))
}

async fn save_config(app: &AppState, payload: &Payload) -> Result<Payload, Status> {
    let req = SaveConfigRequest::from_payload(payload);
    let request_id = req.request_id();
    let config = app
        .config_core
        .save_config(req.key, req.content, req.content_type, req.changed_by, req.change_reason, req.description)
        .await?;
    Ok(build_payload(ConfigDataResponse { config, ..Default::default() }, request_id))
}

async fn delete_config(app: &AppState, payload: &Payload) -> Result<Payload, Status> {
    let req = DeleteConfigRequest::from_payload(payload);
    let request_id = req.request_id();
    let deleted = app.config_core.delete_config(&req.key).await?;
    Ok(build_payload(DeleteConfigResponse { deleted, ..Default::default() }, request_id))
}

async fn list_configs(app: &AppState, payload: &Payload) -> Result<Payload, Status> {
    let req = ListConfigsRequest::from_payload(payload);
    let request_id = req.request_id();
    let configs = app.config_core.list_configs(&req.tenant_id, &req.namespace_id, &req.group_name).await?;
    Ok(build_payload(ListConfigsResponse { configs, ..Default::default() }, request_id))
}

async fn watch_config(app: &AppState, session: &SessionState, payload: &Payload) -> Result<Payload, Status> {
    let req = WatchConfigRequest::from_payload(payload);
    let request_id = req.request_id();
    let events = app
        .config_core
        .watch_config(&session.connection_id, &session.client_ip, &req.keys)
        .await?;
    Ok(build_payload(ConfigEventsResponse { events, ..Default::default() }, request_id))
}

async fn get_config_history(app: &AppState, payload: &Payload) -> Result<Payload, Status> {
    let req = GetConfigHistoryRequest::from_payload(payload);
    let request_id = req.request_id();
    let history = app.config_core.get_config_history(&req.key, req.limit).await?;
    Ok(build_payload(ConfigHistoryResponse { history, ..Default::default() }, request_id))
}

async fn rollback_config(app: &AppState, payload: &Payload) -> Result<Payload, Status> {
    let req = RollbackConfigRequest::from_payload(payload);
    let request_id = req.request_id();
    let config = app
        .config_core
        .rollback_config(req.key, req.target_version, req.changed_by, req.change_reason)
        .await?;
    Ok(build_payload(ConfigDataResponse { config, ..Default::default() }, request_id))
}

/// Cleanup-on-disconnect: unregister every node this connection registered,
/// and drop it from both hubs. Idempotent, safe to call more than once.
pub async fn cleanup_session(app: &AppState, session: &SessionState) {
    for node_id in session.registered_node_ids() {
        if let Err(err) = app.naming_core.unregister_node(&node_id).await {
            warn!(connection_id = %session.connection_id, node_id, error = %err, "failed to unregister node on disconnect");
        }
    }
    app.naming_core.unsubscribe_all(&session.connection_id);
    app.config_core.unsubscribe_all(&session.connection_id);
    app.connections.unregister(&session.connection_id);
}
