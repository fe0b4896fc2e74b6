//! The single `Connect` gRPC listener (C8): one bidirectional stream per
//! client multiplexing every registry/config operation and every server
//! push. TLS, keepalive, and concurrency knobs come from the injected
//! `rcenter_core::Configuration` ("InstanceConfig provider", spec §6).

use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use futures::{FutureExt, Stream};
use rcenter_api::grpc::Payload;
use rcenter_api::grpc::request_stream_server::{RequestStream, RequestStreamServer};
use rcenter_api::remote::ResponseTrait;
use rcenter_core::{Connection, GrpcClient, context_interceptor};
use rcenter_server_common::AppState;
use tokio::sync::{broadcast, mpsc};
use tokio_stream::wrappers::ReceiverStream;
use tonic::transport::{Identity, Server, ServerTlsConfig};
use tonic::{Request, Response, Status, Streaming};
use tracing::{error, info, warn};

use crate::dispatch::model::ErrorResponse;
use crate::dispatch::{self, SessionState};

/// Outbound channel depth per connection: one request's response plus
/// however many server pushes can queue before a slow subscriber starts
/// dropping events (see `Hub::publish`).
const OUTBOUND_CHANNEL_CAPACITY: usize = 1024;

type PayloadStream = Pin<Box<dyn Stream<Item = Result<Payload, Status>> + Send + 'static>>;

struct RequestStreamService {
    app: Arc<AppState>,
}

#[tonic::async_trait]
impl RequestStream for RequestStreamService {
    type ConnectStream = PayloadStream;

    async fn connect(&self, request: Request<Streaming<Payload>>) -> Result<Response<Self::ConnectStream>, Status> {
        let connection = request.extensions().get::<Connection>().cloned().unwrap_or_default();
        let connection_id = connection.meta_info.connection_id.clone();
        let client_ip = connection.meta_info.remote_ip.clone();

        let (tx, rx) = mpsc::channel(OUTBOUND_CHANNEL_CAPACITY);
        self.app.connections.register(&connection_id, GrpcClient::new(connection, tx.clone()));
        info!(connection_id = %connection_id, client_ip = %client_ip, "connection established");

        let app = self.app.clone();
        let session = Arc::new(SessionState::new(connection_id.clone(), client_ip));
        let mut inbound = request.into_inner();

        tokio::spawn(async move {
            loop {
                match inbound.message().await {
                    Ok(Some(payload)) => {
                        let response = std::panic::AssertUnwindSafe(dispatch::run_pipeline(&app, &session, payload))
                            .catch_unwind()
                            .await
                            .unwrap_or_else(|_| {
                                error!(connection_id = %session.connection_id, "request pipeline panicked, recovering");
                                ErrorResponse::from_status(&Status::internal("internal server error")).build_payload()
                            });

                        if tx.send(Ok(response)).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(status) => {
                        warn!(connection_id = %session.connection_id, error = %status, "stream error, closing connection");
                        break;
                    }
                }
            }

            dispatch::cleanup_session(&app, &session).await;
            info!(connection_id = %session.connection_id, "connection closed");
        });

        let out_stream = ReceiverStream::new(rx);
        Ok(Response::new(Box::pin(out_stream) as PayloadStream))
    }
}

pub struct GrpcServerHandle {
    join: tokio::task::JoinHandle<Result<(), tonic::transport::Error>>,
    pub addr: SocketAddr,
}

impl GrpcServerHandle {
    /// Wait for the server task to exit (normally driven by the shutdown
    /// signal passed to `start_grpc_server`).
    pub async fn join(self) -> anyhow::Result<()> {
        self.join.await??;
        Ok(())
    }
}

async fn load_tls(app: &AppState) -> anyhow::Result<ServerTlsConfig> {
    let cert_path = app
        .instance_config
        .cert_path()
        .ok_or_else(|| anyhow::anyhow!("enableTls is set but certPath is missing"))?;
    let key_path = app
        .instance_config
        .key_path()
        .ok_or_else(|| anyhow::anyhow!("enableTls is set but keyPath is missing"))?;

    let cert = tokio::fs::read(&cert_path).await?;
    let key = tokio::fs::read(&key_path).await?;
    let identity = Identity::from_pem(cert, key);
    Ok(ServerTlsConfig::new().identity(identity))
}

/// Binds the listener and serves until `shutdown_rx` fires. Runs on its own
/// task; callers get a handle back to join on graceful shutdown.
pub async fn start_grpc_server(app: Arc<AppState>, mut shutdown_rx: broadcast::Receiver<()>) -> anyhow::Result<GrpcServerHandle> {
    let addr: SocketAddr = format!("{}:{}", app.instance_config.listen_address(), app.instance_config.listen_port()).parse()?;

    let service = RequestStreamServer::with_interceptor(RequestStreamService { app: app.clone() }, context_interceptor);

    let mut builder = Server::builder()
        .tcp_keepalive(Some(Duration::from_millis(app.instance_config.keepalive_time_ms())))
        .http2_keepalive_timeout(Some(Duration::from_millis(app.instance_config.keepalive_timeout_ms())))
        .concurrency_limit_per_connection(app.instance_config.max_concurrent_streams() as usize)
        .initial_stream_window_size(Some(app.instance_config.read_buffer_size() as u32))
        .initial_connection_window_size(Some(app.instance_config.write_buffer_size() as u32));

    if app.instance_config.enable_tls() || app.instance_config.enable_mtls() {
        builder = builder.tls_config(load_tls(&app).await?)?;
    }

    info!(%addr, "starting gRPC listener");

    let join = tokio::spawn(async move {
        builder
            .add_service(service)
            .serve_with_shutdown(addr, async move {
                let _ = shutdown_rx.recv().await;
                info!("gRPC listener shutting down");
            })
            .await
    });

    Ok(GrpcServerHandle { join, addr })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outbound_channel_capacity_is_positive() {
        assert!(OUTBOUND_CHANNEL_CAPACITY > 0);
    }
}
