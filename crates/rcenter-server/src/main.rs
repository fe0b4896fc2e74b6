//! Entry point for the Rcenter service registry & configuration center.
//!
//! Wires one external-database connection into the Registry Core (C6) and
//! Configuration Core (C7), starts the single `Connect` gRPC listener (C8),
//! and waits for a graceful shutdown signal.

mod dispatch;
mod startup;

use std::sync::Arc;

use clap::Parser;
use rcenter_config::{ConfigCore, NamespaceTable};
use rcenter_core::{AuthChecker, ConnectionManager, Hub, IpPolicy, StaticTokenAuthChecker};
use rcenter_naming::{NamingCore, RegistryCache};
use rcenter_persistence::{ConfigPersistence, ExternalDbPersistService, NamespacePersistence, RegistryPersistence};
use rcenter_server_common::model::config::CliArgs;
use rcenter_server_common::{AppState, Configuration, ServerStatusManager};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let (configuration, raw_config) = Configuration::load(&args.config)?;
    let instance_config = Arc::new(rcenter_core::Configuration::from_config(raw_config));

    let logging_config = startup::LoggingConfig::from_config(
        Some(configuration.log_dir.clone()),
        true,
        true,
        configuration.console_log_level.clone(),
    );
    let _logging_guard = startup::init_file_logging(&logging_config)?;

    info!("starting rcenter-server");

    let db = sea_orm::Database::connect(&configuration.database_url).await?;
    let persistence = Arc::new(ExternalDbPersistService::new(db));
    let registry_persistence: Arc<dyn RegistryPersistence> = persistence.clone();
    let namespace_persistence: Arc<dyn NamespacePersistence> = persistence.clone();
    let config_persistence: Arc<dyn ConfigPersistence> = persistence.clone();

    let connections = Arc::new(ConnectionManager::new());

    let registry_cache = Arc::new(RegistryCache::new());
    registry_cache.load_namespaces(namespace_persistence.as_ref()).await?;
    let naming_hub = Hub::new(connections.clone());
    let naming_core = Arc::new(NamingCore::new(registry_cache, naming_hub, registry_persistence));

    let namespaces = Arc::new(NamespaceTable::new());
    namespaces
        .load(namespace_persistence.as_ref())
        .await
        .map_err(|status| anyhow::anyhow!("namespace load failed: {status}"))?;
    let config_hub = Hub::new(connections.clone());
    let config_core = Arc::new(ConfigCore::new(config_persistence, namespaces, config_hub));

    let ip_policy = Arc::new(IpPolicy::new(&instance_config.ip_whitelist(), &instance_config.ip_blacklist()));
    let auth_checker: Arc<dyn AuthChecker> = Arc::new(StaticTokenAuthChecker { enabled: instance_config.enable_auth() });
    let server_status = Arc::new(ServerStatusManager::new());
    server_status.set_up();

    let app_state = Arc::new(AppState {
        configuration,
        instance_config,
        naming_core,
        config_core,
        connections,
        ip_policy,
        auth_checker,
        server_status: server_status.clone(),
    });

    let shutdown_signal = startup::wait_for_shutdown_signal().await;
    let grpc_handle = startup::start_grpc_server(app_state.clone(), shutdown_signal.subscribe()).await?;

    info!(addr = %grpc_handle.addr, "rcenter-server is up");
    grpc_handle.join().await?;

    server_status.set_down();
    info!("rcenter-server shutdown complete");
    Ok(())
}
