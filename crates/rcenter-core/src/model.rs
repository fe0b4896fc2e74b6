// Core data models and structures
// This file defines fundamental data structures used throughout the application

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use tokio::sync::mpsc::Sender;
use tonic::Status;

use rcenter_api::{
    grpc::Payload,
    model::{APP_CONN_PREFIX, APPNAME, CLIENT_VERSION_KEY},
};

// Label source constants
pub const LABEL_SOURCE: &str = "source";
pub const LABEL_SOURCE_SDK: &str = "sdk";
pub const LABEL_SOURCE_CLUSTER: &str = "cluster";

// Pagination parameters for list queries
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParam {
    #[serde(default = "PageParam::default_page_no")]
    pub page_no: u64,
    #[serde(default = "PageParam::default_page_size")]
    pub page_size: u64,
}

impl PageParam {
    pub fn start(&self) -> u64 {
        (self.page_no - 1) * self.page_size
    }

    fn default_page_no() -> u64 {
        1
    }

    fn default_page_size() -> u64 {
        100
    }
}

/// Connection meta information
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionMeta {
    pub connect_type: String,
    pub client_ip: String,
    pub remote_ip: String,
    pub remote_port: u16,
    pub local_port: u16,
    pub version: String,
    pub connection_id: String,
    pub create_time: i64,
    pub last_active_time: i64,
    pub app_name: String,
    pub namespace_id: String,
    pub labels: HashMap<String, String>,
    pub tls_protected: bool,

    first_push_queue_block_time: i64,
    last_push_queue_block_time: i64,
}

impl ConnectionMeta {
    pub fn is_sdk_source(&self) -> bool {
        self.labels
            .get(LABEL_SOURCE)
            .is_some_and(|e| e.to_lowercase() == LABEL_SOURCE_SDK.to_lowercase())
    }

    pub fn is_cluster_source(&self) -> bool {
        self.labels
            .get(LABEL_SOURCE)
            .is_some_and(|e| e.to_lowercase() == LABEL_SOURCE_CLUSTER.to_lowercase())
    }

    pub fn get_app_labels(&self) -> HashMap<String, String> {
        let mut map = HashMap::<String, String>::new();

        map.insert(
            APPNAME.to_string(),
            self.labels
                .get(APPNAME)
                .map_or(String::default(), |e| e.to_string()),
        );
        map.insert(CLIENT_VERSION_KEY.to_string(), self.version.clone());

        for (k, v) in self.labels.iter() {
            if k.starts_with(APP_CONN_PREFIX) && k.len() > APP_CONN_PREFIX.len() && !v.is_empty() {
                map.insert(k[APP_CONN_PREFIX.len()..].to_string(), v.to_string());
            }
        }

        map
    }

    pub fn record_push_queue_block_times(&mut self) {
        if self.first_push_queue_block_time == 0 {
            self.first_push_queue_block_time = chrono::Utc::now().timestamp_millis();
        } else {
            self.last_push_queue_block_time = chrono::Utc::now().timestamp_millis();
        }
    }

    pub fn push_queue_block_times_last_over(&self, time_mills_seconds: i64) -> bool {
        self.last_push_queue_block_time - self.first_push_queue_block_time > time_mills_seconds
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub traced: bool,
    pub ability_table: HashMap<String, bool>,

    #[serde(flatten)]
    pub meta_info: ConnectionMeta,
}

#[derive(Clone)]
pub struct GrpcClient {
    pub connection: Connection,
    pub tx: Sender<Result<Payload, Status>>,
}

impl GrpcClient {
    pub fn new(connection: Connection, tx: Sender<Result<Payload, Status>>) -> Self {
        Self { connection, tx }
    }
}

/// Storage backend for cert material referenced by TLS configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertStorageType {
    File,
    Database,
}

impl std::str::FromStr for CertStorageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "FILE" => Ok(CertStorageType::File),
            "DATABASE" => Ok(CertStorageType::Database),
            other => Err(format!("unknown certStorageType: {other}")),
        }
    }
}

/// Instance configuration provider (spec §6 "Configuration knobs").
///
/// Wraps a `config::Config` and exposes typed accessors for every recognized
/// option. Injected once at construction into C9's pipeline and C8's session
/// layer; `enableAuth`/IP lists reload live, everything else requires a
/// restart to take effect.
#[derive(Clone, Debug)]
pub struct Configuration {
    pub config: config::Config,
}

impl Configuration {
    pub fn from_config(config: config::Config) -> Self {
        Self { config }
    }

    pub fn listen_address(&self) -> String {
        self.config
            .get_string("rcenter.server.listen-address")
            .unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    pub fn listen_port(&self) -> u16 {
        self.config
            .get_int("rcenter.server.listen-port")
            .unwrap_or(9848) as u16
    }

    pub fn enable_tls(&self) -> bool {
        self.config.get_bool("rcenter.server.enable-tls").unwrap_or(false)
    }

    pub fn enable_mtls(&self) -> bool {
        self.config.get_bool("rcenter.server.enable-mtls").unwrap_or(false)
    }

    pub fn cert_storage_type(&self) -> CertStorageType {
        self.config
            .get_string("rcenter.server.cert-storage-type")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(CertStorageType::File)
    }

    pub fn cert_path(&self) -> Option<String> {
        self.config.get_string("rcenter.server.cert-path").ok()
    }

    pub fn key_path(&self) -> Option<String> {
        self.config.get_string("rcenter.server.key-path").ok()
    }

    pub fn enable_auth(&self) -> bool {
        self.config.get_bool("rcenter.server.enable-auth").unwrap_or(false)
    }

    pub fn ip_whitelist(&self) -> String {
        self.config
            .get_string("rcenter.server.ip-whitelist")
            .unwrap_or_default()
    }

    pub fn ip_blacklist(&self) -> String {
        self.config
            .get_string("rcenter.server.ip-blacklist")
            .unwrap_or_default()
    }

    pub fn max_concurrent_streams(&self) -> u32 {
        self.config
            .get_int("rcenter.server.grpc.max-concurrent-streams")
            .unwrap_or(10000) as u32
    }

    pub fn read_buffer_size(&self) -> usize {
        self.config
            .get_int("rcenter.server.grpc.read-buffer-size")
            .unwrap_or(1024 * 1024) as usize
    }

    pub fn write_buffer_size(&self) -> usize {
        self.config
            .get_int("rcenter.server.grpc.write-buffer-size")
            .unwrap_or(1024 * 1024) as usize
    }

    pub fn keepalive_time_ms(&self) -> u64 {
        self.config
            .get_int("rcenter.server.grpc.keepalive-time")
            .unwrap_or(7_200_000) as u64
    }

    pub fn keepalive_timeout_ms(&self) -> u64 {
        self.config
            .get_int("rcenter.server.grpc.keepalive-timeout")
            .unwrap_or(20_000) as u64
    }

    pub fn connection_idle_ms(&self) -> u64 {
        self.config
            .get_int("rcenter.server.grpc.connection-idle")
            .unwrap_or(0) as u64
    }

    pub fn connection_age_ms(&self) -> u64 {
        self.config
            .get_int("rcenter.server.grpc.connection-age")
            .unwrap_or(0) as u64
    }

    pub fn recommended_heartbeat_seconds(&self) -> u32 {
        self.config
            .get_int("rcenter.server.recommended-heartbeat-seconds")
            .unwrap_or(5) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(pairs: &[(&str, &str)]) -> Configuration {
        let mut builder = config::Config::builder();
        for (k, v) in pairs {
            builder = builder.set_override(*k, *v).unwrap();
        }
        Configuration::from_config(builder.build().unwrap())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let configuration = cfg(&[]);
        assert_eq!(configuration.listen_port(), 9848);
        assert!(!configuration.enable_auth());
        assert_eq!(configuration.cert_storage_type(), CertStorageType::File);
    }

    #[test]
    fn overrides_take_effect() {
        let configuration = cfg(&[
            ("rcenter.server.listen-port", "7777"),
            ("rcenter.server.enable-auth", "true"),
            ("rcenter.server.cert-storage-type", "DATABASE"),
        ]);
        assert_eq!(configuration.listen_port(), 7777);
        assert!(configuration.enable_auth());
        assert_eq!(configuration.cert_storage_type(), CertStorageType::Database);
    }

    #[test]
    fn app_labels_strip_conn_prefix() {
        let mut meta = ConnectionMeta {
            version: "1.0.0".to_string(),
            ..Default::default()
        };
        meta.labels
            .insert(format!("{APP_CONN_PREFIX}region"), "us-east".to_string());

        let labels = meta.get_app_labels();
        assert_eq!(labels.get("region"), Some(&"us-east".to_string()));
        assert_eq!(labels.get(CLIENT_VERSION_KEY), Some(&"1.0.0".to_string()));
    }
}
