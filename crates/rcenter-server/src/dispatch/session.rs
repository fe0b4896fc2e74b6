//! Streaming Session Layer (C8): per-connection state held across the
//! lifetime of one `Connect` stream — the node ids it has registered (for
//! cleanup on disconnect), and the tenant handshake established.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

pub struct SessionState {
    pub connection_id: String,
    pub client_ip: String,
    tenant_id: Mutex<String>,
    registered_node_ids: Mutex<HashSet<String>>,
    last_active_ms: AtomicI64,
}

impl SessionState {
    pub fn new(connection_id: String, client_ip: String) -> Self {
        Self {
            connection_id,
            client_ip,
            tenant_id: Mutex::new(String::new()),
            registered_node_ids: Mutex::new(HashSet::new()),
            last_active_ms: AtomicI64::new(chrono::Utc::now().timestamp_millis()),
        }
    }

    pub fn set_tenant(&self, tenant_id: String) {
        *self.tenant_id.lock().unwrap() = tenant_id;
    }

    pub fn tenant_id(&self) -> String {
        self.tenant_id.lock().unwrap().clone()
    }

    pub fn touch(&self) {
        self.last_active_ms.store(chrono::Utc::now().timestamp_millis(), Ordering::Relaxed);
    }

    pub fn last_active_ms(&self) -> i64 {
        self.last_active_ms.load(Ordering::Relaxed)
    }

    pub fn remember_node(&self, node_id: String) {
        if !node_id.is_empty() {
            self.registered_node_ids.lock().unwrap().insert(node_id);
        }
    }

    pub fn forget_node(&self, node_id: &str) {
        self.registered_node_ids.lock().unwrap().remove(node_id);
    }

    /// All node ids this connection registered, for cleanup on disconnect.
    pub fn registered_node_ids(&self) -> Vec<String> {
        self.registered_node_ids.lock().unwrap().iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remember_and_forget_nodes() {
        let session = SessionState::new("c1".to_string(), "127.0.0.1".to_string());
        session.remember_node("n1".to_string());
        session.remember_node("n2".to_string());
        assert_eq!(session.registered_node_ids().len(), 2);
        session.forget_node("n1");
        assert_eq!(session.registered_node_ids(), vec!["n2".to_string()]);
    }

    #[test]
    fn tenant_round_trips() {
        let session = SessionState::new("c1".to_string(), "127.0.0.1".to_string());
        assert_eq!(session.tenant_id(), "");
        session.set_tenant("acme".to_string());
        assert_eq!(session.tenant_id(), "acme");
    }
}
