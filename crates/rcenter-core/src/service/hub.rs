//! Generic subscriber/watcher hub shared by the Service Subscriber Hub (naming)
//! and the Config Watcher Hub (config).
//!
//! A hub is two maps: `subscriptionKey -> set[subscriberId]` (this module) and
//! `subscriberId -> channel` (the `ConnectionManager`). Publish resolves the
//! first map to a set of connection ids and delivers via the second with a
//! non-blocking send; a full channel drops the event for that subscriber only.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

/// Anything usable as a hub subscription key: a natural key of what is being
/// followed (service identity, config identity, or a namespace-level wildcard).
pub trait SubscriptionKey: Clone + Eq + std::hash::Hash {
    fn to_key_string(&self) -> String;
}

/// Tracks which connection ids are subscribed to which keys, independent of
/// the transport used to actually deliver events (see `ConnectionManager`).
pub struct SubscriptionIndex<K: SubscriptionKey> {
    /// key-string -> connection_id -> subscriber metadata
    subscribers: DashMap<String, HashMap<String, SubscriberInfo>>,
    /// connection_id -> set of key-strings it is subscribed to
    by_connection: DashMap<String, HashSet<String>>,
    /// key-string -> original key, so callers can iterate typed keys back out
    keys: DashMap<String, K>,
    dropped: AtomicU64,
}

#[derive(Clone, Debug, Default)]
pub struct SubscriberInfo {
    pub client_ip: String,
    /// last fingerprint the subscriber is known to have (md5 for config, empty for services)
    pub fingerprint: String,
}

impl<K: SubscriptionKey> Default for SubscriptionIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: SubscriptionKey> SubscriptionIndex<K> {
    pub fn new() -> Self {
        Self {
            subscribers: DashMap::new(),
            by_connection: DashMap::new(),
            keys: DashMap::new(),
            dropped: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self, connection_id: &str, key: &K, info: SubscriberInfo) {
        let key_string = key.to_key_string();

        self.subscribers
            .entry(key_string.clone())
            .or_default()
            .insert(connection_id.to_string(), info);

        self.by_connection
            .entry(connection_id.to_string())
            .or_default()
            .insert(key_string.clone());

        self.keys.entry(key_string).or_insert_with(|| key.clone());
    }

    pub fn unsubscribe(&self, connection_id: &str, key: &K) {
        let key_string = key.to_key_string();
        self.remove_one(connection_id, &key_string);

        if let Some(mut set) = self.by_connection.get_mut(connection_id) {
            set.remove(&key_string);
        }
    }

    /// Called once from session cleanup on disconnect; idempotent.
    pub fn unsubscribe_all(&self, connection_id: &str) {
        if let Some((_, key_strings)) = self.by_connection.remove(connection_id) {
            for key_string in key_strings {
                self.remove_one(connection_id, &key_string);
            }
        }
    }

    fn remove_one(&self, connection_id: &str, key_string: &str) {
        if let Some(mut subs) = self.subscribers.get_mut(key_string) {
            subs.remove(connection_id);
            if subs.is_empty() {
                drop(subs);
                self.subscribers.remove(key_string);
                self.keys.remove(key_string);
            }
        }
    }

    /// Connection ids subscribed to exactly this key (no wildcard expansion).
    pub fn subscriber_ids(&self, key: &K) -> Vec<String> {
        self.subscribers
            .get(&key.to_key_string())
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn update_fingerprint(&self, connection_id: &str, key: &K, fingerprint: &str) {
        if let Some(mut subs) = self.subscribers.get_mut(&key.to_key_string()) {
            if let Some(info) = subs.get_mut(connection_id) {
                info.fingerprint = fingerprint.to_string();
            }
        }
    }

    pub fn all_keys(&self) -> Vec<K> {
        self.keys.iter().map(|e| e.value().clone()).collect()
    }

    pub fn subscription_count(&self) -> usize {
        self.subscribers.iter().map(|e| e.value().len()).sum()
    }

    pub fn key_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn connection_count(&self) -> usize {
        self.by_connection.len()
    }

    pub fn record_drop(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Total events dropped because a subscriber's outbound channel was full.
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Convenience wrapper binding a `SubscriptionIndex` to the `ConnectionManager`
/// responsible for actually delivering payloads to each subscriber's stream.
pub struct Hub<K: SubscriptionKey> {
    pub index: Arc<SubscriptionIndex<K>>,
    pub connections: Arc<super::remote::ConnectionManager>,
}

impl<K: SubscriptionKey> Clone for Hub<K> {
    fn clone(&self) -> Self {
        Self {
            index: self.index.clone(),
            connections: self.connections.clone(),
        }
    }
}

impl<K: SubscriptionKey> Hub<K> {
    pub fn new(connections: Arc<super::remote::ConnectionManager>) -> Self {
        Self {
            index: Arc::new(SubscriptionIndex::new()),
            connections,
        }
    }

    pub fn subscribe(&self, connection_id: &str, key: &K, info: SubscriberInfo) {
        self.index.subscribe(connection_id, key, info);
    }

    pub fn unsubscribe(&self, connection_id: &str, key: &K) {
        self.index.unsubscribe(connection_id, key);
    }

    pub fn unsubscribe_all(&self, connection_id: &str) {
        self.index.unsubscribe_all(connection_id);
    }

    /// Publish `payload` to every subscriber of `key`. Non-blocking per subscriber;
    /// a full channel drops the event for that subscriber without tearing it down.
    pub async fn publish(&self, key: &K, payload: rcenter_api::grpc::Payload) {
        for connection_id in self.index.subscriber_ids(key) {
            match self.connections.try_push_message(&connection_id, payload.clone()) {
                super::remote::PushResult::Delivered => {}
                super::remote::PushResult::Dropped => {
                    self.index.record_drop();
                    tracing::warn!(connection_id, "subscriber channel full, event dropped");
                }
                super::remote::PushResult::NoSuchConnection => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, Hash)]
    struct TestKey(String);
    impl SubscriptionKey for TestKey {
        fn to_key_string(&self) -> String {
            self.0.clone()
        }
    }

    #[test]
    fn subscribe_and_lookup() {
        let idx: SubscriptionIndex<TestKey> = SubscriptionIndex::new();
        let key = TestKey("public@@DEFAULT_GROUP@@orders".to_string());

        idx.subscribe("conn1", &key, SubscriberInfo::default());
        idx.subscribe("conn2", &key, SubscriberInfo::default());

        assert_eq!(idx.subscriber_ids(&key).len(), 2);
        assert_eq!(idx.key_count(), 1);
    }

    #[test]
    fn unsubscribe_all_cleans_up_both_maps() {
        let idx: SubscriptionIndex<TestKey> = SubscriptionIndex::new();
        let k1 = TestKey("a".to_string());
        let k2 = TestKey("b".to_string());

        idx.subscribe("conn1", &k1, SubscriberInfo::default());
        idx.subscribe("conn1", &k2, SubscriberInfo::default());
        idx.subscribe("conn2", &k1, SubscriberInfo::default());

        idx.unsubscribe_all("conn1");

        assert_eq!(idx.subscriber_ids(&k1), vec!["conn2".to_string()]);
        assert!(idx.subscriber_ids(&k2).is_empty());
        assert_eq!(idx.connection_count(), 1);
    }

    #[test]
    fn idempotent_unsubscribe() {
        let idx: SubscriptionIndex<TestKey> = SubscriptionIndex::new();
        let key = TestKey("a".to_string());
        idx.subscribe("conn1", &key, SubscriberInfo::default());
        idx.unsubscribe_all("conn1");
        // second call is a no-op, not a panic
        idx.unsubscribe_all("conn1");
        assert_eq!(idx.key_count(), 0);
    }
}
