use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

use super::{check_quota, KvStore, StoreError};

#[derive(Debug)]
struct Namespace {
    entries: HashMap<String, String>,
    touched: Instant,
}

impl Namespace {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            touched: Instant::now(),
        }
    }
}

/// Process-local store. Sessions vanish on restart; used when no Redis URL is
/// configured and throughout the test suite.
///
/// With a TTL set, a session idle for longer than the TTL since its last write is
/// treated as gone and is dropped by the next write to any session.
pub struct InMemoryStore {
    sessions: RwLock<HashMap<Uuid, Namespace>>,
    quota_bytes: usize,
    ttl: Option<Duration>,
}

impl InMemoryStore {
    pub fn new(quota_bytes: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            quota_bytes,
            ttl: None,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    fn is_live(&self, ns: &Namespace) -> bool {
        self.ttl.map_or(true, |ttl| ns.touched.elapsed() < ttl)
    }

    fn live<'a>(&self, sessions: &'a HashMap<Uuid, Namespace>, session: Uuid) -> Option<&'a Namespace> {
        sessions.get(&session).filter(|ns| self.is_live(ns))
    }
}

#[async_trait]
impl KvStore for InMemoryStore {
    async fn get(&self, session: Uuid, key: &str) -> Result<Option<String>, StoreError> {
        let sessions = self.sessions.read().await;
        Ok(self
            .live(&sessions, session)
            .and_then(|ns| ns.entries.get(key).cloned()))
    }

    async fn set(&self, session: Uuid, key: &str, value: &str) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, ns| self.is_live(ns));
        if sessions.len() < before {
            debug!(expired = before - sessions.len(), "expired idle sessions");
        }

        let namespace = sessions.entry(session).or_insert_with(Namespace::new);
        check_quota(
            namespace.entries.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            key,
            value,
            self.quota_bytes,
        )?;
        namespace.entries.insert(key.to_string(), value.to_string());
        namespace.touched = Instant::now();
        Ok(())
    }

    async fn clear(&self, session: Uuid) -> Result<(), StoreError> {
        self.sessions.write().await.remove(&session);
        Ok(())
    }

    async fn keys(&self, session: Uuid) -> Result<Vec<String>, StoreError> {
        let sessions = self.sessions.read().await;
        let mut keys: Vec<String> = self
            .live(&sessions, session)
            .map(|ns| ns.entries.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        Ok(keys)
    }
}
