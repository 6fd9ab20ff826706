//! Session-scoped key-value store for wizard records.
//!
//! Each wizard session owns one namespace of string keys holding serialized
//! records. The namespace has a size quota, like browser local storage. Writes that
//! would go over it fail with `StoreError::QuotaExceeded`.
//!
//! `AppState` holds an `Arc<dyn KvStore>`. Route code only touches it through a
//! `SessionStore`, which scopes every read and write to one session and one
//! `RecordKey`.

pub mod memory;
pub mod record;
pub mod redis_store;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

pub use memory::InMemoryStore;
pub use record::{RecordKey, StoredRecord};
pub use redis_store::RedisStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage quota exceeded: {requested} bytes requested, {quota} bytes allowed")]
    QuotaExceeded { requested: usize, quota: usize },

    #[error("Redis error: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("record encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Backend for session namespaces. Implement this to swap persistence without
/// touching the wizard or document code.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, session: Uuid, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `value` under `key`, replacing any previous value. Fails without
    /// modifying the namespace when the result would exceed the quota.
    async fn set(&self, session: Uuid, key: &str, value: &str) -> Result<(), StoreError>;

    /// Drops every key in the session namespace.
    async fn clear(&self, session: Uuid) -> Result<(), StoreError>;

    async fn keys(&self, session: Uuid) -> Result<Vec<String>, StoreError>;
}

/// Size charged against the quota for one entry.
pub(crate) fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}

/// Checks a pending write against the quota. `existing` yields the current entries
/// of the namespace; the entry being replaced is not counted twice.
pub(crate) fn check_quota<'a>(
    existing: impl Iterator<Item = (&'a str, &'a str)>,
    key: &str,
    value: &str,
    quota: usize,
) -> Result<(), StoreError> {
    let others: usize = existing
        .filter(|(k, _)| *k != key)
        .map(|(k, v)| entry_size(k, v))
        .sum();
    let requested = others + entry_size(key, value);
    if requested > quota {
        return Err(StoreError::QuotaExceeded { requested, quota });
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Session handle
// ────────────────────────────────────────────────────────────────────────────

/// A store handle bound to one wizard session.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KvStore>,
    session: Uuid,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KvStore>, session: Uuid) -> Self {
        Self { store, session }
    }

    pub fn session_id(&self) -> Uuid {
        self.session
    }

    pub async fn read_raw(&self, key: RecordKey) -> Result<Option<String>, StoreError> {
        self.store.get(self.session, key.as_str()).await
    }

    pub async fn write_raw(&self, key: RecordKey, value: &str) -> Result<(), StoreError> {
        self.store.set(self.session, key.as_str(), value).await?;
        debug!(session = %self.session, %key, bytes = value.len(), "record written");
        Ok(())
    }

    /// Loads and decodes a typed record.
    ///
    /// A value that does not decode is logged and reported as absent; callers
    /// then start from an empty form. Backend failures still propagate.
    pub async fn load<R: StoredRecord>(&self) -> Result<Option<R>, StoreError> {
        let Some(raw) = self.read_raw(R::KEY).await? else {
            return Ok(None);
        };
        match R::decode(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!(session = %self.session, key = %R::KEY, "unreadable stored record, ignoring: {e}");
                Ok(None)
            }
        }
    }

    pub async fn save<R: StoredRecord>(&self, record: &R) -> Result<(), StoreError> {
        let encoded = record.encode()?;
        self.write_raw(R::KEY, &encoded).await
    }

    /// Finalize-and-reset: irreversibly deletes every record in the session.
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.store.clear(self.session).await
    }

    pub async fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.store.keys(self.session).await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
