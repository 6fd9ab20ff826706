//! Redis-backed session store.
//!
//! One Redis hash per session (`resume-wizard:session:<uuid>`), one hash field per
//! record key. The hash TTL is refreshed on every write, so abandoned wizard runs
//! expire on their own.
//!
//! The quota check reads the hash before writing. Only one wizard page is active
//! per session at a time, so the read-then-write window is not guarded.

use std::collections::HashMap;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::info;
use uuid::Uuid;

use super::{check_quota, KvStore, StoreError};

const KEY_PREFIX: &str = "resume-wizard:session";

pub struct RedisStore {
    conn: MultiplexedConnection,
    quota_bytes: usize,
    ttl_secs: u64,
}

impl RedisStore {
    pub async fn connect(
        redis_url: &str,
        quota_bytes: usize,
        ttl_secs: u64,
    ) -> Result<Self, StoreError> {
        let client = redis::Client::open(redis_url)?;
        let conn = client.get_multiplexed_tokio_connection().await?;
        info!("Redis session store connected");
        Ok(Self {
            conn,
            quota_bytes,
            ttl_secs,
        })
    }

    fn hash_key(session: Uuid) -> String {
        format!("{KEY_PREFIX}:{session}")
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, session: Uuid, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.hget(Self::hash_key(session), key).await?;
        Ok(value)
    }

    async fn set(&self, session: Uuid, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let hash = Self::hash_key(session);

        let existing: HashMap<String, String> = conn.hgetall(&hash).await?;
        check_quota(
            existing.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            key,
            value,
            self.quota_bytes,
        )?;

        conn.hset::<_, _, _, ()>(&hash, key, value).await?;
        conn.expire::<_, ()>(&hash, self.ttl_secs as i64).await?;
        Ok(())
    }

    async fn clear(&self, session: Uuid) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(Self::hash_key(session)).await?;
        Ok(())
    }

    async fn keys(&self, session: Uuid) -> Result<Vec<String>, StoreError> {
        let mut conn = self.conn.clone();
        let mut keys: Vec<String> = conn.hkeys(Self::hash_key(session)).await?;
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_key_is_namespaced_per_session() {
        let session = Uuid::nil();
        assert_eq!(
            RedisStore::hash_key(session),
            "resume-wizard:session:00000000-0000-0000-0000-000000000000"
        );
    }
}
