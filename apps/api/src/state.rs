use std::sync::Arc;

use uuid::Uuid;

use crate::config::Config;
use crate::store::{KvStore, SessionStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Session namespaces. Redis when `REDIS_URL` is set, in-memory otherwise.
    pub store: Arc<dyn KvStore>,
    pub config: Config,
}

impl AppState {
    pub fn session(&self, id: Uuid) -> SessionStore {
        SessionStore::new(self.store.clone(), id)
    }
}
