use anyhow::{Context, Result};

/// Browser local storage gives each origin roughly 5 MiB.
const DEFAULT_STORAGE_QUOTA_BYTES: usize = 5 * 1024 * 1024;
const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;
const DEFAULT_EXPORT_SCALE: u32 = 3;
/// Raw photos straight off a phone camera; normalization shrinks them afterwards.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// When set, wizard sessions live in Redis; otherwise in process memory.
    pub redis_url: Option<String>,
    /// Upper bound on the summed size of all records in one session.
    pub storage_quota_bytes: usize,
    /// Idle expiry applied to Redis-backed sessions.
    pub session_ttl_secs: u64,
    /// Pixels per PDF point used when rasterizing embedded images.
    pub export_scale: u32,
    /// Body limit for the image normalization upload.
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            redis_url: optional_env("REDIS_URL"),
            storage_quota_bytes: parse_env("STORAGE_QUOTA_BYTES", DEFAULT_STORAGE_QUOTA_BYTES)?,
            session_ttl_secs: parse_env("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?,
            export_scale: parse_env("EXPORT_SCALE", DEFAULT_EXPORT_SCALE)?.clamp(1, 8),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            port: parse_env("PORT", 8080u16)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Body limit for JSON form bodies: the quota plus half again, so a form whose
    /// record is over quota still reaches the store and fails with 507, not 413.
    pub fn json_body_limit(&self) -> usize {
        self.storage_quota_bytes
            .saturating_add(self.storage_quota_bytes / 2)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            redis_url: None,
            storage_quota_bytes: DEFAULT_STORAGE_QUOTA_BYTES,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            export_scale: DEFAULT_EXPORT_SCALE,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        None => Ok(default),
    }
}

