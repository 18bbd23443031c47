//! Application configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! Everything is read once at startup into a typed `AppConfig`. Optional
//! knobs fall back to the `DEFAULT_*` constants when unset or unparsable;
//! only `ADMIN_TOKEN` is required. Cross-field constraints (step and chunk
//! ranges) are validated so the pipeline never sees an empty range.

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_AUTH_ENTRY_URL: &str = "/login";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 12 * 3600;

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;
pub const DEFAULT_PROCESSING_TICK_MS: u64 = 1000;
pub const DEFAULT_PROCESSING_STEP_MIN: u32 = 1;
pub const DEFAULT_PROCESSING_STEP_MAX: u32 = 3;
pub const DEFAULT_CHUNK_ESTIMATE_BYTES: u64 = 64 * 1024;
pub const DEFAULT_MIN_TOTAL_CHUNKS: u32 = 10;
pub const DEFAULT_MAX_TOTAL_CHUNKS: u32 = 59;
pub const DEFAULT_PROCESSING_MAX_RETRIES: u32 = 3;

pub const DEFAULT_NOTIFICATION_CAPACITY: usize = 100;
pub const DEFAULT_SETUP_TEST_DELAY_MS: u64 = 2000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {var}")]
    Missing { var: String },
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Knobs for the upload and simulated processing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Files strictly larger than this are rejected.
    pub max_upload_bytes: u64,
    /// Cadence of each document's processing task.
    pub tick_ms: u64,
    /// Inclusive bounds of the simulated per-tick chunk step.
    pub step_min: u32,
    pub step_max: u32,
    /// Bytes per estimated chunk when sizing `total_chunks`.
    pub chunk_estimate_bytes: u64,
    pub min_total_chunks: u32,
    pub max_total_chunks: u32,
    /// Consecutive ingest failures tolerated before a document goes to `error`.
    pub max_retries: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            tick_ms: DEFAULT_PROCESSING_TICK_MS,
            step_min: DEFAULT_PROCESSING_STEP_MIN,
            step_max: DEFAULT_PROCESSING_STEP_MAX,
            chunk_estimate_bytes: DEFAULT_CHUNK_ESTIMATE_BYTES,
            min_total_chunks: DEFAULT_MIN_TOTAL_CHUNKS,
            max_total_chunks: DEFAULT_MAX_TOTAL_CHUNKS,
            max_retries: DEFAULT_PROCESSING_MAX_RETRIES,
        }
    }
}

impl PipelineConfig {
    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` when a range is empty or a divisor is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_min == 0 {
            return Err(invalid("PROCESSING_STEP_MIN", "must be at least 1"));
        }
        if self.step_min > self.step_max {
            return Err(invalid("PROCESSING_STEP_MAX", "must be >= PROCESSING_STEP_MIN"));
        }
        if self.min_total_chunks == 0 {
            return Err(invalid("MIN_TOTAL_CHUNKS", "must be at least 1"));
        }
        if self.min_total_chunks > self.max_total_chunks {
            return Err(invalid("MAX_TOTAL_CHUNKS", "must be >= MIN_TOTAL_CHUNKS"));
        }
        if self.chunk_estimate_bytes == 0 {
            return Err(invalid("CHUNK_ESTIMATE_BYTES", "must be non-zero"));
        }
        if self.tick_ms == 0 {
            return Err(invalid("PROCESSING_TICK_MS", "must be non-zero"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub admin_token: String,
    /// Where unauthenticated shell requests are redirected.
    pub auth_entry_url: String,
    pub session_ttl_secs: u64,
    pub cookie_secure: bool,
    pub pipeline: PipelineConfig,
    pub notification_capacity: usize,
    /// Seed mock documents, conversations and logs at startup.
    pub seed_demo_data: bool,
    pub setup_test_delay_ms: u64,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `ADMIN_TOKEN`
    ///
    /// Optional (see `DEFAULT_*`):
    /// - `PORT`, `AUTH_ENTRY_URL`, `SESSION_TTL_SECS`, `COOKIE_SECURE`
    /// - `MAX_UPLOAD_BYTES`, `PROCESSING_TICK_MS`, `PROCESSING_STEP_MIN`,
    ///   `PROCESSING_STEP_MAX`, `CHUNK_ESTIMATE_BYTES`, `MIN_TOTAL_CHUNKS`,
    ///   `MAX_TOTAL_CHUNKS`, `PROCESSING_MAX_RETRIES`
    /// - `NOTIFICATION_CAPACITY`, `SEED_DEMO_DATA`, `SETUP_TEST_DELAY_MS`
    ///
    /// # Errors
    ///
    /// Returns `Missing` if `ADMIN_TOKEN` is unset or blank, `Invalid` if the
    /// pipeline ranges are inconsistent.
    pub fn from_env() -> Result<Self, ConfigError> {
        let admin_token = std::env::var("ADMIN_TOKEN")
            .ok()
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::Missing { var: "ADMIN_TOKEN".into() })?;

        let pipeline = PipelineConfig {
            max_upload_bytes: env_parse("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
            tick_ms: env_parse("PROCESSING_TICK_MS", DEFAULT_PROCESSING_TICK_MS),
            step_min: env_parse("PROCESSING_STEP_MIN", DEFAULT_PROCESSING_STEP_MIN),
            step_max: env_parse("PROCESSING_STEP_MAX", DEFAULT_PROCESSING_STEP_MAX),
            chunk_estimate_bytes: env_parse("CHUNK_ESTIMATE_BYTES", DEFAULT_CHUNK_ESTIMATE_BYTES),
            min_total_chunks: env_parse("MIN_TOTAL_CHUNKS", DEFAULT_MIN_TOTAL_CHUNKS),
            max_total_chunks: env_parse("MAX_TOTAL_CHUNKS", DEFAULT_MAX_TOTAL_CHUNKS),
            max_retries: env_parse("PROCESSING_MAX_RETRIES", DEFAULT_PROCESSING_MAX_RETRIES),
        };
        pipeline.validate()?;

        let auth_entry_url = std::env::var("AUTH_ENTRY_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_AUTH_ENTRY_URL.to_owned());

        Ok(Self {
            port: env_parse("PORT", DEFAULT_PORT),
            admin_token,
            auth_entry_url,
            session_ttl_secs: env_parse("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS),
            cookie_secure: env_bool("COOKIE_SECURE").unwrap_or(false),
            pipeline,
            notification_capacity: env_parse("NOTIFICATION_CAPACITY", DEFAULT_NOTIFICATION_CAPACITY).max(1),
            seed_demo_data: env_bool("SEED_DEMO_DATA").unwrap_or(true),
            setup_test_delay_ms: env_parse("SETUP_TEST_DELAY_MS", DEFAULT_SETUP_TEST_DELAY_MS),
        })
    }

    /// Config with defaults, demo seeding off, and the given admin token.
    #[cfg(test)]
    #[must_use]
    pub fn with_admin_token(admin_token: &str) -> Self {
        Self {
            port: DEFAULT_PORT,
            admin_token: admin_token.to_owned(),
            auth_entry_url: DEFAULT_AUTH_ENTRY_URL.to_owned(),
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            cookie_secure: false,
            pipeline: PipelineConfig::default(),
            notification_capacity: DEFAULT_NOTIFICATION_CAPACITY,
            seed_demo_data: false,
            setup_test_delay_ms: DEFAULT_SETUP_TEST_DELAY_MS,
        }
    }
}

fn invalid(var: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid { var: var.to_owned(), reason: reason.to_owned() }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
