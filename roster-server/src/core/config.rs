/// Process configuration
///
/// Shard topology is fixed at startup and never mutated at runtime.
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/roster | Working directory (shard stores, logs) |
/// | SHARD_COUNT | 3 | Number of shards |
/// | SHARD_RANGE_WIDTH | 1000 | Employee ids per shard |
/// | LOG_LEVEL | info | Tracing filter level |
/// | ENVIRONMENT | development | development \| staging \| production |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory; shard stores live under `<work_dir>/shards/`
    pub work_dir: String,
    /// Number of independent document stores
    pub shard_count: usize,
    /// Width of each contiguous employee-id range
    pub range_width: u32,
    /// Tracing filter level
    pub log_level: String,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/roster".into()),
            shard_count: std::env::var("SHARD_COUNT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            range_width: std::env::var("SHARD_RANGE_WIDTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override the parts tests care about
    pub fn with_overrides(
        work_dir: impl Into<String>,
        shard_count: usize,
        range_width: u32,
    ) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.shard_count = shard_count;
        config.range_width = range_width;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
