// Environment detection and logger configuration.

use std::sync::OnceLock;

/// Cached environment mode.
static ENV_MODE: OnceLock<EnvMode> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvMode {
    Production,
    Development,
    Test,
}

impl EnvMode {
    /// Parse an environment name. Unknown names fall back to development.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "production" | "prod" => EnvMode::Production,
            "test" | "testing" => EnvMode::Test,
            _ => EnvMode::Development,
        }
    }
}

/// Detect the current environment mode from environment variables.
/// Checks `MEMBERSHIP_ENV` then `RUST_ENV`.
pub fn detect_env_mode() -> EnvMode {
    *ENV_MODE.get_or_init(|| {
        let env_val = std::env::var("MEMBERSHIP_ENV")
            .or_else(|_| std::env::var("RUST_ENV"))
            .unwrap_or_default();
        EnvMode::parse(&env_val)
    })
}

/// Read an environment variable, treating blank values as unset.
pub fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Default `EnvFilter` directive for the given mode.
pub fn default_filter(mode: EnvMode) -> &'static str {
    match mode {
        EnvMode::Production => "membership=info",
        EnvMode::Development | EnvMode::Test => "membership=debug",
    }
}

/// Initialize the `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise the filter depends on the environment
/// mode. Safe to call more than once: later calls are ignored.
pub fn init_logger() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(detect_env_mode())));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .try_init();
}
