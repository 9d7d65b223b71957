use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Backend API
    pub api_origin: String,
    pub api_prefix: String,

    // Translation bundles
    pub locales_url: Option<String>,
    pub locales_dir: PathBuf,

    // Local persisted state (token, language)
    pub state_file: PathBuf,

    // Timeouts
    pub request_timeout_secs: u64,
    pub auth_timeout_secs: u64,

    // Hero carousel
    pub carousel_tick_ms: u64,
    pub carousel_duration_ms: u64,

    // Uploads
    pub file_limit_mb: u64,
    pub media_limit_mb: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_origin: "http://localhost:5000".to_string(),
            api_prefix: "/api".to_string(),
            locales_url: None,
            locales_dir: PathBuf::from("public/locales"),
            state_file: PathBuf::from(".rock-bridge/state.json"),
            request_timeout_secs: 20,
            auth_timeout_secs: 10,
            carousel_tick_ms: 40,
            carousel_duration_ms: 4000,
            file_limit_mb: 20,
            media_limit_mb: 100,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let api_origin = std::env::var("API_ORIGIN").unwrap_or(defaults.api_origin);
        if !api_origin.contains("://") {
            anyhow::bail!("API_ORIGIN must be an absolute URL, got '{}'", api_origin);
        }

        Ok(Self {
            api_origin: api_origin.trim_end_matches('/').to_string(),
            api_prefix: std::env::var("API_PREFIX").unwrap_or(defaults.api_prefix),

            locales_url: std::env::var("LOCALES_URL").ok().filter(|v| !v.is_empty()),
            locales_dir: std::env::var("LOCALES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.locales_dir),

            state_file: std::env::var("STATE_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.state_file),

            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS")?
                .unwrap_or(defaults.request_timeout_secs),
            auth_timeout_secs: parse_var("AUTH_TIMEOUT_SECS")?
                .unwrap_or(defaults.auth_timeout_secs),

            carousel_tick_ms: parse_var("CAROUSEL_TICK_MS")?.unwrap_or(defaults.carousel_tick_ms),
            carousel_duration_ms: parse_var("CAROUSEL_DURATION_MS")?
                .unwrap_or(defaults.carousel_duration_ms),

            file_limit_mb: parse_var("FILE_LIMIT_MB")?.unwrap_or(defaults.file_limit_mb),
            media_limit_mb: parse_var("MEDIA_LIMIT_MB")?.unwrap_or(defaults.media_limit_mb),
        })
    }

    /// Full base URL for REST endpoints, e.g. `http://localhost:5000/api`.
    pub fn api_base(&self) -> String {
        let prefix = self.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            self.api_origin.clone()
        } else {
            format!("{}/{}", self.api_origin, prefix)
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn auth_timeout(&self) -> Duration {
        Duration::from_secs(self.auth_timeout_secs)
    }

    /// Largest service image accepted. Saturates rather than wrapping.
    pub fn file_limit_bytes(&self) -> u64 {
        mb_to_bytes(self.file_limit_mb)
    }

    /// Largest media upload accepted.
    pub fn media_limit_bytes(&self) -> u64 {
        mb_to_bytes(self.media_limit_mb)
    }
}

fn mb_to_bytes(mb: u64) -> u64 {
    mb.saturating_mul(1024 * 1024)
}

/// Parse an optional numeric variable. Unset is `None`; set but invalid is an error.
fn parse_var(name: &str) -> Result<Option<u64>> {
    match std::env::var(name) {
        Ok(v) => v
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{} must be a positive integer, got '{}'", name, v)),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "API_ORIGIN",
        "API_PREFIX",
        "LOCALES_URL",
        "LOCALES_DIR",
        "STATE_FILE",
        "REQUEST_TIMEOUT_SECS",
        "AUTH_TIMEOUT_SECS",
        "CAROUSEL_TICK_MS",
        "CAROUSEL_DURATION_MS",
        "FILE_LIMIT_MB",
        "MEDIA_LIMIT_MB",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    // ==================== from_env Tests ====================

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = Config::from_env().expect("defaults should load");

        assert_eq!(config.api_origin, "http://localhost:5000");
        assert_eq!(config.api_prefix, "/api");
        assert!(config.locales_url.is_none());
        assert_eq!(config.request_timeout_secs, 20);
        assert_eq!(config.auth_timeout_secs, 10);
        assert_eq!(config.carousel_tick_ms, 40);
        assert_eq!(config.carousel_duration_ms, 4000);
        assert_eq!(config.file_limit_mb, 20);
        assert_eq!(config.media_limit_bytes(), 100 * 1024 * 1024);
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("API_ORIGIN", "https://api.rock-bridge.example/");
        std::env::set_var("CAROUSEL_DURATION_MS", "6000");
        std::env::set_var("LOCALES_URL", "https://rock-bridge.example/locales");

        let config = Config::from_env().expect("should load");
        clear_env();

        assert_eq!(config.api_origin, "https://api.rock-bridge.example");
        assert_eq!(config.carousel_duration_ms, 6000);
        assert_eq!(
            config.locales_url.as_deref(),
            Some("https://rock-bridge.example/locales")
        );
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_number() {
        clear_env();
        std::env::set_var("CAROUSEL_TICK_MS", "fast");

        let result = Config::from_env();
        clear_env();

        let err = result.unwrap_err().to_string();
        assert!(err.contains("CAROUSEL_TICK_MS"));
    }

    #[test]
    #[serial]
    fn test_from_env_relative_origin_rejected() {
        clear_env();
        std::env::set_var("API_ORIGIN", "localhost:5000");

        let result = Config::from_env();
        clear_env();

        assert!(result.is_err());
    }

    // ==================== Derived Value Tests ====================

    #[test]
    fn test_api_base_joins_prefix() {
        let config = Config::default();
        assert_eq!(config.api_base(), "http://localhost:5000/api");
    }

    #[test]
    fn test_api_base_without_prefix() {
        let config = Config {
            api_prefix: "/".to_string(),
            ..Config::default()
        };
        assert_eq!(config.api_base(), "http://localhost:5000");
    }

    #[test]
    fn test_file_limit_bytes() {
        let config = Config::default();
        assert_eq!(config.file_limit_bytes(), 20 * 1024 * 1024);
    }

    #[test]
    #[serial]
    fn test_huge_limit_saturates() {
        clear_env();
        std::env::set_var("FILE_LIMIT_MB", u64::MAX.to_string());
        std::env::set_var("MEDIA_LIMIT_MB", "17592186044416");

        let config = Config::from_env().expect("should load");
        clear_env();

        assert_eq!(config.file_limit_bytes(), u64::MAX);
        assert_eq!(config.media_limit_bytes(), u64::MAX);
    }
}
