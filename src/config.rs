//! Client Configuration
//!
//! Values are fixed at build time (`MONTY_API_BASE`, `MONTY_LOG`) with
//! runtime fallbacks supplied by the caller.

use std::time::Duration;

use log::LevelFilter;

/// Backend used when neither the build nor the page provides one
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// localStorage key holding the bearer token
pub const DEFAULT_TOKEN_KEY: &str = "token";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Origin of the REST backend, without trailing slash
    pub api_base: String,
    /// Storage key for the bearer token
    pub token_key: String,
    /// How long a notice stays on screen
    pub notice_ttl: Duration,
    /// Age after which a cached list is re-fetched on next read
    pub stale_after: Duration,
    /// Extra attempts for reads that fail transiently
    pub fetch_retries: u32,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            notice_ttl: Duration::from_secs(4),
            stale_after: Duration::from_secs(30),
            fetch_retries: 1,
            log_level: LevelFilter::Info,
        }
    }
}

impl AppConfig {
    /// Build the config, preferring build-time overrides over `page_origin`.
    pub fn resolve(page_origin: Option<String>) -> Self {
        Self::from_parts(
            option_env!("MONTY_API_BASE"),
            option_env!("MONTY_LOG"),
            page_origin,
        )
    }

    fn from_parts(api_base: Option<&str>, log: Option<&str>, page_origin: Option<String>) -> Self {
        let defaults = Self::default();
        let api_base = api_base
            .map(str::to_string)
            .or(page_origin)
            .filter(|base| !base.trim().is_empty())
            .unwrap_or(defaults.api_base);
        let log_level = log
            .and_then(|level| level.parse().ok())
            .unwrap_or(defaults.log_level);

        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            log_level,
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_override_wins() {
        let config = AppConfig::from_parts(
            Some("https://api.school.test/"),
            None,
            Some("http://localhost:5173".into()),
        );
        assert_eq!(config.api_base, "https://api.school.test");
    }

    #[test]
    fn test_page_origin_fallback() {
        let config = AppConfig::from_parts(None, None, Some("http://localhost:5173".into()));
        assert_eq!(config.api_base, "http://localhost:5173");
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_parts(None, Some("not-a-level"), None);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.log_level, LevelFilter::Info);
        assert_eq!(config.notice_ttl, Duration::from_secs(4));
        assert_eq!(config.token_key, "token");
        assert_eq!(config.fetch_retries, 1);
    }

    #[test]
    fn test_log_level_parse() {
        let config = AppConfig::from_parts(None, Some("debug"), None);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }
}
