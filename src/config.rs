//! Application Configuration
//!
//! Values baked in at build time from environment variables, with defaults
//! for local development.

use log::LevelFilter;

/// Page size used by the backend; pagination math depends on it matching.
pub const ITEMS_PER_PAGE: u32 = 10;

/// How long a submit confirmation stays visible before leaving the form.
pub const COMPLETION_DELAY_MS: u32 = 1500;

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api/";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// API root; always ends with `/`
    pub api_base_url: String,
    pub log_level: LevelFilter,
}

impl AppConfig {
    /// Build from `RESUME_API_BASE_URL` and `RESUME_LOG_LEVEL` as seen at compile time
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("RESUME_API_BASE_URL"),
            option_env!("RESUME_LOG_LEVEL"),
        )
    }

    pub fn from_values(api_base_url: Option<&str>, log_level: Option<&str>) -> Self {
        let api_base_url = api_base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL);
        let log_level = log_level
            .and_then(|level| level.trim().parse().ok())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.parse().unwrap_or(LevelFilter::Info));

        Self {
            api_base_url: with_trailing_slash(api_base_url),
            log_level,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://127.0.0.1:8000/api/");
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = AppConfig::from_values(Some("https://hr.example.com/api"), Some("debug"));
        assert_eq!(config.api_base_url, "https://hr.example.com/api/");
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_level_falls_back() {
        let config = AppConfig::from_values(Some("  "), Some("loud"));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.log_level, LevelFilter::Info);
    }
}
