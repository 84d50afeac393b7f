//! Client Configuration
//!
//! Where the REST API lives and how reads are retried.

use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "/api";
const DEFAULT_READ_RETRIES: u32 = 2;
const DEFAULT_RETRY_BASE_DELAY_MS: u32 = 200;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Extra attempts for GET requests after a transient failure
    #[serde(default = "default_read_retries")]
    pub read_retries: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_read_retries() -> u32 {
    DEFAULT_READ_RETRIES
}

fn default_retry_base_delay_ms() -> u32 {
    DEFAULT_RETRY_BASE_DELAY_MS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            read_retries: DEFAULT_READ_RETRIES,
            retry_base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
        }
    }
}

impl ApiConfig {
    /// Build-time override via `KANBAN_API_BASE_URL`, defaults otherwise
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = option_env!("KANBAN_API_BASE_URL") {
            config.base_url = url.to_string();
        }
        config
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.read_retries,
            base_delay_ms: self.retry_base_delay_ms,
        }
    }

    /// Joins `path` onto the base url without doubling slashes
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Bounded exponential backoff for read requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay_ms: u32,
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (0-based)
    pub fn delay_ms(&self, attempt: u32) -> u32 {
        self.base_delay_ms.saturating_mul(1u32 << attempt.min(16))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ApiConfig::from_json(r#"{"baseUrl": "https://kanban.example.com/api/"}"#).unwrap();
        assert_eq!(config.read_retries, 2);
        assert_eq!(config.url("/boards"), "https://kanban.example.com/api/boards");
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = ApiConfig::default().retry_policy();
        assert_eq!(policy.delay_ms(0), 200);
        assert_eq!(policy.delay_ms(1), 400);
        assert_eq!(policy.delay_ms(2), 800);
    }

    #[test]
    fn test_backoff_saturates() {
        let policy = RetryPolicy { max_retries: 40, base_delay_ms: u32::MAX / 2 };
        assert_eq!(policy.delay_ms(30), u32::MAX);
    }
}
