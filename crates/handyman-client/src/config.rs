use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const BASE_URL_ENV: &str = "HANDYMAN_API_BASE_URL";

/// Artificial latency applied to every mock response.
pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(100);
pub const DEFAULT_MOCK_SEED: u64 = 20_240_501;

/// Client settings, fixed at construction.
///
/// `use_mocks` is a development switch set by code, never by the environment.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub use_mocks: bool,
    pub mock_seed: u64,
    pub mock_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            use_mocks: false,
            mock_seed: DEFAULT_MOCK_SEED,
            mock_delay: DEFAULT_MOCK_DELAY,
        }
    }

    /// Base URL from `HANDYMAN_API_BASE_URL`, falling back to the local dev server.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        Self::new(base_url)
    }

    pub fn with_mocks(mut self, enabled: bool) -> Self {
        self.use_mocks = enabled;
        self
    }

    pub fn with_mock_delay(mut self, delay: Duration) -> Self {
        self.mock_delay = delay;
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_server_without_mocks() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert!(!config.use_mocks);
        assert_eq!(config.mock_delay, DEFAULT_MOCK_DELAY);
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ClientConfig::new("https://api.example.com/v1/");
        assert_eq!(config.url("/orders"), "https://api.example.com/v1/orders");
    }
}
