//! Server configuration - defaults, environment, CLI merge.
//!
//! Precedence: CLI flag > `NETLENS_SERVER` environment variable > default.

use std::time::Duration;

/// Default parse-server address.
pub const DEFAULT_SERVER: &str = "http://127.0.0.1:1234";

/// Default parse depth sent with uploads.
pub const DEFAULT_DEPTH: u32 = 3;

/// Request timeout; a response slower than this surfaces as an error.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub base_url: String,
    pub depth: u32,
    pub timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVER.to_string(),
            depth: DEFAULT_DEPTH,
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl ServerConfig {
    /// Merge defaults with environment and CLI overrides.
    pub fn from_env_and_cli(cli_server: Option<String>, cli_depth: Option<u32>) -> Self {
        let base_url = cli_server
            .or_else(|| std::env::var("NETLENS_SERVER").ok())
            .unwrap_or_else(|| DEFAULT_SERVER.to_string());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            depth: cli_depth.unwrap_or(DEFAULT_DEPTH),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_wins() {
        let c = ServerConfig::from_env_and_cli(Some("http://10.0.0.2:8080/".into()), Some(5));
        assert_eq!(c.base_url, "http://10.0.0.2:8080");
        assert_eq!(c.depth, 5);
    }

    #[test]
    fn test_defaults() {
        // Env may be set in the test environment; only assert the shape
        let c = ServerConfig::from_env_and_cli(None, None);
        assert!(!c.base_url.is_empty());
        assert!(!c.base_url.ends_with('/'));
        assert_eq!(c.depth, DEFAULT_DEPTH);
    }
}
