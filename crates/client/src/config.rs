//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `AOS_API_URL` - Base URL of the AOS MICEPP backend
//!   (default: `http://localhost:8089/AOS_MICEPP`)
//! - `AOS_STATE_DIR` - Directory for the durable session state
//!   (default: `~/.aos-micepp`)
//! - `AOS_HTTP_TIMEOUT_SECS` - Per-request HTTP timeout (default: 30)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:8089/AOS_MICEPP";
const DEFAULT_STATE_DIR: &str = ".aos-micepp";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// AOS MICEPP client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend, normalized to end with a slash so endpoint
    /// paths can be joined onto it.
    pub api_url: Url,
    /// Directory holding the durable session state file.
    pub state_dir: PathBuf,
    /// Per-request HTTP timeout.
    pub http_timeout: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparsable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_api_url(&get_env_or_default("AOS_API_URL", DEFAULT_API_URL))?;

        let state_dir = get_optional_env("AOS_STATE_DIR").map_or_else(default_state_dir, PathBuf::from);

        let http_timeout_secs = get_env_or_default(
            "AOS_HTTP_TIMEOUT_SECS",
            &DEFAULT_HTTP_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar("AOS_HTTP_TIMEOUT_SECS".to_string(), e.to_string()))?;

        Ok(Self {
            api_url,
            state_dir,
            http_timeout: Duration::from_secs(http_timeout_secs),
        })
    }
}

/// Parse and normalize the backend base URL.
///
/// `Url::join` drops the last path segment of a base without a trailing
/// slash, so one is appended here once instead of at every call site.
fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let normalized = if raw.ends_with('/') {
        raw.to_owned()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized)
        .map_err(|e| ConfigError::InvalidEnvVar("AOS_API_URL".to_string(), e.to_string()))
}

/// State directory under the user's home, falling back to the working
/// directory when no home is known.
fn default_state_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_STATE_DIR)
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_url_appends_slash() {
        let url = parse_api_url("http://localhost:8089/AOS_MICEPP").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8089/AOS_MICEPP/");

        // Joining keeps the application prefix intact.
        let joined = url.join("requests").unwrap();
        assert_eq!(joined.as_str(), "http://localhost:8089/AOS_MICEPP/requests");
    }

    #[test]
    fn test_parse_api_url_idempotent_slash() {
        let url = parse_api_url("http://localhost:8089/AOS_MICEPP/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8089/AOS_MICEPP/");
    }

    #[test]
    fn test_parse_api_url_rejects_garbage() {
        assert!(parse_api_url("not a url").is_err());
    }

    #[test]
    fn test_default_state_dir_is_namespaced() {
        assert!(default_state_dir().ends_with(DEFAULT_STATE_DIR));
    }
}
