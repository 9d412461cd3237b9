use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Completion service API key
    pub openai_api_key: String,

    /// Completion service base URL (OpenAI-compatible)
    #[serde(default = "default_openai_api_url")]
    pub openai_api_url: String,

    /// Chat model used for recommendations
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Prefix joined with a TMDB `poster_path` to form the poster URL
    #[serde(default = "default_tmdb_image_base_url")]
    pub tmdb_image_base_url: String,

    /// Placeholder poster used whenever a lookup fails
    #[serde(default = "default_poster_url")]
    pub default_poster_url: String,

    /// Per-request timeout for outbound calls. Unset means no timeout.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Attempts per outbound call (1 = no retry)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Re-sort resolved candidates by rating instead of trusting the model's order
    #[serde(default)]
    pub resort_by_rating: bool,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_openai_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo-1106".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_poster_url() -> String {
    "https://image.tmdb.org/t/p/w500/iiZZdoQBEYBv6id8su7ImL0oCbD.jpg".to_string()
}

fn default_max_attempts() -> u32 {
    1
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Timeout and attempt policy shared by the outbound clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestPolicy {
    pub timeout: Option<Duration>,
    pub max_attempts: u32,
}

impl Default for RequestPolicy {
    fn default() -> Self {
        Self {
            timeout: None,
            max_attempts: 1,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn request_policy(&self) -> RequestPolicy {
        RequestPolicy {
            timeout: self.request_timeout_secs.map(Duration::from_secs),
            max_attempts: self.max_attempts.max(1),
        }
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_applied() {
        let config: Config = envy::from_iter(vars(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("TMDB_API_KEY", "tmdb-test"),
        ]))
        .unwrap();

        assert_eq!(config.openai_model, "gpt-3.5-turbo-1106");
        assert_eq!(config.tmdb_image_base_url, "https://image.tmdb.org/t/p/w500");
        assert_eq!(config.max_attempts, 1);
        assert_eq!(config.request_timeout_secs, None);
        assert!(!config.resort_by_rating);
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.request_policy(), RequestPolicy::default());
    }

    #[test]
    fn test_missing_api_key_fails() {
        let result = envy::from_iter::<_, Config>(vars(&[("TMDB_API_KEY", "tmdb-test")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_request_policy_overrides() {
        let config: Config = envy::from_iter(vars(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("TMDB_API_KEY", "tmdb-test"),
            ("REQUEST_TIMEOUT_SECS", "15"),
            ("MAX_ATTEMPTS", "0"),
        ]))
        .unwrap();

        let policy = config.request_policy();
        assert_eq!(policy.timeout, Some(Duration::from_secs(15)));
        // zero attempts is clamped to a single attempt
        assert_eq!(policy.max_attempts, 1);
    }
}
