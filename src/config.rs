use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://export.arxiv.org/api/query";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: default_user_agent(),
            timeout: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("ARXIV_API_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let user_agent = lookup("ARXIV_USER_AGENT")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(default_user_agent);
        let timeout = lookup("ARXIV_TIMEOUT_SECS").and_then(|raw| {
            match raw.trim().parse::<u64>() {
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => {
                    tracing::warn!(
                        "Ignoring ARXIV_TIMEOUT_SECS={:?}: not a number of seconds",
                        raw
                    );
                    None
                }
            }
        });

        Self {
            base_url,
            user_agent,
            timeout,
        }
    }

    /// Configuration pointing at a local mock server.
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout: Some(Duration::from_secs(5)),
            ..Self::default()
        }
    }
}

fn default_user_agent() -> String {
    format!("arxiv-search/{}", env!("CARGO_PKG_VERSION"))
}
