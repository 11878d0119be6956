//! Explicit runtime configuration.
//!
//! The credential and transport settings are read from the environment exactly
//! once, at startup, and passed into the client from there. Nothing else in
//! the crate reads ambient state.

use std::time::Duration;

const DEFAULT_USER_AGENT: &str = concat!("snip/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings shared by every remote call.
#[derive(Debug, Clone)]
pub struct Config {
    /// Personal access token, if any. Required for private repositories;
    /// raises the rate limit for public ones.
    pub token: Option<String>,
    /// Value sent in the `User-Agent` header. GitHub rejects requests without one.
    pub user_agent: String,
    /// Per-request timeout enforced by the transport.
    pub timeout: Duration,
}

impl Config {
    /// Build a configuration from the `GITHUB_TOKEN` environment variable and
    /// the built-in defaults. An empty token counts as no token.
    pub fn from_env() -> Self {
        let token = std::env::var("GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());
        Self {
            token,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Whether a credential is configured.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
