//! Configuration

use std::time::Duration;

use clap::Args;

use crate::session::{AccessToken, SessionError};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// Marketplace API settings.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// Marketplace API base URL
    #[arg(long, env = "NEST_API_URL")]
    pub api_url: String,

    /// Bearer token for the marketplace API
    #[arg(long, env = "API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Cookie header to read the session token from when no API token is set
    #[arg(long, env = "SESSION_COOKIE", hide_env_values = true)]
    pub session_cookie: Option<String>,

    /// Name of the session cookie
    #[arg(long, env = "SESSION_COOKIE_NAME", default_value = "token")]
    pub session_cookie_name: String,

    /// Request timeout in seconds
    #[arg(long, env = "API_TIMEOUT_SECONDS", default_value_t = 30_u64)]
    pub timeout_seconds: u64,
}

impl ApiConfig {
    /// Resolve the bearer token from the configured sources.
    ///
    /// # Errors
    ///
    /// Returns an error if no usable token is configured.
    pub fn access_token(&self) -> Result<AccessToken, SessionError> {
        AccessToken::resolve(
            self.api_token.as_deref(),
            self.session_cookie.as_deref(),
            &self.session_cookie_name,
        )
    }

    /// Request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
