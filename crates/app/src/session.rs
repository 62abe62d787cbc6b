//! Session tokens for the marketplace API.

use std::fmt;

use thiserror::Error;
use zeroize::Zeroize;

/// Cookie holding the session token when none is configured explicitly.
pub const DEFAULT_SESSION_COOKIE: &str = "token";

/// Errors resolving the bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Neither an API token nor a session cookie was supplied.
    #[error("no API token or session cookie configured")]
    Missing,

    /// The supplied token is blank.
    #[error("access token is empty")]
    Empty,

    /// The cookie header has no cookie with the expected name.
    #[error("cookie header has no `{0}` cookie")]
    CookieNotFound(String),
}

/// Bearer token sent with every API request.
#[derive(Clone)]
pub struct AccessToken {
    value: String,
}

impl AccessToken {
    /// Wrap a raw token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Empty`] for blank input.
    pub fn new(raw: &str) -> Result<Self, SessionError> {
        let value = raw.trim();

        if value.is_empty() {
            return Err(SessionError::Empty);
        }

        Ok(Self {
            value: value.to_string(),
        })
    }

    /// Take the token from a `Cookie` header value such as
    /// `theme=dark; token=abc`.
    ///
    /// # Errors
    ///
    /// Returns an error when the cookie is absent or empty.
    pub fn from_cookie_header(header: &str, name: &str) -> Result<Self, SessionError> {
        let value = header
            .split(';')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| key.trim() == name)
            .map(|(_, value)| value.trim().trim_matches('"'))
            .ok_or_else(|| SessionError::CookieNotFound(name.to_string()))?;

        Self::new(value)
    }

    /// Pick the explicit token when present, else read it from the cookie
    /// header.
    ///
    /// # Errors
    ///
    /// Returns an error when neither source yields a token.
    pub fn resolve(
        api_token: Option<&str>,
        cookie_header: Option<&str>,
        cookie_name: &str,
    ) -> Result<Self, SessionError> {
        match (api_token, cookie_header) {
            (Some(token), _) => Self::new(token),
            (None, Some(header)) => Self::from_cookie_header(header, cookie_name),
            (None, None) => Err(SessionError::Missing),
        }
    }

    /// Raw token text.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(**redacted**)")
    }
}

impl Drop for AccessToken {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn reads_named_cookie() -> TestResult {
        let token = AccessToken::from_cookie_header("theme=dark; token=abc123; lang=en", "token")?;

        assert_eq!(token.expose(), "abc123");

        Ok(())
    }

    #[test]
    fn missing_cookie_is_reported() {
        assert_eq!(
            AccessToken::from_cookie_header("theme=dark", "token").err(),
            Some(SessionError::CookieNotFound("token".to_string()))
        );
    }

    #[test]
    fn explicit_token_wins_over_cookie() -> TestResult {
        let token = AccessToken::resolve(Some("direct"), Some("token=cookie"), "token")?;

        assert_eq!(token.expose(), "direct");

        Ok(())
    }

    #[test]
    fn blank_token_is_rejected() {
        assert_eq!(AccessToken::new("  ").err(), Some(SessionError::Empty));
        assert_eq!(
            AccessToken::resolve(None, None, DEFAULT_SESSION_COOKIE).err(),
            Some(SessionError::Missing)
        );
    }

    #[test]
    fn debug_output_is_redacted() -> TestResult {
        let token = AccessToken::new("secret")?;

        assert_eq!(format!("{token:?}"), "AccessToken(**redacted**)");

        Ok(())
    }
}
