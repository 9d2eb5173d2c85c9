//! Per-facade connection state: credentials, the captured session cookie,
//! and the retry knobs. Shared verbatim by the async and blocking base
//! layers so the two keep identical behavior.

use std::time::Duration;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::wire::{self, DEFAULT_COOKIE_NAMES, SessionCookie};

pub(crate) const DEFAULT_MAX_RETRIES: usize = 3;
pub(crate) const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub(crate) struct Session {
    pub host: String,
    pub username: String,
    pub password: String,
    pub token: Option<String>,
    pub cookie: Option<SessionCookie>,
    pub cookie_names: Vec<String>,
    pub max_retries: usize,
    pub retry_delay: Duration,
}

impl Session {
    /// `host` must already be normalized (validated URL, no trailing slash).
    pub fn new(host: String, username: &str, password: &str, token: Option<String>) -> Self {
        Self {
            host,
            username: username.to_string(),
            password: password.to_string(),
            token,
            cookie: None,
            cookie_names: DEFAULT_COOKIE_NAMES.iter().map(|s| s.to_string()).collect(),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    pub fn url(&self, endpoint: &str) -> String {
        wire::join_url(&self.host, endpoint)
    }

    pub fn login_body(&self, two_factor_code: Option<&str>) -> Value {
        wire::login_body(
            &self.username,
            &self.password,
            self.token.as_deref(),
            two_factor_code,
        )
    }

    /// The session cookie, or [`Error::Unauthenticated`] when `login` has
    /// not succeeded yet. Checked before any network traffic happens.
    pub fn require_cookie(&self) -> Result<&SessionCookie> {
        self.cookie.as_ref().ok_or(Error::Unauthenticated)
    }

    /// Pause before the next attempt; grows linearly with the attempt
    /// number so a flapping panel is not hammered.
    pub fn backoff(&self, attempt: usize) -> Duration {
        self.retry_delay * attempt as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_session_refuses_cookie_access() {
        let session = Session::new("http://host.example".into(), "admin", "pw", None);
        assert!(matches!(
            session.require_cookie(),
            Err(Error::Unauthenticated)
        ));
    }

    #[test]
    fn backoff_grows_linearly() {
        let mut session = Session::new("http://host.example".into(), "admin", "pw", None);
        session.retry_delay = Duration::from_millis(10);
        assert_eq!(session.backoff(1), Duration::from_millis(10));
        assert_eq!(session.backoff(2), Duration::from_millis(20));
    }
}
