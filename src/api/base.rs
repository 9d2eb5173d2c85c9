//! Async request layer: authenticated GET/POST with bounded retry.

use std::time::Duration;

use reqwest::header::{ACCEPT, COOKIE};
use reqwest::{Client as HttpClient, Method, Response};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{TlsPolicy, load_certificate};
use crate::error::{Error, Result};
use crate::session::Session;
use crate::wire::{self, SessionCookie, endpoint};

/// Builds the shared HTTP client according to the TLS trust policy.
pub(crate) fn build_http_client(tls: &TlsPolicy) -> Result<HttpClient> {
    let mut builder = HttpClient::builder();
    match tls {
        TlsPolicy::SystemRoots => {}
        TlsPolicy::Insecure => {
            warn!("TLS certificate verification is disabled; connections are not authenticated");
            builder = builder.danger_accept_invalid_certs(true);
        }
        TlsPolicy::CustomCa(path) => {
            builder = builder.add_root_certificate(load_certificate(path)?);
        }
    }
    builder
        .build()
        .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))
}

pub(crate) struct BaseApi {
    session: Session,
    http: HttpClient,
}

impl BaseApi {
    pub fn new(session: Session, http: HttpClient) -> Self {
        Self { session, http }
    }

    pub fn session_cookie(&self) -> Option<&SessionCookie> {
        self.session.cookie.as_ref()
    }

    pub fn set_session(&mut self, cookie: Option<SessionCookie>) {
        self.session.cookie = cookie;
    }

    pub fn max_retries(&self) -> usize {
        self.session.max_retries
    }

    pub fn set_max_retries(&mut self, max_retries: usize) {
        self.session.max_retries = max_retries.max(1);
    }

    pub fn set_retry_delay(&mut self, delay: Duration) {
        self.session.retry_delay = delay;
    }

    pub fn set_cookie_names(&mut self, names: Vec<String>) {
        self.session.cookie_names = names;
    }

    /// Logs in and captures the session cookie. A response without a
    /// recognizable cookie, or with a false success flag, is a login
    /// failure and leaves the state unauthenticated.
    pub async fn login(&mut self, two_factor_code: Option<&str>) -> Result<SessionCookie> {
        let url = self.session.url(endpoint::LOGIN);
        let body = self.session.login_body(two_factor_code);
        info!(username = %self.session.username, "logging in to panel");

        let response = self.execute(Method::POST, &url, Some(&body), false).await?;
        let cookies: Vec<(String, String)> = response
            .cookies()
            .map(|c| (c.name().to_string(), c.value().to_string()))
            .collect();
        let text = response.text().await.map_err(|e| body_error(&url, e))?;

        wire::parse_envelope(&text).map_err(|e| match e {
            Error::Api(msg) => Error::Login(msg),
            other => other,
        })?;

        let cookie = wire::find_session_cookie(&self.session.cookie_names, &cookies)
            .ok_or_else(|| Error::Login("no session cookie in login response".to_string()))?;
        debug!(cookie = %cookie.name, "session cookie captured");
        self.session.cookie = Some(cookie.clone());
        Ok(cookie)
    }

    /// Authenticated GET returning the envelope payload.
    pub async fn get(&self, endpoint: &str) -> Result<Value> {
        self.session.require_cookie()?;
        let url = self.session.url(endpoint);
        let response = self.execute(Method::GET, &url, None, true).await?;
        let text = response.text().await.map_err(|e| body_error(&url, e))?;
        wire::parse_envelope(&text)
    }

    /// Authenticated POST with a JSON body, returning the envelope payload.
    pub async fn post(&self, endpoint: &str, body: &Value) -> Result<Value> {
        self.session.require_cookie()?;
        let url = self.session.url(endpoint);
        let response = self.execute(Method::POST, &url, Some(body), true).await?;
        let text = response.text().await.map_err(|e| body_error(&url, e))?;
        wire::parse_envelope(&text)
    }

    /// Authenticated GET returning the raw body, skipping envelope
    /// validation. Used for the backup endpoints.
    pub async fn get_raw(&self, endpoint: &str) -> Result<Vec<u8>> {
        self.session.require_cookie()?;
        let url = self.session.url(endpoint);
        let response = self.execute(Method::GET, &url, None, true).await?;
        let bytes = response.bytes().await.map_err(|e| body_error(&url, e))?;
        Ok(bytes.to_vec())
    }

    /// One logical request with up to `max_retries` attempts. Network
    /// errors and non-2xx statuses are retried with a linear backoff;
    /// exhausting the attempts surfaces the last error. Remote-side
    /// rejections (false success flag) never reach this path's retry
    /// handling since the envelope is only checked by the caller.
    async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        with_session: bool,
    ) -> Result<Response> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            debug!(%url, attempt, "panel request");

            let mut request = self
                .http
                .request(method.clone(), url)
                .header(ACCEPT, "application/json");
            if with_session {
                // Presence was checked before entering the retry loop.
                if let Some(cookie) = self.session.cookie.as_ref() {
                    request = request.header(COOKIE, cookie.header_value());
                }
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            let failure = match request.send().await {
                Ok(response) => match response.error_for_status() {
                    Ok(response) => return Ok(response),
                    Err(err) => err,
                },
                Err(err) => err,
            };

            if attempt >= self.session.max_retries {
                return Err(Error::Transport {
                    url: url.to_string(),
                    attempts: attempt,
                    source: failure,
                });
            }
            warn!(
                %url,
                attempt,
                max_retries = self.session.max_retries,
                error = %failure,
                "panel request failed, retrying"
            );
            tokio::time::sleep(self.session.backoff(attempt)).await;
        }
    }
}

fn body_error(url: &str, source: reqwest::Error) -> Error {
    Error::Transport {
        url: url.to_string(),
        attempts: 1,
        source,
    }
}
