//! Async facade over the panel API.

mod base;
mod client;
mod database;
mod inbound;
mod server;

use std::time::Duration;

use tracing::info;

use crate::config::{self, ApiOptions};
use crate::error::Result;
use crate::session::Session;
use crate::wire::SessionCookie;

pub use client::ClientApi;
pub use database::DatabaseApi;
pub use inbound::InboundApi;
pub use server::ServerApi;

/// Async entry point: composes the four domain APIs over one shared HTTP
/// client and one session.
///
/// A facade instance is not meant to be shared across concurrent tasks;
/// hold one per caller or serialize access externally.
pub struct Api {
    pub client: ClientApi,
    pub inbound: InboundApi,
    pub server: ServerApi,
    pub database: DatabaseApi,
}

impl Api {
    /// Facade with default options (no secret token, system TLS roots).
    pub fn new(host: &str, username: &str, password: &str) -> Result<Self> {
        Self::with_options(host, username, password, ApiOptions::default())
    }

    pub fn with_options(
        host: &str,
        username: &str,
        password: &str,
        options: ApiOptions,
    ) -> Result<Self> {
        let host = config::normalize_host(host)?;
        let http = base::build_http_client(&options.tls)?;
        let make = || {
            base::BaseApi::new(
                Session::new(host.clone(), username, password, options.token.clone()),
                http.clone(),
            )
        };
        Ok(Self {
            client: ClientApi::new(make()),
            inbound: InboundApi::new(make()),
            server: ServerApi::new(make()),
            database: DatabaseApi::new(make()),
        })
    }

    /// Facade configured from `XUI_HOST`, `XUI_USERNAME`, `XUI_PASSWORD`
    /// and the optional `XUI_TOKEN`, `XUI_TLS_VERIFY`, `XUI_TLS_CERT_PATH`.
    pub fn from_env() -> Result<Self> {
        let host = config::require_env(config::ENV_HOST)?;
        let username = config::require_env(config::ENV_USERNAME)?;
        let password = config::require_env(config::ENV_PASSWORD)?;
        Self::with_options(&host, &username, &password, ApiOptions::from_env())
    }

    /// Logs in and fans the captured session cookie out to every domain
    /// API of this facade.
    pub async fn login(&mut self) -> Result<()> {
        self.do_login(None).await
    }

    /// Login for deployments that require a two-factor code.
    pub async fn login_with_code(&mut self, two_factor_code: &str) -> Result<()> {
        self.do_login(Some(two_factor_code)).await
    }

    async fn do_login(&mut self, two_factor_code: Option<&str>) -> Result<()> {
        let cookie = self.client.base.login(two_factor_code).await?;
        self.set_session(Some(cookie));
        info!("logged in to panel");
        Ok(())
    }

    /// The current session cookie, if logged in.
    pub fn session(&self) -> Option<&SessionCookie> {
        self.client.base.session_cookie()
    }

    /// Replaces the session cookie on every domain API. `None` returns the
    /// facade to the unauthenticated state.
    pub fn set_session(&mut self, cookie: Option<SessionCookie>) {
        self.client.base.set_session(cookie.clone());
        self.inbound.base.set_session(cookie.clone());
        self.server.base.set_session(cookie.clone());
        self.database.base.set_session(cookie);
    }

    pub fn max_retries(&self) -> usize {
        self.client.base.max_retries()
    }

    /// Maximum attempts per request, applied to every domain API.
    /// Clamped to at least one.
    pub fn set_max_retries(&mut self, max_retries: usize) {
        self.client.base.set_max_retries(max_retries);
        self.inbound.base.set_max_retries(max_retries);
        self.server.base.set_max_retries(max_retries);
        self.database.base.set_max_retries(max_retries);
    }

    /// Base pause between attempts; the actual pause grows linearly with
    /// the attempt number.
    pub fn set_retry_delay(&mut self, delay: Duration) {
        self.client.base.set_retry_delay(delay);
        self.inbound.base.set_retry_delay(delay);
        self.server.base.set_retry_delay(delay);
        self.database.base.set_retry_delay(delay);
    }

    /// Overrides the cookie names recognized as session cookies, for panel
    /// builds that use a name this crate does not know about.
    pub fn set_cookie_names(&mut self, names: &[&str]) {
        let names: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        self.client.base.set_cookie_names(names.clone());
        self.inbound.base.set_cookie_names(names.clone());
        self.server.base.set_cookie_names(names.clone());
        self.database.base.set_cookie_names(names);
    }
}
