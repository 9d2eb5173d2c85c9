//! Typed client SDK for the 3x-ui panel HTTP API.
//!
//! The panel exposes a cookie-authenticated JSON API; this crate wraps it
//! with typed models and four domain APIs (clients, inbounds, server,
//! database), composed behind a facade in two flavors with the same method
//! surface:
//!
//! - [`Api`] — async, suspends on network I/O;
//! - [`blocking::Api`] — every call blocks the current thread.
//!
//! ```no_run
//! use xui_client::Api;
//!
//! # async fn run() -> Result<(), xui_client::Error> {
//! let mut api = Api::new("https://xui.example.com:2053", "admin", "secret")?;
//! api.login().await?;
//!
//! let inbounds = api.inbound.get_list().await?;
//! if let Some(client) = api.client.get_by_email("alice@example.com").await? {
//!     println!("used {} bytes", client.up + client.down);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Credentials can also come from the environment (`XUI_HOST`,
//! `XUI_USERNAME`, `XUI_PASSWORD`, plus optional `XUI_TOKEN`,
//! `XUI_TLS_VERIFY`, `XUI_TLS_CERT_PATH`) via [`Api::from_env`].
//!
//! Logging goes through `tracing`; without a subscriber installed every
//! call-site is a no-op.

mod api;
mod config;
mod error;
mod session;
mod wire;

pub mod blocking;
pub mod models;

pub use api::{Api, ClientApi, DatabaseApi, InboundApi, ServerApi};
pub use config::{ApiOptions, TlsPolicy};
pub use error::{Error, Result};
pub use wire::{DEFAULT_COOKIE_NAMES, SessionCookie};
