use thiserror::Error;

/// Errors surfaced by the panel client.
///
/// Every operation either fully succeeds with a typed result or fails with
/// one of these; there is no partial-success state. Only transport failures
/// are retried internally (see [`Error::Transport`]), everything else is
/// raised on the first occurrence.
#[derive(Debug, Error)]
pub enum Error {
    /// A required credential or setting is missing or unusable. Raised at
    /// construction time (`new`, `from_env`), never mid-request.
    #[error("configuration error: {0}")]
    Config(String),

    /// The panel rejected the login, or the login response carried no
    /// recognizable session cookie. The facade stays unauthenticated.
    #[error("login failed: {0}")]
    Login(String),

    /// An authenticated endpoint was called before a successful `login`.
    #[error("not logged in; call login() before issuing panel requests")]
    Unauthenticated,

    /// Network failure, timeout, TLS failure or non-2xx status that
    /// persisted through every retry attempt. Carries the last error.
    #[error("request to {url} failed after {attempts} attempt(s)")]
    Transport {
        url: String,
        attempts: usize,
        #[source]
        source: reqwest::Error,
    },

    /// The panel answered with a well-formed envelope whose success flag is
    /// false. Carries the server-supplied message. Not retried: this is a
    /// remote-side rejection, not a transport problem.
    #[error("panel rejected the request: {0}")]
    Api(String),

    /// The response body was not valid JSON, or a model field failed its
    /// shape contract (including malformed JSON-encoded string sub-fields).
    #[error("invalid response payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// Writing a downloaded backup to disk failed.
    #[error("backup file write failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
