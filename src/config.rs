//! Construction-time configuration: TLS trust policy, optional secret
//! token, and the environment-variable surface used by `from_env`.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const ENV_HOST: &str = "XUI_HOST";
pub const ENV_USERNAME: &str = "XUI_USERNAME";
pub const ENV_PASSWORD: &str = "XUI_PASSWORD";
pub const ENV_TOKEN: &str = "XUI_TOKEN";
pub const ENV_TLS_VERIFY: &str = "XUI_TLS_VERIFY";
pub const ENV_TLS_CERT_PATH: &str = "XUI_TLS_CERT_PATH";

/// How the server certificate is trusted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsPolicy {
    /// Verify against the system trust store.
    #[default]
    SystemRoots,
    /// Skip certificate verification entirely. Unsafe; logged as a warning
    /// when the HTTP client is built.
    Insecure,
    /// Trust the PEM certificate at this path instead of the system store.
    CustomCa(PathBuf),
}

/// Optional construction parameters for a facade.
#[derive(Debug, Clone, Default)]
pub struct ApiOptions {
    /// Static secret token some deployments require alongside the
    /// credentials (sent as `loginSecret` with the login request).
    pub token: Option<String>,
    pub tls: TlsPolicy,
}

impl ApiOptions {
    pub(crate) fn from_env() -> Self {
        let tls = match env::var(ENV_TLS_CERT_PATH) {
            Ok(path) if !path.is_empty() => TlsPolicy::CustomCa(PathBuf::from(path)),
            _ => match env::var(ENV_TLS_VERIFY) {
                Ok(v) if is_falsy(&v) => TlsPolicy::Insecure,
                _ => TlsPolicy::SystemRoots,
            },
        };
        Self {
            token: env::var(ENV_TOKEN).ok().filter(|t| !t.is_empty()),
            tls,
        }
    }
}

pub(crate) fn require_env(key: &str) -> Result<String> {
    env::var(key).map_err(|_| Error::Config(format!("environment variable {key} is not set")))
}

fn is_falsy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}

/// Validates the host URL and strips the trailing slash. The host may carry
/// a URI prefix (`https://host/sub/path`) which must survive untouched.
pub(crate) fn normalize_host(host: &str) -> Result<String> {
    let parsed = url::Url::parse(host)
        .map_err(|e| Error::Config(format!("invalid host URL {host:?}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "unsupported host URL scheme {:?}",
            parsed.scheme()
        )));
    }
    Ok(host.trim_end_matches('/').to_string())
}

/// Loads a caller-supplied PEM certificate for [`TlsPolicy::CustomCa`].
/// `reqwest::Certificate` is shared by the async and blocking clients.
pub(crate) fn load_certificate(path: &Path) -> Result<reqwest::Certificate> {
    let pem = std::fs::read(path).map_err(|e| {
        Error::Config(format!("cannot read certificate {}: {e}", path.display()))
    })?;
    reqwest::Certificate::from_pem(&pem).map_err(|e| {
        Error::Config(format!("invalid certificate {}: {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_host_keeps_sub_path() {
        assert_eq!(
            normalize_host("https://xui.example.com/secret/panel/").unwrap(),
            "https://xui.example.com/secret/panel"
        );
        assert_eq!(
            normalize_host("http://127.0.0.1:2053").unwrap(),
            "http://127.0.0.1:2053"
        );
    }

    #[test]
    fn normalize_host_rejects_garbage() {
        assert!(matches!(normalize_host("not a url"), Err(Error::Config(_))));
        assert!(matches!(
            normalize_host("ftp://host.example"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn missing_env_var_is_a_config_error() {
        assert!(matches!(
            require_env("XUI_TEST_SURELY_UNSET"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn falsy_flag_values() {
        for v in ["false", "0", "no", "off", "False", " NO "] {
            assert!(is_falsy(v), "{v:?} should disable verification");
        }
        for v in ["true", "1", "yes", ""] {
            assert!(!is_falsy(v), "{v:?} should keep verification on");
        }
    }
}
