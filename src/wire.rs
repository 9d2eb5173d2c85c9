//! Shared wire contract for the panel API.
//!
//! Both the async and blocking façades speak the same protocol: a JSON
//! envelope with `success`/`msg`/`obj` fields, a session cookie whose name
//! varies between panel builds, and endpoint paths rooted under the host
//! (which may itself carry a URI prefix). Everything protocol-shaped lives
//! here so the two transports cannot drift apart.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::Client;

/// Cookie names used by known panel builds for the session token.
pub const DEFAULT_COOKIE_NAMES: &[&str] = &["3x-ui", "session"];

/// Sentinel the panel returns from the client-IPs endpoint when a client
/// has no recorded addresses.
pub(crate) const NO_IP_RECORD: &str = "No IP Record";

/// A session cookie captured from a login response.
///
/// The panel's cookie name is version-dependent, so the name that actually
/// matched is remembered alongside the value and replayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Renders the `Cookie` request-header value.
    pub(crate) fn header_value(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// The `{success, msg, obj}` envelope every JSON endpoint answers with.
///
/// Fields are defaulted so that a panel build with a slightly different
/// envelope degrades to a clean API error instead of a parse failure.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub obj: Value,
}

/// Parses a response body into the envelope and extracts the payload.
///
/// A body that is not valid JSON is a parse error; a false success flag is
/// an API error carrying the server message.
pub(crate) fn parse_envelope(body: &str) -> Result<Value> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if !envelope.success {
        return Err(Error::Api(envelope.msg));
    }
    Ok(envelope.obj)
}

/// Joins the host (already validated, possibly carrying a URI prefix) with
/// an endpoint path without dropping the prefix or doubling the slash.
pub(crate) fn join_url(host: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        host.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// Scans response cookies for the first known session-cookie name.
///
/// Names are checked in list order so a caller-supplied name can take
/// precedence over the defaults.
pub(crate) fn find_session_cookie(
    names: &[String],
    cookies: &[(String, String)],
) -> Option<SessionCookie> {
    for name in names {
        if let Some((_, value)) = cookies.iter().find(|(n, _)| n == name) {
            return Some(SessionCookie::new(name.clone(), value.clone()));
        }
    }
    None
}

/// Builds the login request body: credentials, plus the optional static
/// secret token and the optional two-factor code.
pub(crate) fn login_body(
    username: &str,
    password: &str,
    token: Option<&str>,
    two_factor_code: Option<&str>,
) -> Value {
    let mut body = serde_json::json!({
        "username": username,
        "password": password,
    });
    if let Some(token) = token {
        body["loginSecret"] = token.into();
    }
    if let Some(code) = two_factor_code {
        body["twoFactorCode"] = code.into();
    }
    body
}

/// Wraps a client list in the shape the add/update-client endpoints expect:
/// the inbound id plus a `settings` field that is itself a JSON-encoded
/// string containing `{"clients": [...]}`.
pub(crate) fn client_settings_body(inbound_id: i64, clients: &[Client]) -> Result<Value> {
    let settings = serde_json::to_string(&serde_json::json!({ "clients": clients }))?;
    Ok(serde_json::json!({ "id": inbound_id, "settings": settings }))
}

/// Endpoint paths, shared between the async and blocking façades.
pub(crate) mod endpoint {
    pub const LOGIN: &str = "login";

    pub const INBOUND_LIST: &str = "panel/api/inbounds/list";
    pub const INBOUND_ADD: &str = "panel/api/inbounds/add";
    pub const INBOUND_RESET_ALL_STATS: &str = "panel/api/inbounds/resetAllTraffics";

    pub const CLIENT_ADD: &str = "panel/api/inbounds/addClient";
    pub const CLIENTS_ONLINE: &str = "panel/api/inbounds/onlines";

    pub const SERVER_STATUS: &str = "server/status";
    pub const SERVER_GET_DB: &str = "server/getDb";
    pub const DATABASE_EXPORT: &str = "panel/api/inbounds/createbackup";

    pub fn inbound_update(inbound_id: i64) -> String {
        format!("panel/api/inbounds/update/{inbound_id}")
    }

    pub fn inbound_delete(inbound_id: i64) -> String {
        format!("panel/api/inbounds/del/{inbound_id}")
    }

    pub fn inbound_reset_client_stats(inbound_id: i64) -> String {
        format!("panel/api/inbounds/resetAllClientTraffics/{inbound_id}")
    }

    pub fn client_traffics(email: &str) -> String {
        format!("panel/api/inbounds/getClientTraffics/{email}")
    }

    pub fn client_traffics_by_id(client_uuid: &str) -> String {
        format!("panel/api/inbounds/getClientTrafficsById/{client_uuid}")
    }

    pub fn client_ips(email: &str) -> String {
        format!("panel/api/inbounds/clientIps/{email}")
    }

    pub fn client_clear_ips(email: &str) -> String {
        format!("panel/api/inbounds/clearClientIps/{email}")
    }

    pub fn client_update(client_uuid: &str) -> String {
        format!("panel/api/inbounds/updateClient/{client_uuid}")
    }

    pub fn client_reset_stats(inbound_id: i64, email: &str) -> String {
        format!("panel/api/inbounds/{inbound_id}/resetClientTraffic/{email}")
    }

    pub fn client_delete(inbound_id: i64, client_uuid: &str) -> String {
        format!("panel/api/inbounds/{inbound_id}/delClient/{client_uuid}")
    }

    pub fn client_delete_depleted(inbound_id: i64) -> String {
        format!("panel/api/inbounds/delDepletedClients/{inbound_id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClientId;

    #[test]
    fn join_url_preserves_uri_prefix() {
        assert_eq!(
            join_url("https://host.example/panel", "login"),
            "https://host.example/panel/login"
        );
        assert_eq!(
            join_url("https://host.example/panel/", "login"),
            "https://host.example/panel/login"
        );
        assert_eq!(
            join_url("https://host.example", "panel/api/inbounds/list"),
            "https://host.example/panel/api/inbounds/list"
        );
    }

    #[test]
    fn envelope_success_yields_obj() {
        let obj = parse_envelope(r#"{"success": true, "msg": "", "obj": {"id": 7}}"#).unwrap();
        assert_eq!(obj["id"], 7);
    }

    #[test]
    fn envelope_failure_carries_server_message() {
        let err = parse_envelope(r#"{"success": false, "msg": "bad inbound", "obj": null}"#)
            .unwrap_err();
        match err {
            Error::Api(msg) => assert_eq!(msg, "bad inbound"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn envelope_rejects_non_json_body() {
        assert!(matches!(
            parse_envelope("<html>login page</html>"),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn envelope_missing_success_flag_reads_as_failure() {
        assert!(matches!(parse_envelope(r#"{"obj": 1}"#), Err(Error::Api(_))));
    }

    #[test]
    fn cookie_scan_respects_name_order_and_custom_names() {
        let names: Vec<String> = DEFAULT_COOKIE_NAMES.iter().map(|s| s.to_string()).collect();
        let cookies = vec![
            ("lang".to_string(), "en".to_string()),
            ("session".to_string(), "abc".to_string()),
        ];
        let found = find_session_cookie(&names, &cookies).unwrap();
        assert_eq!(found.name, "session");
        assert_eq!(found.value, "abc");
        assert_eq!(found.header_value(), "session=abc");

        let custom = vec!["x-ui-token".to_string()];
        assert!(find_session_cookie(&custom, &cookies).is_none());
        let cookies = vec![("x-ui-token".to_string(), "zzz".to_string())];
        assert_eq!(
            find_session_cookie(&custom, &cookies).unwrap().name,
            "x-ui-token"
        );
    }

    #[test]
    fn login_body_includes_optional_fields() {
        let body = login_body("admin", "pw", None, None);
        assert_eq!(body["username"], "admin");
        assert_eq!(body["password"], "pw");
        assert!(body.get("loginSecret").is_none());
        assert!(body.get("twoFactorCode").is_none());

        let body = login_body("admin", "pw", Some("sec"), Some("123456"));
        assert_eq!(body["loginSecret"], "sec");
        assert_eq!(body["twoFactorCode"], "123456");
    }

    #[test]
    fn client_settings_body_embeds_clients_as_json_string() {
        let client = Client::new(
            ClientId::Uuid("239708ef-487e-4945-829d-ad79a0ce067e".into()),
            "user@example.com",
            true,
        );
        let body = client_settings_body(3, &[client]).unwrap();
        assert_eq!(body["id"], 3);

        let settings = body["settings"].as_str().expect("settings is a string");
        let parsed: Value = serde_json::from_str(settings).unwrap();
        assert_eq!(parsed["clients"][0]["email"], "user@example.com");
        assert_eq!(
            parsed["clients"][0]["id"],
            "239708ef-487e-4945-829d-ad79a0ce067e"
        );
    }
}
