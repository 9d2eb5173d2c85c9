//! Client (user credential) models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A client identifier as the panel uses it: older records carry a numeric
/// id, newer ones a UUID string. Whichever form arrives is preserved; there
/// is no coercion between the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClientId {
    Num(i64),
    Uuid(String),
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientId::Num(n) => write!(f, "{n}"),
            ClientId::Uuid(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for ClientId {
    fn from(n: i64) -> Self {
        ClientId::Num(n)
    }
}

impl From<String> for ClientId {
    fn from(s: String) -> Self {
        ClientId::Uuid(s)
    }
}

impl From<&str> for ClientId {
    fn from(s: &str) -> Self {
        ClientId::Uuid(s.to_string())
    }
}

/// Telegram id attached to a client; the panel emits either a numeric id
/// or a handle string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TgId {
    Num(i64),
    Handle(String),
}

/// A single user entry attached to an inbound, with traffic accounting.
///
/// Counters and timestamps default to zero when the panel omits them, so
/// quota and traffic arithmetic never has to deal with missing values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub email: String,
    pub enable: bool,
    pub id: ClientId,

    #[serde(rename = "inboundId", default, skip_serializing_if = "Option::is_none")]
    pub inbound_id: Option<i64>,

    #[serde(default)]
    pub up: i64,
    #[serde(default)]
    pub down: i64,

    #[serde(rename = "expiryTime", default)]
    pub expiry_time: i64,

    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub reset: i64,

    #[serde(default)]
    pub flow: String,
    #[serde(rename = "limitIp", default)]
    pub limit_ip: i64,
    #[serde(rename = "subId", default)]
    pub sub_id: String,
    #[serde(rename = "tgId", default, skip_serializing_if = "Option::is_none")]
    pub tg_id: Option<TgId>,
    #[serde(rename = "totalGB", default)]
    pub total_gb: i64,
}

impl Client {
    /// A client with the three required fields set and everything else at
    /// its wire default, ready to be filled in before an add/update call.
    pub fn new(id: impl Into<ClientId>, email: impl Into<String>, enable: bool) -> Self {
        Self {
            email: email.into(),
            enable,
            id: id.into(),
            inbound_id: None,
            up: 0,
            down: 0,
            expiry_time: 0,
            total: 0,
            reset: 0,
            flow: String::new(),
            limit_ip: 0,
            sub_id: String::new(),
            tg_id: None,
            total_gb: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_from_panel_payload() {
        let client: Client = serde_json::from_value(json!({
            "email": "alice",
            "enable": true,
            "id": 42,
            "inboundId": 3,
            "up": 100,
            "down": 200,
            "expiryTime": 1735689600000i64,
            "limitIp": 2,
            "subId": "sub-1",
            "totalGB": 50
        }))
        .unwrap();

        assert_eq!(client.id, ClientId::Num(42));
        assert_eq!(client.inbound_id, Some(3));
        assert_eq!(client.limit_ip, 2);
        assert_eq!(client.total_gb, 50);
        // Omitted counters come back as zero, not as an absent state.
        assert_eq!(client.total, 0);
        assert_eq!(client.reset, 0);
    }

    #[test]
    fn uuid_and_numeric_ids_survive_without_coercion() {
        let uuid: Client = serde_json::from_value(json!({
            "email": "a", "enable": true,
            "id": "239708ef-487e-4945-829d-ad79a0ce067e"
        }))
        .unwrap();
        let numeric: Client =
            serde_json::from_value(json!({"email": "b", "enable": false, "id": 42})).unwrap();

        assert_eq!(
            serde_json::to_value(&uuid).unwrap()["id"],
            json!("239708ef-487e-4945-829d-ad79a0ce067e")
        );
        assert_eq!(serde_json::to_value(&numeric).unwrap()["id"], json!(42));
    }

    #[test]
    fn unset_optional_fields_are_omitted_on_the_wire() {
        let client = Client::new("uuid-1", "alice", true);
        let value = serde_json::to_value(&client).unwrap();

        // Strict panel builds reject explicit nulls in add/update bodies.
        assert!(value.get("inboundId").is_none());
        assert!(value.get("tgId").is_none());

        let mut client = client;
        client.inbound_id = Some(3);
        let value = serde_json::to_value(&client).unwrap();
        assert_eq!(value["inboundId"], json!(3));
    }

    #[test]
    fn round_trip_reproduces_equivalent_client() {
        let mut client = Client::new("uuid-1", "alice", true);
        client.flow = "xtls-rprx-vision".into();
        client.limit_ip = 3;
        client.tg_id = Some(TgId::Num(123456));

        let value = serde_json::to_value(&client).unwrap();
        // Remote keys are re-emitted under their remote names.
        assert!(value.get("limitIp").is_some());
        assert!(value.get("tgId").is_some());
        assert!(value.get("expiryTime").is_some());

        let back: Client = serde_json::from_value(value).unwrap();
        assert_eq!(back, client);
    }
}
