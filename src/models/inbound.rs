//! Inbound (listening endpoint) models and their nested settings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::models::client::Client;
use crate::models::json_string::string_or_object;

/// Protocol settings of an inbound. On the wire this may arrive either as
/// a nested object or as a JSON-encoded string.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub decryption: String,
    #[serde(default)]
    pub fallbacks: Vec<Value>,
}

/// Traffic-sniffing configuration of an inbound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sniffing {
    pub enabled: bool,

    #[serde(rename = "destOverride", default)]
    pub dest_override: Vec<String>,

    #[serde(rename = "metadataOnly", default)]
    pub metadata_only: bool,
    #[serde(rename = "routeOnly", default)]
    pub route_only: bool,
}

impl Sniffing {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            dest_override: Vec::new(),
            metadata_only: false,
            route_only: false,
        }
    }
}

/// Transport/stream configuration of an inbound. The per-transport setting
/// blocks are kept as raw JSON maps: their shape varies per xray version
/// and the panel treats them as opaque too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamSettings {
    pub security: String,
    pub network: String,

    #[serde(rename = "tcpSettings", default)]
    pub tcp_settings: Map<String, Value>,
    #[serde(rename = "kcpSettings", default)]
    pub kcp_settings: Map<String, Value>,

    #[serde(rename = "externalProxy", default)]
    pub external_proxy: Vec<Value>,

    #[serde(rename = "realitySettings", default)]
    pub reality_settings: Map<String, Value>,
    #[serde(rename = "xtlsSettings", default)]
    pub xtls_settings: Map<String, Value>,
    #[serde(rename = "tlsSettings", default)]
    pub tls_settings: Map<String, Value>,
}

impl StreamSettings {
    pub fn new(security: impl Into<String>, network: impl Into<String>) -> Self {
        Self {
            security: security.into(),
            network: network.into(),
            tcp_settings: Map::new(),
            kcp_settings: Map::new(),
            external_proxy: Vec::new(),
            reality_settings: Map::new(),
            xtls_settings: Map::new(),
            tls_settings: Map::new(),
        }
    }
}

/// A configured listening endpoint on the panel.
///
/// The three nested settings blocks deserialize from either a nested
/// object or a JSON-encoded string; the panel's list endpoint uses the
/// string form. `client_stats` and `settings.clients` are two views of
/// related but not necessarily identical client lists; that is how the
/// panel reports them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inbound {
    pub enable: bool,
    pub port: u16,
    pub protocol: String,

    #[serde(deserialize_with = "string_or_object")]
    pub settings: Settings,
    #[serde(rename = "streamSettings", deserialize_with = "string_or_object")]
    pub stream_settings: StreamSettings,
    #[serde(deserialize_with = "string_or_object")]
    pub sniffing: Sniffing,

    #[serde(default)]
    pub listen: String,
    #[serde(default)]
    pub remark: String,
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub up: i64,
    #[serde(default)]
    pub down: i64,
    #[serde(default)]
    pub total: i64,

    #[serde(rename = "expiryTime", default)]
    pub expiry_time: i64,
    #[serde(rename = "clientStats", default)]
    pub client_stats: Option<Vec<Client>>,

    #[serde(default)]
    pub tag: String,
}

impl Inbound {
    pub fn new(
        enable: bool,
        port: u16,
        protocol: impl Into<String>,
        settings: Settings,
        stream_settings: StreamSettings,
        sniffing: Sniffing,
    ) -> Self {
        Self {
            enable,
            port,
            protocol: protocol.into(),
            settings,
            stream_settings,
            sniffing,
            listen: String::new(),
            remark: String::new(),
            id: 0,
            up: 0,
            down: 0,
            total: 0,
            expiry_time: 0,
            client_stats: None,
            tag: String::new(),
        }
    }

    /// Request body for the add/update endpoints: the scalar fields the
    /// panel accepts plus the three settings blocks re-encoded as JSON
    /// strings, which is the only form those endpoints take.
    pub fn to_payload(&self) -> Result<Value> {
        Ok(serde_json::json!({
            "remark": self.remark,
            "enable": self.enable,
            "listen": self.listen,
            "port": self.port,
            "protocol": self.protocol,
            "expiryTime": self.expiry_time,
            "settings": serde_json::to_string(&self.settings)?,
            "streamSettings": serde_json::to_string(&self.stream_settings)?,
            "sniffing": serde_json::to_string(&self.sniffing)?,
        }))
    }
}
