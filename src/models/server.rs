//! Point-in-time host telemetry reported by the panel's status endpoint.
//! Read-only snapshots; there is no identity beyond "current".

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryInfo {
    /// Current usage in bytes.
    pub current: i64,
    /// Capacity in bytes.
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XrayInfo {
    /// Process state as the panel reports it, e.g. "running".
    pub state: String,
    #[serde(rename = "errorMsg", default)]
    pub error_msg: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkIo {
    pub up: i64,
    pub down: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkTraffic {
    pub sent: i64,
    pub recv: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicIp {
    #[serde(default)]
    pub ipv4: String,
    #[serde(default)]
    pub ipv6: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppStats {
    pub threads: i64,
    pub mem: i64,
    pub uptime: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    /// CPU load percentage.
    pub cpu: f64,
    #[serde(rename = "cpuCores")]
    pub cpu_cores: i64,
    #[serde(rename = "logicalPro")]
    pub logical_pro: i64,
    #[serde(rename = "cpuSpeedMhz")]
    pub cpu_speed_mhz: f64,

    pub mem: MemoryInfo,
    pub swap: MemoryInfo,
    pub disk: MemoryInfo,

    pub xray: XrayInfo,

    /// Uptime in seconds.
    pub uptime: i64,
    /// Load averages over 1, 5 and 15 minutes.
    pub loads: Vec<f64>,

    #[serde(rename = "tcpCount")]
    pub tcp_count: i64,
    #[serde(rename = "udpCount")]
    pub udp_count: i64,

    #[serde(rename = "netIO")]
    pub net_io: NetworkIo,
    #[serde(rename = "netTraffic")]
    pub net_traffic: NetworkTraffic,

    #[serde(rename = "publicIP")]
    pub public_ip: PublicIp,
    #[serde(rename = "appStats")]
    pub app_stats: AppStats,
}
