//! Typed models mirroring the panel API's JSON shapes.

mod client;
mod inbound;
mod json_string;
mod server;

pub use client::{Client, ClientId, TgId};
pub use inbound::{Inbound, Settings, Sniffing, StreamSettings};
pub use server::{AppStats, MemoryInfo, NetworkIo, NetworkTraffic, PublicIp, Server, XrayInfo};
