//! Client management endpoints, blocking variant.

use serde_json::Value;
use tracing::{info, warn};

use crate::blocking::base::BaseApi;
use crate::error::{Error, Result};
use crate::models::Client;
use crate::wire::{self, NO_IP_RECORD, endpoint};

/// Operations on clients (user credentials attached to inbounds).
pub struct ClientApi {
    pub(crate) base: BaseApi,
}

impl ClientApi {
    pub(crate) fn new(base: BaseApi) -> Self {
        Self { base }
    }

    /// Traffic stats and settings of the client with this email, or `None`
    /// when the panel has no record of it.
    pub fn get_by_email(&self, email: &str) -> Result<Option<Client>> {
        info!(%email, "fetching client by email");
        let obj = self.base.get(&endpoint::client_traffics(email))?;
        if obj.is_null() {
            warn!(%email, "no client found for email");
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(obj)?))
    }

    /// Traffic records of the client with this UUID. A UUID can match
    /// entries across several inbounds, so this returns a list; an unknown
    /// UUID yields an empty one.
    pub fn get_traffic_by_id(&self, client_uuid: &str) -> Result<Vec<Client>> {
        info!(%client_uuid, "fetching client traffic by id");
        let obj = self.base.get(&endpoint::client_traffics_by_id(client_uuid))?;
        if obj.is_null() {
            warn!(%client_uuid, "no traffic records for client id");
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value(obj)?)
    }

    /// IP records associated with the client. The panel reports a missing
    /// record as a sentinel string, which maps to an empty list.
    pub fn get_ips(&self, email: &str) -> Result<Vec<String>> {
        info!(%email, "fetching client IP records");
        let obj = self
            .base
            .post(&endpoint::client_ips(email), &Value::Object(Default::default()))?;
        match obj {
            Value::String(s) if s == NO_IP_RECORD => Ok(Vec::new()),
            Value::Null => Ok(Vec::new()),
            other => Ok(serde_json::from_value(other)?),
        }
    }

    /// Adds clients to the inbound with this id.
    pub fn add(&self, inbound_id: i64, clients: &[Client]) -> Result<()> {
        info!(inbound_id, count = clients.len(), "adding clients to inbound");
        let body = wire::client_settings_body(inbound_id, clients)?;
        self.base.post(endpoint::CLIENT_ADD, &body)?;
        info!(inbound_id, "clients added");
        Ok(())
    }

    /// Updates the client identified by its UUID. The target inbound is
    /// taken from `client.inbound_id`, which must be set; clients fetched
    /// via [`ClientApi::get_by_email`] carry it.
    pub fn update(&self, client_uuid: &str, client: &Client) -> Result<()> {
        info!(%client_uuid, email = %client.email, "updating client");
        let inbound_id = client.inbound_id.ok_or_else(|| {
            Error::Config(format!(
                "client {client_uuid} has no inbound id set, cannot target an inbound for update"
            ))
        })?;
        let body = wire::client_settings_body(inbound_id, std::slice::from_ref(client))?;
        self.base.post(&endpoint::client_update(client_uuid), &body)?;
        info!(%client_uuid, "client updated");
        Ok(())
    }

    /// Clears the IP records associated with the client.
    pub fn reset_ips(&self, email: &str) -> Result<()> {
        info!(%email, "resetting client IP records");
        self.base.post(
            &endpoint::client_clear_ips(email),
            &Value::Object(Default::default()),
        )?;
        Ok(())
    }

    /// Resets the traffic statistics of one client within an inbound.
    pub fn reset_stats(&self, inbound_id: i64, email: &str) -> Result<()> {
        info!(inbound_id, %email, "resetting client traffic stats");
        self.base.post(
            &endpoint::client_reset_stats(inbound_id, email),
            &Value::Object(Default::default()),
        )?;
        Ok(())
    }

    /// Deletes the client identified by its UUID from an inbound.
    pub fn delete(&self, inbound_id: i64, client_uuid: &str) -> Result<()> {
        info!(inbound_id, %client_uuid, "deleting client");
        self.base.post(
            &endpoint::client_delete(inbound_id, client_uuid),
            &Value::Object(Default::default()),
        )?;
        Ok(())
    }

    /// Deletes every depleted client of an inbound.
    pub fn delete_depleted(&self, inbound_id: i64) -> Result<()> {
        info!(inbound_id, "deleting depleted clients");
        self.base.post(
            &endpoint::client_delete_depleted(inbound_id),
            &Value::Object(Default::default()),
        )?;
        Ok(())
    }

    /// Email addresses of the clients currently online.
    pub fn online(&self) -> Result<Vec<String>> {
        info!("fetching online clients");
        let obj = self
            .base
            .post(endpoint::CLIENTS_ONLINE, &Value::Object(Default::default()))?;
        if obj.is_null() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value(obj)?)
    }
}
