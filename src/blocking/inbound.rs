//! Inbound management endpoints, blocking variant.

use serde_json::Value;
use tracing::info;

use crate::blocking::base::BaseApi;
use crate::error::Result;
use crate::models::Inbound;
use crate::wire::endpoint;

/// Operations on inbounds (configured listening endpoints).
pub struct InboundApi {
    pub(crate) base: BaseApi,
}

impl InboundApi {
    pub(crate) fn new(base: BaseApi) -> Self {
        Self { base }
    }

    /// All inbounds with their client options and traffic statistics.
    pub fn get_list(&self) -> Result<Vec<Inbound>> {
        info!("fetching inbound list");
        let obj = self.base.get(endpoint::INBOUND_LIST)?;
        if obj.is_null() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value(obj)?)
    }

    /// Adds a new inbound.
    pub fn add(&self, inbound: &Inbound) -> Result<()> {
        info!(port = inbound.port, protocol = %inbound.protocol, "adding inbound");
        self.base.post(endpoint::INBOUND_ADD, &inbound.to_payload()?)?;
        info!("inbound added");
        Ok(())
    }

    /// Updates the inbound with this id.
    pub fn update(&self, inbound_id: i64, inbound: &Inbound) -> Result<()> {
        info!(inbound_id, "updating inbound");
        self.base
            .post(&endpoint::inbound_update(inbound_id), &inbound.to_payload()?)?;
        info!(inbound_id, "inbound updated");
        Ok(())
    }

    /// Deletes the inbound with this id.
    pub fn delete(&self, inbound_id: i64) -> Result<()> {
        info!(inbound_id, "deleting inbound");
        self.base.post(
            &endpoint::inbound_delete(inbound_id),
            &Value::Object(Default::default()),
        )?;
        Ok(())
    }

    /// Resets the traffic statistics of every inbound.
    pub fn reset_stats(&self) -> Result<()> {
        info!("resetting all inbound traffic stats");
        self.base.post(
            endpoint::INBOUND_RESET_ALL_STATS,
            &Value::Object(Default::default()),
        )?;
        Ok(())
    }

    /// Resets the traffic statistics of every client of one inbound.
    pub fn reset_client_stats(&self, inbound_id: i64) -> Result<()> {
        info!(inbound_id, "resetting inbound client traffic stats");
        self.base.post(
            &endpoint::inbound_reset_client_stats(inbound_id),
            &Value::Object(Default::default()),
        )?;
        Ok(())
    }
}
