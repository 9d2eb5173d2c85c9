//! Server telemetry and backup endpoints, blocking variant.

use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::blocking::base::BaseApi;
use crate::error::Result;
use crate::models::Server;
use crate::wire::endpoint;

/// Operations on the panel host itself.
pub struct ServerApi {
    pub(crate) base: BaseApi,
}

impl ServerApi {
    pub(crate) fn new(base: BaseApi) -> Self {
        Self { base }
    }

    /// Current host telemetry snapshot.
    pub fn get_status(&self) -> Result<Server> {
        info!("fetching server status");
        let obj = self
            .base
            .post(endpoint::SERVER_STATUS, &Value::Object(Default::default()))?;
        Ok(serde_json::from_value(obj)?)
    }

    /// Downloads the panel database backup and writes it to `save_path`,
    /// replacing any existing file there.
    pub fn get_db(&self, save_path: &Path) -> Result<()> {
        info!(path = %save_path.display(), "downloading database backup");
        let bytes = self.base.get_raw(endpoint::SERVER_GET_DB)?;
        std::fs::write(save_path, bytes)?;
        info!(path = %save_path.display(), "database backup saved");
        Ok(())
    }
}
