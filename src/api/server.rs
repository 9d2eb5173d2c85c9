//! Server telemetry and backup endpoints.

use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::api::base::BaseApi;
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
    pub async fn get_status(&self) -> Result<Server> {
        info!("fetching server status");
        let obj = self
            .base
            .post(endpoint::SERVER_STATUS, &Value::Object(Default::default()))
            .await?;
        Ok(serde_json::from_value(obj)?)
    }

    /// Downloads the panel database backup and writes it to `save_path`,
    /// replacing any existing file there.
    pub async fn get_db(&self, save_path: &Path) -> Result<()> {
        info!(path = %save_path.display(), "downloading database backup");
        let bytes = self.base.get_raw(endpoint::SERVER_GET_DB).await?;
        tokio::fs::write(save_path, bytes).await?;
        info!(path = %save_path.display(), "database backup saved");
        Ok(())
    }
}
