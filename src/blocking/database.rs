//! Database management endpoints, blocking variant.

use tracing::info;

use crate::blocking::base::BaseApi;
use crate::error::Result;
use crate::wire::endpoint;

/// Operations on the panel database.
pub struct DatabaseApi {
    pub(crate) base: BaseApi,
}

impl DatabaseApi {
    pub(crate) fn new(base: BaseApi) -> Self {
        Self { base }
    }

    /// Triggers a server-side backup; the panel delivers the file to its
    /// configured administrators itself. The response carries no JSON
    /// envelope, so only the transport outcome is checked.
    pub fn export(&self) -> Result<()> {
        info!("triggering database export");
        self.base.get_raw(endpoint::DATABASE_EXPORT)?;
        info!("database export triggered");
        Ok(())
    }
}
