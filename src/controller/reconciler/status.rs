//! # Status Management
//!
//! Writes the Ready condition of a ProviderConfig.

use super::types::{Reconciler, ReconcilerError};
use crate::crd::{Condition, ProviderConfig};
use tracing::error;

impl Reconciler {
    /// Persist `condition` onto the object's status.
    ///
    /// Other condition types already on the object are preserved. A failed write
    /// is raised so the scheduler retries the whole cycle.
    pub(super) async fn write_condition(
        &self,
        name: &str,
        config: &ProviderConfig,
        condition: Condition,
    ) -> Result<(), ReconcilerError> {
        let mut status = config.status.clone().unwrap_or_default();
        status.set_condition(condition);

        self.store
            .update_status(name, &status)
            .await
            .map_err(|e| {
                error!(provider_config = name, error = %format!("{e:#}"), "cannot update status");
                ReconcilerError::UpdateStatus(e)
            })
    }
}
