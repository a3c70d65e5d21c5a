//! Client for the `/api/stats` route group.

use std::sync::Arc;

use crate::config::{endpoints, BackendKind, TimeoutTier};
use crate::error::Result;
use crate::transport::Transport;
use crate::types::{ApiEnvelope, Stats};

#[derive(Debug, Clone)]
pub struct StatsClient {
    transport: Arc<Transport>,
}

impl StatsClient {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Fetch the overview statistics.
    ///
    /// The real backend wraps the payload in the standard envelope; the
    /// mock backend returns a flat `Stats` object. Callers see one shape.
    ///
    /// GET /api/stats/overview
    pub async fn overview(&self) -> Result<Stats> {
        let backend = self.transport.config().backend;
        let path = endpoints::stats_overview(backend);
        match backend {
            BackendKind::MockServer => {
                self.transport.get_json(path, &[], TimeoutTier::Short).await
            }
            BackendKind::Api => {
                let envelope: ApiEnvelope<Stats> = self
                    .transport
                    .get_json(path, &[], TimeoutTier::Short)
                    .await?;
                envelope.into_data()
            }
        }
    }
}
