//! Client for the `/api/analytics` route group.

use std::sync::Arc;

use crate::config::{endpoints, TimeoutTier};
use crate::error::Result;
use crate::transport::Transport;
use crate::types::{AnalyticsReport, ApiEnvelope, ChartInsight, ChartInsightRequest};

#[derive(Debug, Clone)]
pub struct AnalyticsClient {
    transport: Arc<Transport>,
}

impl AnalyticsClient {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Member analytics: statistics, chart series and narrative.
    ///
    /// GET /api/analytics/members
    pub async fn members(&self) -> Result<AnalyticsReport> {
        let backend = self.transport.config().backend;
        let envelope: ApiEnvelope<AnalyticsReport> = self
            .transport
            .get_json(endpoints::analytics_members(backend), &[], TimeoutTier::Short)
            .await?;
        envelope.into_data()
    }

    /// Document analytics.
    ///
    /// GET /api/analytics/documents
    pub async fn documents(&self) -> Result<AnalyticsReport> {
        let backend = self.transport.config().backend;
        let envelope: ApiEnvelope<AnalyticsReport> = self
            .transport
            .get_json(
                endpoints::analytics_documents(backend),
                &[],
                TimeoutTier::Short,
            )
            .await?;
        envelope.into_data()
    }

    /// Combined analytics overview.
    ///
    /// GET /api/analytics/overview
    pub async fn overview(&self) -> Result<AnalyticsReport> {
        let backend = self.transport.config().backend;
        let envelope: ApiEnvelope<AnalyticsReport> = self
            .transport
            .get_json(
                endpoints::analytics_overview(backend),
                &[],
                TimeoutTier::Short,
            )
            .await?;
        envelope.into_data()
    }

    /// Generate a short narrative for one chart. Synchronous, on-demand,
    /// never cached; uses the extended tier for the AI round-trip.
    ///
    /// POST /api/analytics/chart-insight
    pub async fn chart_insight(&self, request: &ChartInsightRequest) -> Result<String> {
        let backend = self.transport.config().backend;
        let envelope: ApiEnvelope<ChartInsight> = self
            .transport
            .post_json(
                endpoints::analytics_chart_insight(backend),
                request,
                TimeoutTier::Extended,
            )
            .await?;
        Ok(envelope.into_data()?.insight)
    }
}
