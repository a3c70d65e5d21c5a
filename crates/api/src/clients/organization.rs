//! Client for the `/api/organization` route group.

use std::sync::Arc;

use crate::config::{endpoints, TimeoutTier};
use crate::error::Result;
use crate::transport::{FilePayload, Transport};
use crate::types::{ApiEnvelope, Organization, UploadResponse};

#[derive(Debug, Clone)]
pub struct OrganizationClient {
    transport: Arc<Transport>,
}

impl OrganizationClient {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Upload and extract an organization profile PDF.
    ///
    /// POST /api/organization/upload
    pub async fn upload_pdf(&self, file: FilePayload) -> Result<UploadResponse> {
        let backend = self.transport.config().backend;
        self.transport
            .upload(endpoints::organization_upload(backend), file, Vec::new())
            .await
    }

    /// Fetch the most recently extracted organization record.
    ///
    /// GET /api/organization/latest
    pub async fn latest(&self) -> Result<Organization> {
        let backend = self.transport.config().backend;
        let envelope: ApiEnvelope<Organization> = self
            .transport
            .get_json(
                endpoints::organization_latest(backend),
                &[],
                TimeoutTier::Short,
            )
            .await?;
        envelope.into_data()
    }

    /// Fetch all organization records.
    ///
    /// GET /api/organization/all
    pub async fn list(&self) -> Result<Vec<Organization>> {
        let backend = self.transport.config().backend;
        let envelope: ApiEnvelope<Vec<Organization>> = self
            .transport
            .get_json(endpoints::organization_all(backend), &[], TimeoutTier::Short)
            .await?;
        envelope.into_data()
    }

    /// Fetch one organization record by id.
    ///
    /// GET /api/organization/data/{id}
    pub async fn get(&self, id: i64) -> Result<Organization> {
        let backend = self.transport.config().backend;
        let envelope: ApiEnvelope<Organization> = self
            .transport
            .get_json(
                &endpoints::organization_data(backend, id),
                &[],
                TimeoutTier::Short,
            )
            .await?;
        envelope.into_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::testutil::{start_mock_server, MockOutcome};

    #[tokio::test]
    async fn latest_unwraps_envelope() {
        let (base_url, captured, server) = start_mock_server(vec![MockOutcome::json(
            200,
            r#"{"status":"success","data":{"id":2,"name":"HIPMI","founded_date":"1972-06-10"}}"#,
        )])
        .await;

        let client =
            OrganizationClient::new(Arc::new(Transport::new(ApiConfig::new(&base_url))));
        let organization = client.latest().await.expect("latest organization");
        assert_eq!(organization.name, "HIPMI");

        let requests = captured.lock().await.clone();
        assert_eq!(requests[0].target, "/api/organization/latest");
        server.abort();
    }

    #[tokio::test]
    async fn get_by_id_targets_data_route() {
        let (base_url, captured, server) = start_mock_server(vec![MockOutcome::json(
            200,
            r#"{"status":"success","data":{"id":5,"name":"HIPMI Jaya"}}"#,
        )])
        .await;

        let client =
            OrganizationClient::new(Arc::new(Transport::new(ApiConfig::new(&base_url))));
        let organization = client.get(5).await.expect("organization by id");
        assert_eq!(organization.id, 5);

        let requests = captured.lock().await.clone();
        assert_eq!(requests[0].target, "/api/organization/data/5");
        server.abort();
    }

    #[tokio::test]
    async fn error_status_envelope_surfaces_as_failure() {
        let (base_url, _captured, server) = start_mock_server(vec![MockOutcome::json(
            200,
            r#"{"status":"error","error":"no organization data extracted yet"}"#,
        )])
        .await;

        let client =
            OrganizationClient::new(Arc::new(Transport::new(ApiConfig::new(&base_url))));
        assert!(client.latest().await.is_err());
        server.abort();
    }
}
