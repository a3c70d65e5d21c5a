//! Seam between the synchronization layer and the HTTP clients.
//!
//! `DataService`, the upload queue and the chat session all talk to the
//! backend through this trait so tests can swap in a scripted fake
//! without a socket.

use async_trait::async_trait;

use orgdesk_api::types::{
    AnalyticsReport, ChatAnswer, ChatContext, ChatTurn, ChartInsightRequest, DeleteResponse,
    Document, DocumentListParams, DocumentUploadOptions, DocumentUploadResponse, DocumentsResponse,
    MembersResponse, Organization, SearchHit, Stats, UploadResponse,
};
use orgdesk_api::{ApiClient, FilePayload, ProgressFn, Result};

#[async_trait]
pub trait ApiGateway: Send + Sync {
    async fn list_members(&self) -> Result<MembersResponse>;
    async fn import_members_csv(&self, file: FilePayload) -> Result<UploadResponse>;
    async fn delete_member(&self, id: i64) -> Result<DeleteResponse>;
    async fn delete_all_members(&self) -> Result<DeleteResponse>;

    async fn list_documents(&self, params: &DocumentListParams) -> Result<DocumentsResponse>;
    async fn get_document(&self, id: i64) -> Result<Document>;
    async fn upload_document(
        &self,
        file: FilePayload,
        options: &DocumentUploadOptions,
        progress: Option<ProgressFn>,
    ) -> Result<DocumentUploadResponse>;
    async fn delete_document(&self, id: i64) -> Result<DeleteResponse>;
    async fn delete_all_documents(&self) -> Result<DeleteResponse>;

    async fn upload_organization_pdf(&self, file: FilePayload) -> Result<UploadResponse>;
    async fn latest_organization(&self) -> Result<Organization>;
    async fn list_organizations(&self) -> Result<Vec<Organization>>;
    async fn get_organization(&self, id: i64) -> Result<Organization>;

    async fn send_chat(&self, query: &str, history: &[ChatTurn]) -> Result<ChatAnswer>;
    async fn chat_context(&self) -> Result<ChatContext>;

    async fn stats_overview(&self) -> Result<Stats>;
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;

    async fn analytics_members(&self) -> Result<AnalyticsReport>;
    async fn analytics_documents(&self) -> Result<AnalyticsReport>;
    async fn analytics_overview(&self) -> Result<AnalyticsReport>;
    async fn chart_insight(&self, request: &ChartInsightRequest) -> Result<String>;
}

#[async_trait]
impl ApiGateway for ApiClient {
    async fn list_members(&self) -> Result<MembersResponse> {
        self.members.list().await
    }

    async fn import_members_csv(&self, file: FilePayload) -> Result<UploadResponse> {
        self.members.upload_csv(file).await
    }

    async fn delete_member(&self, id: i64) -> Result<DeleteResponse> {
        self.members.delete(id).await
    }

    async fn delete_all_members(&self) -> Result<DeleteResponse> {
        self.members.delete_all().await
    }

    async fn list_documents(&self, params: &DocumentListParams) -> Result<DocumentsResponse> {
        self.documents.list(params).await
    }

    async fn get_document(&self, id: i64) -> Result<Document> {
        self.documents.get(id).await
    }

    async fn upload_document(
        &self,
        file: FilePayload,
        options: &DocumentUploadOptions,
        progress: Option<ProgressFn>,
    ) -> Result<DocumentUploadResponse> {
        match progress {
            Some(progress) => {
                self.documents
                    .upload_with_progress(file, options, progress)
                    .await
            }
            None => self.documents.upload(file, options).await,
        }
    }

    async fn delete_document(&self, id: i64) -> Result<DeleteResponse> {
        self.documents.delete(id).await
    }

    async fn delete_all_documents(&self) -> Result<DeleteResponse> {
        self.documents.delete_all().await
    }

    async fn upload_organization_pdf(&self, file: FilePayload) -> Result<UploadResponse> {
        self.organization.upload_pdf(file).await
    }

    async fn latest_organization(&self) -> Result<Organization> {
        self.organization.latest().await
    }

    async fn list_organizations(&self) -> Result<Vec<Organization>> {
        self.organization.list().await
    }

    async fn get_organization(&self, id: i64) -> Result<Organization> {
        self.organization.get(id).await
    }

    async fn send_chat(&self, query: &str, history: &[ChatTurn]) -> Result<ChatAnswer> {
        self.chat.send(query, history).await
    }

    async fn chat_context(&self) -> Result<ChatContext> {
        self.chat.context().await
    }

    async fn stats_overview(&self) -> Result<Stats> {
        self.stats.overview().await
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        self.search.search(query).await
    }

    async fn analytics_members(&self) -> Result<AnalyticsReport> {
        self.analytics.members().await
    }

    async fn analytics_documents(&self) -> Result<AnalyticsReport> {
        self.analytics.documents().await
    }

    async fn analytics_overview(&self) -> Result<AnalyticsReport> {
        self.analytics.overview().await
    }

    async fn chart_insight(&self, request: &ChartInsightRequest) -> Result<String> {
        self.analytics.chart_insight(request).await
    }
}
