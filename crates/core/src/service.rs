//! Cached facade over the backend: reads go through the query cache,
//! writes invalidate along the mutation graph.

use std::sync::Arc;

use orgdesk_api::types::{
    AnalyticsReport, ChatContext, ChartInsightRequest, DeleteResponse, Document,
    DocumentListParams, DocumentUploadOptions, DocumentUploadResponse, DocumentsResponse,
    MembersResponse, Organization, SearchHit, Stats, UploadResponse,
};
use orgdesk_api::{FilePayload, ProgressFn, Result};

use crate::cache::{Mutation, QueryCache, QueryKey, Scope};
use crate::gateway::ApiGateway;

#[derive(Clone)]
pub struct DataService {
    gateway: Arc<dyn ApiGateway>,
    cache: Arc<QueryCache>,
}

impl DataService {
    pub fn new(gateway: Arc<dyn ApiGateway>) -> Self {
        Self {
            gateway,
            cache: Arc::new(QueryCache::new()),
        }
    }

    pub fn with_cache(gateway: Arc<dyn ApiGateway>, cache: Arc<QueryCache>) -> Self {
        Self { gateway, cache }
    }

    pub fn gateway(&self) -> &Arc<dyn ApiGateway> {
        &self.gateway
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    /// Manually mark scopes stale (pull-to-refresh).
    pub async fn refresh(&self, scopes: &[Scope]) {
        self.cache.invalidate(scopes).await;
    }

    // ── Members ──────────────────────────────────────────────────────

    pub async fn members(&self) -> Result<MembersResponse> {
        self.cache
            .get_or_fetch(QueryKey::of(Scope::Members), || {
                self.gateway.list_members()
            })
            .await
    }

    pub async fn import_members_csv(&self, file: FilePayload) -> Result<UploadResponse> {
        let response = self.gateway.import_members_csv(file).await?;
        self.cache.apply_mutation(Mutation::MemberCsvImport).await;
        Ok(response)
    }

    pub async fn delete_member(&self, id: i64) -> Result<DeleteResponse> {
        let response = self.gateway.delete_member(id).await?;
        self.cache.apply_mutation(Mutation::MemberDelete).await;
        Ok(response)
    }

    pub async fn delete_all_members(&self) -> Result<DeleteResponse> {
        let response = self.gateway.delete_all_members().await?;
        self.cache.apply_mutation(Mutation::MemberDelete).await;
        Ok(response)
    }

    // ── Documents ────────────────────────────────────────────────────

    pub async fn documents(&self, params: &DocumentListParams) -> Result<DocumentsResponse> {
        self.cache
            .get_or_fetch(documents_key(params), || {
                self.gateway.list_documents(params)
            })
            .await
    }

    pub async fn document(&self, id: i64) -> Result<Document> {
        let key = QueryKey::with_params(Scope::Documents, format!("id={id}"));
        self.cache
            .get_or_fetch(key, || self.gateway.get_document(id))
            .await
    }

    pub async fn upload_document(
        &self,
        file: FilePayload,
        options: &DocumentUploadOptions,
        progress: Option<ProgressFn>,
    ) -> Result<DocumentUploadResponse> {
        let response = self.gateway.upload_document(file, options, progress).await?;
        self.cache.apply_mutation(Mutation::DocumentUpload).await;
        Ok(response)
    }

    pub async fn delete_document(&self, id: i64) -> Result<DeleteResponse> {
        let response = self.gateway.delete_document(id).await?;
        self.cache.apply_mutation(Mutation::DocumentDelete).await;
        Ok(response)
    }

    pub async fn delete_all_documents(&self) -> Result<DeleteResponse> {
        let response = self.gateway.delete_all_documents().await?;
        self.cache.apply_mutation(Mutation::DocumentDelete).await;
        Ok(response)
    }

    // ── Organization ─────────────────────────────────────────────────

    pub async fn upload_organization_pdf(&self, file: FilePayload) -> Result<UploadResponse> {
        let response = self.gateway.upload_organization_pdf(file).await?;
        self.cache
            .apply_mutation(Mutation::OrganizationUpload)
            .await;
        Ok(response)
    }

    pub async fn latest_organization(&self) -> Result<Organization> {
        self.cache
            .get_or_fetch(QueryKey::of(Scope::OrganizationLatest), || {
                self.gateway.latest_organization()
            })
            .await
    }

    pub async fn organizations(&self) -> Result<Vec<Organization>> {
        self.cache
            .get_or_fetch(QueryKey::of(Scope::Organization), || {
                self.gateway.list_organizations()
            })
            .await
    }

    pub async fn organization(&self, id: i64) -> Result<Organization> {
        let key = QueryKey::with_params(Scope::OrganizationById, format!("id={id}"));
        self.cache
            .get_or_fetch(key, || self.gateway.get_organization(id))
            .await
    }

    // ── Chat, stats, analytics ───────────────────────────────────────

    pub async fn chat_context(&self) -> Result<ChatContext> {
        self.cache
            .get_or_fetch(QueryKey::of(Scope::ChatContext), || {
                self.gateway.chat_context()
            })
            .await
    }

    pub async fn stats(&self) -> Result<Stats> {
        self.cache
            .get_or_fetch(QueryKey::of(Scope::Stats), || {
                self.gateway.stats_overview()
            })
            .await
    }

    pub async fn analytics_members(&self) -> Result<AnalyticsReport> {
        self.cache
            .get_or_fetch(QueryKey::of(Scope::AnalyticsMembers), || {
                self.gateway.analytics_members()
            })
            .await
    }

    pub async fn analytics_documents(&self) -> Result<AnalyticsReport> {
        self.cache
            .get_or_fetch(QueryKey::of(Scope::AnalyticsDocuments), || {
                self.gateway.analytics_documents()
            })
            .await
    }

    pub async fn analytics_overview(&self) -> Result<AnalyticsReport> {
        self.cache
            .get_or_fetch(QueryKey::of(Scope::AnalyticsOverview), || {
                self.gateway.analytics_overview()
            })
            .await
    }

    /// Search is user-interactive and never cached.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        self.gateway.search(query).await
    }

    /// On-demand AI narrative for one chart; never cached.
    pub async fn chart_insight(&self, request: &ChartInsightRequest) -> Result<String> {
        self.gateway.chart_insight(request).await
    }
}

/// Cache key for a filtered document list. The canonical param string
/// follows the query-pair order of [`DocumentListParams::to_query`].
fn documents_key(params: &DocumentListParams) -> QueryKey {
    let query = params.to_query();
    if query.is_empty() {
        return QueryKey::of(Scope::Documents);
    }
    let canonical = query
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("&");
    QueryKey::with_params(Scope::Documents, canonical)
}
