//! Scripted in-process gateway for exercising the sync layer without a
//! socket.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use orgdesk_api::types::{
    AnalyticsReport, ChatAnswer, ChatContext, ChatRole, ChatTurn, ChartInsightRequest,
    DeleteResponse, Document, DocumentListParams, DocumentUploadOptions, DocumentUploadResponse,
    MembersResponse, Member, Organization, SearchHit, Stats, UploadResponse, UploadedDocument,
    DocumentsResponse,
};
use orgdesk_api::{ApiError, FilePayload, ProgressFn, Result};

use crate::gateway::ApiGateway;

pub(crate) fn document(id: i64, filename: &str, processed: bool) -> Document {
    Document {
        id,
        filename: filename.to_string(),
        file_path: format!("/files/{filename}"),
        file_size: 2 * 1024 * 1024,
        document_type: "report".to_string(),
        category: None,
        tags: None,
        summary: None,
        page_count: None,
        keywords: None,
        tables_data: None,
        uploaded_at: None,
        processed,
    }
}

pub(crate) fn member(id: i64, name: &str) -> Member {
    Member {
        id,
        name: name.to_string(),
        email: format!("{}@example.org", name.to_lowercase().replace(' ', ".")),
        phone: None,
        position: None,
        organization: None,
        membership_type: None,
        status: "active".to_string(),
        age: None,
        gender: None,
        company_name: None,
        business_category: None,
    }
}

/// Canned-state gateway. Every call appends its method name to `calls`;
/// tests assert on that log to count underlying requests.
#[derive(Default)]
pub(crate) struct FakeGateway {
    pub calls: Mutex<Vec<String>>,
    pub members: Mutex<Vec<Member>>,
    pub documents: Mutex<Vec<Document>>,
    /// Uploads whose filename is in here fail with a 500.
    pub failing_uploads: Mutex<HashSet<String>>,
    pub fail_chat: AtomicBool,
    pub last_chat_history: Mutex<Vec<ChatTurn>>,
    next_document_id: AtomicI64,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self {
            next_document_id: AtomicI64::new(1),
            ..Self::default()
        }
    }

    fn record(&self, method: &str) {
        self.calls.lock().unwrap().push(method.to_string());
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|name| *name == method)
            .count()
    }
}

#[async_trait]
impl ApiGateway for FakeGateway {
    async fn list_members(&self) -> Result<MembersResponse> {
        self.record("list_members");
        let members = self.members.lock().unwrap().clone();
        Ok(MembersResponse {
            status: "success".to_string(),
            total: members.len() as i64,
            data: members,
        })
    }

    async fn import_members_csv(&self, _file: FilePayload) -> Result<UploadResponse> {
        self.record("import_members_csv");
        let mut members = self.members.lock().unwrap();
        let id = members.len() as i64 + 1;
        members.push(member(id, "Imported Member"));
        Ok(UploadResponse {
            status: "success".to_string(),
            message: Some("1 member imported".to_string()),
            imported: Some(1),
            errors: None,
            organization_id: None,
            filename: None,
            file_size: None,
        })
    }

    async fn delete_member(&self, id: i64) -> Result<DeleteResponse> {
        self.record("delete_member");
        self.members.lock().unwrap().retain(|m| m.id != id);
        Ok(DeleteResponse {
            status: "success".to_string(),
            message: None,
            deleted: Some(1),
        })
    }

    async fn delete_all_members(&self) -> Result<DeleteResponse> {
        self.record("delete_all_members");
        let mut members = self.members.lock().unwrap();
        let deleted = members.len() as i64;
        members.clear();
        Ok(DeleteResponse {
            status: "success".to_string(),
            message: None,
            deleted: Some(deleted),
        })
    }

    async fn list_documents(&self, _params: &DocumentListParams) -> Result<DocumentsResponse> {
        self.record("list_documents");
        let documents = self.documents.lock().unwrap().clone();
        Ok(DocumentsResponse {
            total: documents.len() as i64,
            skip: 0,
            limit: 100,
            documents,
        })
    }

    async fn get_document(&self, id: i64) -> Result<Document> {
        self.record("get_document");
        self.documents
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| ApiError::from_status(404, "document not found"))
    }

    async fn upload_document(
        &self,
        file: FilePayload,
        options: &DocumentUploadOptions,
        progress: Option<ProgressFn>,
    ) -> Result<DocumentUploadResponse> {
        self.record("upload_document");
        if let Some(progress) = &progress {
            progress(50);
        }
        if self.failing_uploads.lock().unwrap().contains(&file.filename) {
            return Err(ApiError::from_status(500, "extraction failed"));
        }
        if let Some(progress) = &progress {
            progress(100);
        }
        let id = self.next_document_id.fetch_add(1, Ordering::SeqCst);
        // Stored as processed so a later read observes the flag flipped.
        let mut stored = document(id, &file.filename, true);
        stored.category = options.category.clone();
        self.documents.lock().unwrap().push(stored);
        Ok(DocumentUploadResponse {
            status: "success".to_string(),
            message: None,
            document: UploadedDocument {
                id,
                filename: file.filename,
                file_size_mb: Some(2.0),
                document_type: "report".to_string(),
                category: options.category.clone(),
                tags: None,
                page_count: None,
                processed: false,
                uploaded_at: None,
            },
        })
    }

    async fn delete_document(&self, id: i64) -> Result<DeleteResponse> {
        self.record("delete_document");
        self.documents.lock().unwrap().retain(|d| d.id != id);
        Ok(DeleteResponse {
            status: "success".to_string(),
            message: None,
            deleted: Some(1),
        })
    }

    async fn delete_all_documents(&self) -> Result<DeleteResponse> {
        self.record("delete_all_documents");
        let mut documents = self.documents.lock().unwrap();
        let deleted = documents.len() as i64;
        documents.clear();
        Ok(DeleteResponse {
            status: "success".to_string(),
            message: None,
            deleted: Some(deleted),
        })
    }

    async fn upload_organization_pdf(&self, _file: FilePayload) -> Result<UploadResponse> {
        self.record("upload_organization_pdf");
        Ok(UploadResponse {
            status: "success".to_string(),
            message: None,
            imported: None,
            errors: None,
            organization_id: Some(1),
            filename: None,
            file_size: None,
        })
    }

    async fn latest_organization(&self) -> Result<Organization> {
        self.record("latest_organization");
        Ok(Organization {
            id: 1,
            name: "HIPMI".to_string(),
            founded_date: None,
            ideology: None,
            legal_basis: None,
            objectives: None,
            summary: None,
            extracted_at: None,
        })
    }

    async fn list_organizations(&self) -> Result<Vec<Organization>> {
        self.record("list_organizations");
        Ok(vec![])
    }

    async fn get_organization(&self, _id: i64) -> Result<Organization> {
        self.record("get_organization");
        self.latest_organization().await
    }

    async fn send_chat(&self, query: &str, history: &[ChatTurn]) -> Result<ChatAnswer> {
        self.record("send_chat");
        *self.last_chat_history.lock().unwrap() = history.to_vec();
        if self.fail_chat.load(Ordering::SeqCst) {
            return Err(ApiError::Timeout(std::time::Duration::from_secs(30)));
        }
        Ok(ChatAnswer {
            status: "success".to_string(),
            query: query.to_string(),
            response: format!("answer to: {query}"),
            visualization: None,
            source: Some("documents".to_string()),
            documents_used: Some(2),
            context_size: Some(4096),
        })
    }

    async fn chat_context(&self) -> Result<ChatContext> {
        self.record("chat_context");
        Ok(ChatContext {
            context: "organization context".to_string(),
            source: "organization".to_string(),
            extracted_at: None,
        })
    }

    async fn stats_overview(&self) -> Result<Stats> {
        self.record("stats_overview");
        Ok(Stats {
            total_members: Some(self.members.lock().unwrap().len() as i64),
            total_documents: Some(self.documents.lock().unwrap().len() as i64),
            ..Stats::default()
        })
    }

    async fn search(&self, _query: &str) -> Result<Vec<SearchHit>> {
        self.record("search");
        Ok(vec![])
    }

    async fn analytics_members(&self) -> Result<AnalyticsReport> {
        self.record("analytics_members");
        Ok(AnalyticsReport::default())
    }

    async fn analytics_documents(&self) -> Result<AnalyticsReport> {
        self.record("analytics_documents");
        Ok(AnalyticsReport::default())
    }

    async fn analytics_overview(&self) -> Result<AnalyticsReport> {
        self.record("analytics_overview");
        Ok(AnalyticsReport::default())
    }

    async fn chart_insight(&self, _request: &ChartInsightRequest) -> Result<String> {
        self.record("chart_insight");
        Ok("Most members joined in 2024.".to_string())
    }
}
