//! Wire types for the backend API.
//!
//! Endpoints use one of two envelope shapes: most wrap payloads in
//! [`ApiEnvelope`], while the list endpoints for members/documents return
//! flat shapes with `total`/`data`/`documents` at the top level. Each
//! response type models its endpoint's documented shape; there is no
//! single polymorphic envelope.

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

/// Generic `{status, message?, data?, error?}` envelope used by the
/// organization, chat-context, stats and analytics endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the envelope, turning `status: "error"` bodies into a
    /// classified failure.
    pub fn into_data(self) -> Result<T> {
        if self.status == "error" {
            let message = self
                .error
                .or(self.message)
                .unwrap_or_else(|| "The server reported an error.".to_string());
            return Err(ApiError::Unknown(message));
        }
        self.data
            .ok_or_else(|| ApiError::Parse("envelope is missing the data field".to_string()))
    }
}

// ── Members ──────────────────────────────────────────────────────────────

/// A person/organization record. Extended fields are organization-specific
/// CSV columns the backend persists as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_type: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_category: Option<String>,
}

/// Flat list shape for `GET /api/members`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembersResponse {
    pub status: String,
    pub total: i64,
    pub data: Vec<Member>,
}

// ── Documents ────────────────────────────────────────────────────────────

/// An uploaded file and its extracted content. `processed` is monotonic
/// false→true; summary/keywords/tables may be absent until it flips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub filename: String,
    pub file_path: String,
    pub file_size: i64,
    pub document_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables_data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<String>,
    pub processed: bool,
}

/// Optional filters for `GET /api/documents`. Absent fields are omitted
/// from the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentListParams {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub document_type: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
}

impl DocumentListParams {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(skip) = self.skip {
            query.push(("skip", skip.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(ref document_type) = self.document_type {
            query.push(("document_type", document_type.clone()));
        }
        if let Some(ref category) = self.category {
            query.push(("category", category.clone()));
        }
        if let Some(ref search) = self.search {
            query.push(("search", search.clone()));
        }
        query
    }
}

/// Flat list shape for `GET /api/documents`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentsResponse {
    pub total: i64,
    pub skip: i64,
    pub limit: i64,
    pub documents: Vec<Document>,
}

/// Upload options for `POST /api/documents/upload`.
#[derive(Debug, Clone, Default)]
pub struct DocumentUploadOptions {
    pub category: Option<String>,
    /// Comma-separated tags, passed through as-is.
    pub tags: Option<String>,
    /// Whether server-side AI summarization runs for this document.
    pub generate_ai_summary: Option<bool>,
}

/// Summary of an accepted upload returned by `POST /api/documents/upload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedDocument {
    pub id: i64,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size_mb: Option<f64>,
    pub document_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<i32>,
    pub processed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentUploadResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub document: UploadedDocument,
}

/// Confirmation shape for delete operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<i64>,
}

// ── Organization ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founded_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ideology: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_basis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objectives: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_at: Option<String>,
}

/// Shape shared by the CSV and organization-PDF upload endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Rows inserted, for CSV import.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imported: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
}

// ── Chat ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One prior turn sent as conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_history: Option<Vec<ChatTurn>>,
}

/// Chart-ready payload the assistant may attach to an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visualization {
    pub chart_type: String,
    pub data: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Answer shape for `POST /api/chat/query`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatAnswer {
    pub status: String,
    pub query: String,
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visualization: Option<Visualization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents_used: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_size: Option<i64>,
}

/// Payload of `GET /api/chat/context`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatContext {
    pub context: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_at: Option<String>,
}

// ── Stats & analytics ────────────────────────────────────────────────────

/// Aggregate counters from `GET /api/stats/overview`. The backend grows
/// fields here without notice, so everything is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_members: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_documents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_organizations: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_interactions: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inactive: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members_per_year: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members_per_department: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents_per_month: Option<serde_json::Value>,
}

/// Statistics + chart-ready series + narrative, as returned by the three
/// analytics report endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visualizations: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<Vec<String>>,
}

/// Body of `POST /api/analytics/chart-insight`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartInsightRequest {
    pub chart_type: String,
    pub chart_data: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartInsight {
    pub insight: String,
}

// ── Search ───────────────────────────────────────────────────────────────

/// Raw shape of `GET /api/documents/search/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub status: String,
    pub query: String,
    pub results_count: i64,
    pub documents: Vec<Document>,
}

/// Discriminator for normalized search hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchHitKind {
    Member,
    Document,
}

/// A normalized search hit: discriminator plus the underlying record,
/// regardless of how the backend structures its own envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "type")]
    pub kind: SearchHitKind,
    pub data: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_error_status_becomes_failure() {
        let envelope: ApiEnvelope<Stats> = serde_json::from_str(
            r#"{"status":"error","error":"stats unavailable"}"#,
        )
        .unwrap();
        let err = envelope.into_data().unwrap_err();
        assert_eq!(err.user_message(), "Something went wrong. Please try again.");
    }

    #[test]
    fn envelope_success_unwraps_data() {
        let envelope: ApiEnvelope<Organization> = serde_json::from_str(
            r#"{"status":"success","data":{"id":1,"name":"HIPMI"}}"#,
        )
        .unwrap();
        let org = envelope.into_data().unwrap();
        assert_eq!(org.name, "HIPMI");
    }

    #[test]
    fn document_list_params_omit_absent_fields() {
        let params = DocumentListParams {
            limit: Some(20),
            search: Some("annual report".to_string()),
            ..Default::default()
        };
        assert_eq!(
            params.to_query(),
            vec![
                ("limit", "20".to_string()),
                ("search", "annual report".to_string())
            ]
        );
        assert!(DocumentListParams::default().to_query().is_empty());
    }

    #[test]
    fn chat_request_skips_empty_history() {
        let body = serde_json::to_string(&ChatRequest {
            query: "how many members joined in 2024?".to_string(),
            conversation_history: None,
        })
        .unwrap();
        assert_eq!(body, r#"{"query":"how many members joined in 2024?"}"#);
    }

    #[test]
    fn chat_roles_serialize_snake_case() {
        assert_eq!(
            serde_json::to_string(&ChatRole::Assistant).unwrap(),
            "\"assistant\""
        );
        assert_eq!(serde_json::to_string(&ChatRole::User).unwrap(), "\"user\"");
    }

    #[test]
    fn flat_documents_response_parses() {
        let json = r#"{
            "total": 1, "skip": 0, "limit": 20,
            "documents": [{
                "id": 3, "filename": "report.pdf", "file_path": "/files/report.pdf",
                "file_size": 2097152, "document_type": "report",
                "category": "Reports", "tags": ["2024", "important"],
                "processed": false
            }]
        }"#;
        let parsed: DocumentsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.documents[0].id, 3);
        assert!(!parsed.documents[0].processed);
        assert_eq!(parsed.documents[0].summary, None);
    }
}
