//! Client for the `/api/documents` route group.

use std::sync::Arc;

use crate::config::{endpoints, TimeoutTier};
use crate::error::Result;
use crate::transport::{FilePayload, ProgressFn, Transport};
use crate::types::{
    DeleteResponse, Document, DocumentListParams, DocumentUploadOptions, DocumentUploadResponse,
    DocumentsResponse,
};

#[derive(Debug, Clone)]
pub struct DocumentsClient {
    transport: Arc<Transport>,
}

impl DocumentsClient {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// List documents with optional filters. Absent filters are omitted
    /// from the query string.
    ///
    /// GET /api/documents?skip=&limit=&document_type=&category=&search=
    pub async fn list(&self, params: &DocumentListParams) -> Result<DocumentsResponse> {
        let backend = self.transport.config().backend;
        self.transport
            .get_json(
                endpoints::documents(backend),
                &params.to_query(),
                TimeoutTier::Short,
            )
            .await
    }

    /// Fetch one document with its extracted content.
    ///
    /// GET /api/documents/{id}
    pub async fn get(&self, id: i64) -> Result<Document> {
        let backend = self.transport.config().backend;
        let path = format!("{}/{}", endpoints::documents(backend), id);
        self.transport.get_json(&path, &[], TimeoutTier::Short).await
    }

    /// One-shot upload without progress reporting.
    ///
    /// POST /api/documents/upload
    pub async fn upload(
        &self,
        file: FilePayload,
        options: &DocumentUploadOptions,
    ) -> Result<DocumentUploadResponse> {
        let backend = self.transport.config().backend;
        self.transport
            .upload(
                endpoints::documents_upload(backend),
                file,
                Self::upload_fields(options),
            )
            .await
    }

    /// Upload with per-chunk percent progress, for the upload queue.
    ///
    /// POST /api/documents/upload
    pub async fn upload_with_progress(
        &self,
        file: FilePayload,
        options: &DocumentUploadOptions,
        progress: ProgressFn,
    ) -> Result<DocumentUploadResponse> {
        let backend = self.transport.config().backend;
        self.transport
            .upload_with_progress(
                endpoints::documents_upload(backend),
                file,
                Self::upload_fields(options),
                progress,
            )
            .await
    }

    /// Delete one document.
    ///
    /// DELETE /api/documents/{id}
    pub async fn delete(&self, id: i64) -> Result<DeleteResponse> {
        let backend = self.transport.config().backend;
        let path = format!("{}/{}", endpoints::documents(backend), id);
        self.transport.delete_json(&path, TimeoutTier::Short).await
    }

    /// Delete all documents.
    ///
    /// DELETE /api/documents
    pub async fn delete_all(&self) -> Result<DeleteResponse> {
        let backend = self.transport.config().backend;
        self.transport
            .delete_json(endpoints::documents(backend), TimeoutTier::Short)
            .await
    }

    fn upload_fields(options: &DocumentUploadOptions) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(ref category) = options.category {
            fields.push(("category", category.clone()));
        }
        if let Some(ref tags) = options.tags {
            fields.push(("tags", tags.clone()));
        }
        if let Some(generate) = options.generate_ai_summary {
            fields.push(("generate_ai_summary", generate.to_string()));
        }
        fields
    }
}
