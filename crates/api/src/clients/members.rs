//! Client for the `/api/members` route group.

use std::sync::Arc;

use crate::config::{endpoints, TimeoutTier};
use crate::error::Result;
use crate::transport::{FilePayload, Transport};
use crate::types::{DeleteResponse, MembersResponse, UploadResponse};

#[derive(Debug, Clone)]
pub struct MembersClient {
    transport: Arc<Transport>,
}

impl MembersClient {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// List all members.
    ///
    /// GET /api/members
    pub async fn list(&self) -> Result<MembersResponse> {
        let backend = self.transport.config().backend;
        self.transport
            .get_json(endpoints::members(backend), &[], TimeoutTier::Short)
            .await
    }

    /// Bulk-import members from a CSV file.
    ///
    /// POST /api/members/upload-csv
    pub async fn upload_csv(&self, file: FilePayload) -> Result<UploadResponse> {
        let backend = self.transport.config().backend;
        self.transport
            .upload(endpoints::members_upload_csv(backend), file, Vec::new())
            .await
    }

    /// Delete one member.
    ///
    /// DELETE /api/members/{id}
    pub async fn delete(&self, id: i64) -> Result<DeleteResponse> {
        let backend = self.transport.config().backend;
        let path = format!("{}/{}", endpoints::members(backend), id);
        self.transport.delete_json(&path, TimeoutTier::Short).await
    }

    /// Delete all members.
    ///
    /// DELETE /api/members
    pub async fn delete_all(&self) -> Result<DeleteResponse> {
        let backend = self.transport.config().backend;
        self.transport
            .delete_json(endpoints::members(backend), TimeoutTier::Short)
            .await
    }
}
