//! Client for full-text document search.

use std::sync::Arc;

use crate::config::{endpoints, TimeoutTier};
use crate::error::Result;
use crate::transport::Transport;
use crate::types::{SearchHit, SearchHitKind, SearchResponse};

#[derive(Debug, Clone)]
pub struct SearchClient {
    transport: Arc<Transport>,
}

impl SearchClient {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Full-text search, normalized to discriminator-tagged hits
    /// regardless of the backend's own response envelope.
    ///
    /// GET /api/documents/search/?q=
    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let backend = self.transport.config().backend;
        let response: SearchResponse = self
            .transport
            .get_json(
                endpoints::documents_search(backend),
                &[("q", query.to_string())],
                TimeoutTier::Short,
            )
            .await?;

        response
            .documents
            .into_iter()
            .map(|document| {
                Ok(SearchHit {
                    kind: SearchHitKind::Document,
                    data: serde_json::to_value(document)
                        .map_err(|e| crate::error::ApiError::Parse(e.to_string()))?,
                })
            })
            .collect()
    }
}
