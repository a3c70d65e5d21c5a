//! Per-resource API clients.
//!
//! Each module maps 1:1 to a backend route group and only builds URLs and
//! payloads; transport failures propagate unchanged.

mod analytics;
mod chat;
mod documents;
mod members;
mod organization;
mod search;
mod stats;

pub use analytics::AnalyticsClient;
pub use chat::ChatClient;
pub use documents::DocumentsClient;
pub use members::MembersClient;
pub use organization::OrganizationClient;
pub use search::SearchClient;
pub use stats::StatsClient;

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::transport::Transport;

/// All resource clients over one shared transport.
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub members: MembersClient,
    pub documents: DocumentsClient,
    pub organization: OrganizationClient,
    pub chat: ChatClient,
    pub stats: StatsClient,
    pub search: SearchClient,
    pub analytics: AnalyticsClient,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self::with_transport(Arc::new(Transport::new(config)))
    }

    pub fn with_transport(transport: Arc<Transport>) -> Self {
        Self {
            members: MembersClient::new(Arc::clone(&transport)),
            documents: DocumentsClient::new(Arc::clone(&transport)),
            organization: OrganizationClient::new(Arc::clone(&transport)),
            chat: ChatClient::new(Arc::clone(&transport)),
            stats: StatsClient::new(Arc::clone(&transport)),
            search: SearchClient::new(Arc::clone(&transport)),
            analytics: AnalyticsClient::new(transport),
        }
    }
}
