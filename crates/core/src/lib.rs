//! Data-access and synchronization layer for the orgdesk dashboard:
//! cached reads with a static mutation→query invalidation graph, a
//! sequential multi-file upload queue and a chat session with a
//! persistent, rollback-safe transcript.

pub mod cache;
pub mod chat;
pub mod gateway;
pub mod service;
pub mod session;
pub mod uploads;

#[cfg(test)]
pub(crate) mod testsupport;

pub use cache::{Mutation, QueryCache, QueryKey, QueryState, Scope};
pub use chat::{
    ChatSession, FileTranscriptStore, MemoryTranscriptStore, TranscriptEntry, TranscriptStore,
};
pub use gateway::ApiGateway;
pub use service::DataService;
pub use session::SessionFlag;
pub use uploads::{DrainOutcome, DrainReport, QueuedFile, UploadQueue, UploadState};
