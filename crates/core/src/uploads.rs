//! Sequential multi-file upload queue.
//!
//! Files accumulate as pending entries, then one `drain` call uploads
//! them in order. A failed file records its error and the drain moves
//! on; cache invalidation for the document scopes happens once at the
//! end, and only when at least one file made it through.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use orgdesk_api::types::DocumentUploadOptions;
use orgdesk_api::{FilePayload, ProgressFn};
use uuid::Uuid;

use crate::cache::{Mutation, QueryCache};
use crate::gateway::ApiGateway;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    Pending,
    Uploading,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    AllSucceeded,
    Mixed,
    AllFailed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub succeeded: usize,
    pub failed: usize,
}

impl DrainReport {
    /// `None` when the drain had nothing to do.
    pub fn outcome(&self) -> Option<DrainOutcome> {
        match (self.succeeded, self.failed) {
            (0, 0) => None,
            (_, 0) => Some(DrainOutcome::AllSucceeded),
            (0, _) => Some(DrainOutcome::AllFailed),
            _ => Some(DrainOutcome::Mixed),
        }
    }
}

pub struct QueuedFile {
    pub id: Uuid,
    pub state: UploadState,
    pub options: DocumentUploadOptions,
    /// User-facing message for a failed upload.
    pub error: Option<String>,
    /// Backend id once the upload succeeded.
    pub document_id: Option<i64>,
    payload: FilePayload,
    progress: Arc<AtomicU8>,
}

impl QueuedFile {
    pub fn filename(&self) -> &str {
        &self.payload.filename
    }

    /// Percent complete (0–100); live while the drain is uploading this
    /// file from another task.
    pub fn progress(&self) -> u8 {
        self.progress.load(Ordering::Relaxed)
    }
}

#[derive(Default)]
pub struct UploadQueue {
    items: Vec<QueuedFile>,
}

impl UploadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, payload: FilePayload, options: DocumentUploadOptions) -> Uuid {
        let id = Uuid::new_v4();
        self.items.push(QueuedFile {
            id,
            state: UploadState::Pending,
            options,
            error: None,
            document_id: None,
            payload,
            progress: Arc::new(AtomicU8::new(0)),
        });
        id
    }

    pub fn items(&self) -> &[QueuedFile] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove one entry unless its upload is in flight.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.items.len();
        self.items
            .retain(|item| item.id != id || item.state == UploadState::Uploading);
        self.items.len() != before
    }

    pub fn clear_pending(&mut self) {
        self.items.retain(|item| item.state != UploadState::Pending);
    }

    pub fn prune_succeeded(&mut self) {
        self.items.retain(|item| item.state != UploadState::Success);
    }

    /// Upload every pending file in queue order. Failures are recorded
    /// on the entry and do not stop later files. The document scopes are
    /// invalidated once, after the loop, when at least one upload
    /// succeeded; an all-failed drain leaves the cache untouched.
    pub async fn drain(&mut self, gateway: &dyn ApiGateway, cache: &QueryCache) -> DrainReport {
        let mut report = DrainReport::default();

        for item in self
            .items
            .iter_mut()
            .filter(|item| item.state == UploadState::Pending)
        {
            item.state = UploadState::Uploading;
            let progress = Arc::clone(&item.progress);
            let callback: ProgressFn = Arc::new(move |percent| {
                progress.store(percent, Ordering::Relaxed);
            });

            match gateway
                .upload_document(item.payload.clone(), &item.options, Some(callback))
                .await
            {
                Ok(response) => {
                    item.state = UploadState::Success;
                    item.progress.store(100, Ordering::Relaxed);
                    item.document_id = Some(response.document.id);
                    report.succeeded += 1;
                }
                Err(err) => {
                    log::warn!("upload of {} failed: {err}", item.payload.filename);
                    item.state = UploadState::Error;
                    item.error = Some(err.user_message());
                    report.failed += 1;
                }
            }
        }

        if report.succeeded > 0 {
            cache.apply_mutation(Mutation::DocumentUpload).await;
        }
        report
    }
}
