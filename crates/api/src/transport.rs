//! HTTP transport: one request, bounded wait, classified failure.
//!
//! All resource clients funnel through here. The transport owns timeout
//! enforcement and error normalization; it performs no caching and no
//! retries (retry policy is opt-in per call site, see [`crate::retry`]).

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;

use crate::config::{ApiConfig, TimeoutTier};
use crate::error::{ApiError, Result};

const MAX_LOG_BODY_CHARS: usize = 512;
const UPLOAD_CHUNK_BYTES: usize = 64 * 1024;

/// Progress callback: invoked with integer percent complete (0–100).
/// Fire-and-forget; must not block.
pub type ProgressFn = Arc<dyn Fn(u8) + Send + Sync>;

/// Structured error body the backend attaches to failure statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
    error: Option<String>,
    message: Option<String>,
}

/// A file to send as a multipart part.
#[derive(Debug, Clone)]
pub struct FilePayload {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub mime: &'static str,
}

impl FilePayload {
    pub fn pdf(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
            mime: "application/pdf",
        }
    }

    pub fn csv(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
            mime: "text/csv",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Transport {
    client: reqwest::Client,
    config: ApiConfig,
}

impl Transport {
    pub fn new(config: ApiConfig) -> Self {
        // Per-call tier timeouts are enforced in `execute`; no global
        // client timeout so the tiers stay authoritative.
        let client = reqwest::Client::builder()
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        tier: TimeoutTier,
    ) -> Result<T> {
        let mut request = self.client.get(self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        self.execute(request, tier).await
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        tier: TimeoutTier,
    ) -> Result<T> {
        let request = self.client.post(self.url(path)).json(body);
        self.execute(request, tier).await
    }

    pub async fn delete_json<T: DeserializeOwned>(
        &self,
        path: &str,
        tier: TimeoutTier,
    ) -> Result<T> {
        let request = self.client.delete(self.url(path));
        self.execute(request, tier).await
    }

    /// One-shot multipart upload without progress reporting.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        file: FilePayload,
        fields: Vec<(&'static str, String)>,
    ) -> Result<T> {
        self.upload_inner(path, file, fields, None).await
    }

    /// Multipart upload reporting integer percent progress per chunk of
    /// the file transfer.
    pub async fn upload_with_progress<T: DeserializeOwned>(
        &self,
        path: &str,
        file: FilePayload,
        fields: Vec<(&'static str, String)>,
        progress: ProgressFn,
    ) -> Result<T> {
        self.upload_inner(path, file, fields, Some(progress)).await
    }

    async fn upload_inner<T: DeserializeOwned>(
        &self,
        path: &str,
        file: FilePayload,
        fields: Vec<(&'static str, String)>,
        progress: Option<ProgressFn>,
    ) -> Result<T> {
        let total = file.bytes.len();
        let file_part = match progress {
            Some(progress) => {
                let stream = progress_stream(file.bytes, progress);
                Part::stream_with_length(Body::wrap_stream(stream), total as u64)
            }
            None => Part::bytes(file.bytes),
        }
        .file_name(file.filename)
        .mime_str(file.mime)
        .map_err(|e| ApiError::invalid_request(format!("invalid upload mime type: {}", e)))?;

        let mut form = Form::new().part("file", file_part);
        for (name, value) in fields {
            form = form.text(name, value);
        }

        let request = self.client.post(self.url(path)).multipart(form);
        self.execute(request, TimeoutTier::Long).await
    }

    /// Send the request under the tier's timeout and normalize the result.
    /// If the timeout elapses the in-flight request is dropped (aborted)
    /// and a `Timeout` failure is produced.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        tier: TimeoutTier,
    ) -> Result<T> {
        let allowed = self.config.timeouts.duration(tier);
        let outcome = tokio::time::timeout(allowed, async {
            let response = request.send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<(StatusCode, String), ApiError>((status, body))
        })
        .await;

        let (status, body) = match outcome {
            Ok(result) => result?,
            Err(_) => return Err(ApiError::Timeout(allowed)),
        };

        Self::log_response(status, &body);

        if !status.is_success() {
            return Err(Self::classify_failure(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            debug!("failed to parse response body: {}", e);
            ApiError::Parse(e.to_string())
        })
    }

    /// Best-effort extraction of a structured message from an error body;
    /// falls back to a status-derived generic message.
    fn classify_failure(status: StatusCode, body: &str) -> ApiError {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.detail.or(parsed.error).or(parsed.message))
            .unwrap_or_else(|| generic_status_message(status));
        ApiError::from_status(status.as_u16(), message)
    }

    fn log_response(status: StatusCode, body: &str) {
        if status.is_success() {
            debug!("API response status: {}", status);
            return;
        }

        let mut preview = body.chars().take(MAX_LOG_BODY_CHARS).collect::<String>();
        if body.chars().count() > MAX_LOG_BODY_CHARS {
            preview.push_str("...");
        }
        debug!("API response error ({}): {}", status, preview);
    }
}

fn generic_status_message(status: StatusCode) -> String {
    match status.as_u16() {
        404 => "The requested record was not found.".to_string(),
        409 => "This item conflicts with one that already exists.".to_string(),
        413 => "The file exceeds the allowed size limit.".to_string(),
        400..=499 => "The request was rejected by the server.".to_string(),
        _ => "The server is currently unavailable.".to_string(),
    }
}

/// Chunk the payload and report percent complete as each chunk is handed
/// to the transfer. The final chunk always reports 100.
fn progress_stream(
    bytes: Vec<u8>,
    progress: ProgressFn,
) -> impl futures::Stream<Item = std::result::Result<Vec<u8>, std::io::Error>> {
    let total = bytes.len().max(1);
    let chunks: Vec<Vec<u8>> = bytes
        .chunks(UPLOAD_CHUNK_BYTES)
        .map(|chunk| chunk.to_vec())
        .collect();

    let mut sent = 0_usize;
    futures::stream::iter(chunks.into_iter().map(move |chunk| {
        sent += chunk.len();
        let percent = ((sent as f64 / total as f64) * 100.0).round() as u8;
        progress(percent.min(100));
        Ok(chunk)
    }))
}
