//! Chat session with a persistent transcript.
//!
//! The user turn is appended optimistically before the request goes
//! out; a failed request rolls the transcript back so a retry does not
//! duplicate the question. Persistence is best-effort: a store failure
//! is logged and the session keeps working in memory.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use orgdesk_api::types::{ChatAnswer, ChatRole, ChatTurn, Visualization};
use orgdesk_api::Result;
use serde::{Deserialize, Serialize};

use crate::gateway::ApiGateway;

const TRANSCRIPT_FILE: &str = "orgdesk_chat_history.json";

/// One rendered transcript row. Assistant entries may carry the
/// chart payload that came with the answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: ChatRole,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visualization: Option<Visualization>,
}

pub trait TranscriptStore: Send + Sync {
    fn load(&self) -> io::Result<Vec<TranscriptEntry>>;
    fn save(&self, entries: &[TranscriptEntry]) -> io::Result<()>;
}

/// Volatile store for ephemeral sessions and tests.
#[derive(Default)]
pub struct MemoryTranscriptStore {
    entries: Mutex<Vec<TranscriptEntry>>,
}

impl MemoryTranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TranscriptStore for MemoryTranscriptStore {
    fn load(&self) -> io::Result<Vec<TranscriptEntry>> {
        Ok(self
            .entries
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "transcript lock poisoned"))?
            .clone())
    }

    fn save(&self, entries: &[TranscriptEntry]) -> io::Result<()> {
        *self
            .entries
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "transcript lock poisoned"))? =
            entries.to_vec();
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct PersistedTranscript {
    saved_at: DateTime<Utc>,
    messages: Vec<TranscriptEntry>,
}

/// JSON file in the app data directory. A missing or corrupt file loads
/// as an empty transcript rather than failing the session.
pub struct FileTranscriptStore {
    path: PathBuf,
}

impl FileTranscriptStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(TRANSCRIPT_FILE),
        }
    }
}

impl TranscriptStore for FileTranscriptStore {
    fn load(&self) -> io::Result<Vec<TranscriptEntry>> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err),
        };
        match serde_json::from_slice::<PersistedTranscript>(&raw) {
            Ok(persisted) => Ok(persisted.messages),
            Err(err) => {
                log::warn!(
                    "transcript at {} is unreadable, starting empty: {err}",
                    self.path.display()
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, entries: &[TranscriptEntry]) -> io::Result<()> {
        let persisted = PersistedTranscript {
            saved_at: Utc::now(),
            messages: entries.to_vec(),
        };
        let raw = serde_json::to_vec(&persisted)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        fs::write(&self.path, raw)
    }
}

pub struct ChatSession {
    store: Arc<dyn TranscriptStore>,
    turns: Vec<TranscriptEntry>,
}

impl ChatSession {
    pub fn new(store: Arc<dyn TranscriptStore>) -> Self {
        let turns = store.load().unwrap_or_else(|err| {
            log::warn!("failed to load chat transcript: {err}");
            Vec::new()
        });
        Self { store, turns }
    }

    pub fn turns(&self) -> &[TranscriptEntry] {
        &self.turns
    }

    /// Send one question with the prior transcript as conversation
    /// history. The user turn is appended before the request; on failure
    /// the transcript is restored to its pre-send state.
    pub async fn send(&mut self, gateway: &dyn ApiGateway, query: &str) -> Result<ChatAnswer> {
        let before = self.turns.len();
        self.turns.push(TranscriptEntry {
            role: ChatRole::User,
            content: query.to_string(),
            visualization: None,
        });
        self.persist();

        let history: Vec<ChatTurn> = self.turns[..before]
            .iter()
            .map(|entry| ChatTurn {
                role: entry.role,
                content: entry.content.clone(),
            })
            .collect();

        match gateway.send_chat(query, &history).await {
            Ok(answer) => {
                self.turns.push(TranscriptEntry {
                    role: ChatRole::Assistant,
                    content: answer.response.clone(),
                    visualization: answer.visualization.clone(),
                });
                self.persist();
                Ok(answer)
            }
            Err(err) => {
                self.turns.truncate(before);
                self.persist();
                Err(err)
            }
        }
    }

    pub fn clear(&mut self) {
        self.turns.clear();
        self.persist();
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.turns) {
            log::warn!("failed to persist chat transcript: {err}");
        }
    }
}
