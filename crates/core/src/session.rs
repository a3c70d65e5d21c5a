//! Persisted signed-in flag.
//!
//! Convenience gate for the dashboard shell only: it remembers that the
//! user went through the sign-in screen and nothing more. Requests are
//! not authenticated with it.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const SESSION_FILE: &str = "orgdesk_session.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionRecord {
    signed_in: bool,
}

pub struct SessionFlag {
    path: PathBuf,
}

impl SessionFlag {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(SESSION_FILE),
        }
    }

    /// Missing or unreadable state reads as signed out.
    pub fn is_signed_in(&self) -> bool {
        let Ok(raw) = fs::read(&self.path) else {
            return false;
        };
        serde_json::from_slice::<SessionRecord>(&raw)
            .map(|record| record.signed_in)
            .unwrap_or(false)
    }

    pub fn sign_in(&self) -> io::Result<()> {
        self.write(SessionRecord { signed_in: true })
    }

    pub fn sign_out(&self) -> io::Result<()> {
        self.write(SessionRecord { signed_in: false })
    }

    fn write(&self, record: SessionRecord) -> io::Result<()> {
        let raw = serde_json::to_vec(&record)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        fs::write(&self.path, raw)
    }
}
