//! HTTP client for the orgdesk backend: transport with timeout tiers,
//! classified error taxonomy, opt-in retry, and one thin client per
//! backend route group.

pub mod clients;
pub mod config;
pub mod error;
pub mod retry;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod testutil;

pub use clients::ApiClient;
pub use config::{ApiConfig, BackendKind, TimeoutTier, TimeoutTiers};
pub use error::{ApiError, Result, RetryClass};
pub use transport::{FilePayload, ProgressFn, Transport};
