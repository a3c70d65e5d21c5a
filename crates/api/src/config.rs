//! API configuration: base URL, backend selection and timeout tiers.

use std::time::Duration;

/// Environment variable for the backend base URL.
pub const API_URL_ENV: &str = "ORGDESK_API_URL";
/// Environment variable selecting the lightweight mock backend.
pub const USE_MOCK_SERVER_ENV: &str = "ORGDESK_USE_MOCK_SERVER";

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Which backend the client talks to. The mock server serves flat
/// collections without the `/api` prefix and returns stats unwrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Api,
    MockServer,
}

/// Timeout tier selected per call class.
///
/// Upload size and AI inference latency are structurally different from
/// simple CRUD round-trips, so one global timeout would either starve
/// uploads or make plain reads sluggish on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutTier {
    /// Interactive reads and writes.
    Short,
    /// File uploads.
    Long,
    /// AI chat completions.
    Extended,
}

/// Concrete durations for the three tiers. Injectable so tests can use
/// millisecond-scale tiers against a stalled mock server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutTiers {
    pub short: Duration,
    pub long: Duration,
    pub extended: Duration,
}

impl Default for TimeoutTiers {
    fn default() -> Self {
        Self {
            short: Duration::from_secs(15),
            long: Duration::from_secs(60),
            extended: Duration::from_secs(30),
        }
    }
}

impl TimeoutTiers {
    pub fn duration(&self, tier: TimeoutTier) -> Duration {
        match tier {
            TimeoutTier::Short => self.short,
            TimeoutTier::Long => self.long,
            TimeoutTier::Extended => self.extended,
        }
    }
}

/// Client configuration, environment-driven with test overrides.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub backend: BackendKind,
    pub timeouts: TimeoutTiers,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            backend: BackendKind::Api,
            timeouts: TimeoutTiers::default(),
        }
    }

    /// Read configuration from the environment, falling back to the local
    /// development backend.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let backend = match std::env::var(USE_MOCK_SERVER_ENV) {
            Ok(value) if value == "1" || value.eq_ignore_ascii_case("true") => {
                BackendKind::MockServer
            }
            _ => BackendKind::Api,
        };
        Self {
            base_url,
            backend,
            timeouts: TimeoutTiers::default(),
        }
    }

    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_timeouts(mut self, timeouts: TimeoutTiers) -> Self {
        self.timeouts = timeouts;
        self
    }
}

/// Endpoint path table per backend route group.
///
/// The mock backend is a flat JSON server, so its paths drop the `/api`
/// prefix and route-group nesting.
pub mod endpoints {
    use super::BackendKind;

    pub fn members(backend: BackendKind) -> &'static str {
        match backend {
            BackendKind::Api => "/api/members",
            BackendKind::MockServer => "/members",
        }
    }

    pub fn members_upload_csv(backend: BackendKind) -> &'static str {
        match backend {
            BackendKind::Api => "/api/members/upload-csv",
            BackendKind::MockServer => "/members/upload-csv",
        }
    }

    pub fn documents(backend: BackendKind) -> &'static str {
        match backend {
            BackendKind::Api => "/api/documents",
            BackendKind::MockServer => "/documents",
        }
    }

    pub fn documents_upload(backend: BackendKind) -> &'static str {
        match backend {
            BackendKind::Api => "/api/documents/upload",
            BackendKind::MockServer => "/documents/upload",
        }
    }

    // Trailing slash is load-bearing: the backend redirects without it and
    // drops the query string.
    pub fn documents_search(backend: BackendKind) -> &'static str {
        match backend {
            BackendKind::Api => "/api/documents/search/",
            BackendKind::MockServer => "/documents/search/",
        }
    }

    pub fn organization_upload(backend: BackendKind) -> &'static str {
        match backend {
            BackendKind::Api => "/api/organization/upload",
            BackendKind::MockServer => "/organization/upload",
        }
    }

    pub fn organization_latest(backend: BackendKind) -> &'static str {
        match backend {
            BackendKind::Api => "/api/organization/latest",
            BackendKind::MockServer => "/organization/latest",
        }
    }

    pub fn organization_all(backend: BackendKind) -> &'static str {
        match backend {
            BackendKind::Api => "/api/organization/all",
            BackendKind::MockServer => "/organization/all",
        }
    }

    pub fn organization_data(backend: BackendKind, id: i64) -> String {
        match backend {
            BackendKind::Api => format!("/api/organization/data/{}", id),
            BackendKind::MockServer => format!("/organization/data/{}", id),
        }
    }

    pub fn chat_query(backend: BackendKind) -> &'static str {
        match backend {
            BackendKind::Api => "/api/chat/query",
            BackendKind::MockServer => "/chat/query",
        }
    }

    pub fn chat_context(backend: BackendKind) -> &'static str {
        match backend {
            BackendKind::Api => "/api/chat/context",
            BackendKind::MockServer => "/chat/context",
        }
    }

    pub fn stats_overview(backend: BackendKind) -> &'static str {
        match backend {
            BackendKind::Api => "/api/stats/overview",
            BackendKind::MockServer => "/stats/overview",
        }
    }

    pub fn analytics_members(backend: BackendKind) -> &'static str {
        match backend {
            BackendKind::Api => "/api/analytics/members",
            BackendKind::MockServer => "/analytics/members",
        }
    }

    pub fn analytics_documents(backend: BackendKind) -> &'static str {
        match backend {
            BackendKind::Api => "/api/analytics/documents",
            BackendKind::MockServer => "/analytics/documents",
        }
    }

    pub fn analytics_overview(backend: BackendKind) -> &'static str {
        match backend {
            BackendKind::Api => "/api/analytics/overview",
            BackendKind::MockServer => "/analytics/overview",
        }
    }

    pub fn analytics_chart_insight(backend: BackendKind) -> &'static str {
        match backend {
            BackendKind::Api => "/api/analytics/chart-insight",
            BackendKind::MockServer => "/analytics/chart-insight",
        }
    }
}
