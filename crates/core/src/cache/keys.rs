//! Cache key scopes, staleness windows and the mutation→query
//! invalidation graph.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Resource identity half of a cache key. One scope per query family;
/// parameterized queries (document filters, per-id lookups) add a params
/// string on the [`QueryKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Members,
    Documents,
    Organization,
    OrganizationLatest,
    OrganizationById,
    Stats,
    ChatContext,
    Analytics,
    AnalyticsMembers,
    AnalyticsDocuments,
    AnalyticsOverview,
}

impl Scope {
    /// How long a fresh entry is served without refetching. Volatile
    /// aggregates get short windows, rarely-changing records long ones.
    pub fn staleness_window(self) -> Duration {
        match self {
            Scope::Members | Scope::Documents => Duration::from_secs(5 * 60),
            Scope::Organization | Scope::OrganizationLatest | Scope::OrganizationById => {
                Duration::from_secs(10 * 60)
            }
            Scope::Stats => Duration::from_secs(2 * 60),
            Scope::ChatContext => Duration::from_secs(15 * 60),
            Scope::Analytics
            | Scope::AnalyticsMembers
            | Scope::AnalyticsDocuments
            | Scope::AnalyticsOverview => Duration::from_secs(5 * 60),
        }
    }
}

/// Full cache key: scope plus canonical parameter string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub scope: Scope,
    pub params: Option<String>,
}

impl QueryKey {
    pub fn of(scope: Scope) -> Self {
        Self {
            scope,
            params: None,
        }
    }

    pub fn with_params(scope: Scope, params: impl Into<String>) -> Self {
        Self {
            scope,
            params: Some(params.into()),
        }
    }
}

/// Mutations that change backend state. Each maps to the static list of
/// scopes whose cached data could have changed as a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    MemberCsvImport,
    MemberDelete,
    DocumentUpload,
    DocumentDelete,
    OrganizationUpload,
}

impl Mutation {
    /// The static invalidation graph. Chat context and analytics are
    /// derived views over members/documents, so every write to the
    /// underlying resource invalidates the derived scopes too —
    /// otherwise the UI shows stale aggregates after an upload/delete.
    pub fn invalidates(self) -> &'static [Scope] {
        match self {
            Mutation::MemberCsvImport => &[
                Scope::Members,
                Scope::Stats,
                Scope::Analytics,
                Scope::AnalyticsMembers,
                Scope::AnalyticsOverview,
                Scope::ChatContext,
            ],
            Mutation::MemberDelete => &[
                Scope::Members,
                Scope::Stats,
                Scope::Analytics,
                Scope::AnalyticsMembers,
            ],
            Mutation::DocumentUpload => &[
                Scope::Documents,
                Scope::Stats,
                Scope::ChatContext,
                Scope::Analytics,
                Scope::AnalyticsDocuments,
                Scope::AnalyticsOverview,
            ],
            Mutation::DocumentDelete => &[
                Scope::Documents,
                Scope::Stats,
                Scope::Analytics,
                Scope::AnalyticsDocuments,
                Scope::ChatContext,
            ],
            Mutation::OrganizationUpload => &[
                Scope::Organization,
                Scope::OrganizationLatest,
                Scope::ChatContext,
            ],
        }
    }
}
