//! Upstream source contracts
//!
//! Abstracts over transport (REST, database API, mock) so the aggregation
//! pipeline never depends on how an upstream is reached. All methods
//! return `SourceResult`; the fetcher converts failures into outcomes and
//! nothing raises past it.

use crate::model::{AgentRecord, UserRecord};
use crate::source::raw::RawAssistantRecord;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors from upstream source operations.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Non-2xx response from the upstream.
    #[error("upstream returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Connection-level failure (DNS, refused, reset).
    #[error("network error: {0}")]
    Network(String),

    /// The upstream answered but the payload did not parse.
    #[error("malformed payload: {0}")]
    Malformed(String),
}

impl SourceError {
    /// Whether an automatic re-attempt could plausibly succeed.
    ///
    /// Server-class statuses and network failures are transient; client-class
    /// statuses and malformed payloads are terminal and go straight to
    /// fallback without retry.
    pub fn is_transient(&self) -> bool {
        match self {
            SourceError::Status { status, .. } => *status >= 500,
            SourceError::Network(_) => true,
            SourceError::Malformed(_) => false,
        }
    }
}

/// Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// The user accounts upstream.
#[async_trait]
pub trait UsersSource: Send + Sync {
    async fn list(&self) -> SourceResult<Vec<UserRecord>>;
}

/// The worker agents upstream.
#[async_trait]
pub trait AgentsSource: Send + Sync {
    async fn get_all(&self) -> SourceResult<Vec<AgentRecord>>;
}

/// The personalized assistants upstream.
///
/// Exposes three progressively simpler strategies; the fetcher tries them
/// in declaration order and the first non-empty success wins.
#[async_trait]
pub trait AssistantsSource: Send + Sync {
    /// Rich companion endpoint: full records with embedded owner fields.
    async fn detailed(&self) -> SourceResult<Vec<RawAssistantRecord>>;

    /// Per-user personalization profiles.
    async fn profiled(&self) -> SourceResult<Vec<RawAssistantRecord>>;

    /// Bare legacy listing: names only, sometimes without ids.
    async fn bare(&self) -> SourceResult<Vec<RawAssistantRecord>>;
}

/// An identity row from a directory lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerIdentity {
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl OwnerIdentity {
    /// The name to display: full-name field first, else email local-part.
    pub fn preferred_name(&self) -> Option<String> {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .or_else(|| {
                self.email
                    .as_deref()
                    .and_then(crate::model::email_local_part)
            })
    }
}

/// A directory that resolves owner ids to identities.
///
/// `Ok(None)` means not-found — a definitive answer, distinct from a
/// lookup failure.
#[async_trait]
pub trait DirectoryLookup: Send + Sync {
    /// Stable identifier, for logs.
    fn id(&self) -> &str;

    async fn by_id(&self, owner_id: &str) -> SourceResult<Option<OwnerIdentity>>;
}

/// The bundle of upstream sources one coordinator aggregates over.
#[derive(Clone)]
pub struct PlatformSources {
    pub users: Arc<dyn UsersSource>,
    pub agents: Arc<dyn AgentsSource>,
    pub assistants: Arc<dyn AssistantsSource>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_class_status_is_transient() {
        assert!(SourceError::Status {
            status: 503,
            message: "unavailable".to_string()
        }
        .is_transient());
        assert!(!SourceError::Status {
            status: 404,
            message: "not found".to_string()
        }
        .is_transient());
    }

    #[test]
    fn network_is_transient_malformed_is_not() {
        assert!(SourceError::Network("connection refused".to_string()).is_transient());
        assert!(!SourceError::Malformed("expected array".to_string()).is_transient());
    }

    #[test]
    fn preferred_name_falls_back_to_email_local_part() {
        let identity = OwnerIdentity {
            display_name: Some("  ".to_string()),
            email: Some("ana.lima@example.com".to_string()),
        };
        assert_eq!(identity.preferred_name().as_deref(), Some("ana.lima"));

        let named = OwnerIdentity {
            display_name: Some("Ana Lima".to_string()),
            email: None,
        };
        assert_eq!(named.preferred_name().as_deref(), Some("Ana Lima"));

        let nothing = OwnerIdentity {
            display_name: None,
            email: None,
        };
        assert_eq!(nothing.preferred_name(), None);
    }
}
