//! Normalized result of one upstream fetch
//!
//! The fetcher produces exactly one outcome per category per cycle.
//! Outcomes are immutable once built.

use super::category::EntityCategory;
use serde::{Deserialize, Serialize};

/// How a bounded upstream call settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    /// Success with at least one record
    Ok,
    /// Valid response, zero records — not an error, never retried
    Empty,
    /// The call exceeded its time bound
    Timeout,
    /// Network failure, malformed payload, or upstream error status
    Error,
}

/// The uniform outcome of one upstream fetch.
#[derive(Debug, Clone)]
pub struct SourceOutcome<T> {
    pub category: EntityCategory,
    pub status: SourceStatus,
    pub records: Vec<T>,
    pub error_detail: Option<String>,
    /// Whether a failed outcome is worth an automatic re-attempt.
    /// Always false for `Ok` and `Empty`.
    pub transient: bool,
}

impl<T> SourceOutcome<T> {
    /// Successful fetch. Zero records normalize to `Empty` — a valid empty
    /// response is infrastructurally different from an unreachable source.
    pub fn ok(category: EntityCategory, records: Vec<T>) -> Self {
        let status = if records.is_empty() {
            SourceStatus::Empty
        } else {
            SourceStatus::Ok
        };
        Self {
            category,
            status,
            records,
            error_detail: None,
            transient: false,
        }
    }

    /// The fetch exceeded its bound. Timeouts are always transient.
    pub fn timeout(category: EntityCategory, bound_ms: u64) -> Self {
        Self {
            category,
            status: SourceStatus::Timeout,
            records: Vec::new(),
            error_detail: Some(format!("fetch exceeded {}ms bound", bound_ms)),
            transient: true,
        }
    }

    /// The fetch failed outright.
    pub fn error(category: EntityCategory, detail: impl Into<String>, transient: bool) -> Self {
        Self {
            category,
            status: SourceStatus::Error,
            records: Vec::new(),
            error_detail: Some(detail.into()),
            transient,
        }
    }

    /// Whether the reconciler can use these records as live data.
    pub fn is_usable(&self) -> bool {
        self.status == SourceStatus::Ok && !self.records.is_empty()
    }

    /// Whether this outcome represents a failed call (timeout or error).
    /// `Empty` is not a failure — it goes straight to fallback.
    pub fn is_failure(&self) -> bool {
        matches!(self.status, SourceStatus::Timeout | SourceStatus::Error)
    }
}
