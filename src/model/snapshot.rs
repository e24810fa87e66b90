//! The merged aggregation result published to consumers
//!
//! Snapshots are immutable: a new cycle produces a new snapshot, and the
//! enrichment follow-up produces a new snapshot for the same generation.

use super::category::EntityCategory;
use super::record::{AgentRecord, AssistantRecord, UserRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Whether a category's records came from a real upstream call or from
/// the fallback synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Live,
    Synthetic,
}

/// One category's reconciled records, tagged with their origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResult<T> {
    pub records: Vec<T>,
    pub origin: Origin,
}

impl<T> CategoryResult<T> {
    pub fn live(records: Vec<T>) -> Self {
        Self {
            records,
            origin: Origin::Live,
        }
    }

    pub fn synthetic(records: Vec<T>) -> Self {
        Self {
            records,
            origin: Origin::Synthetic,
        }
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

/// One immutable, fully-merged aggregation result across all categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Monotonically increasing cycle id; used to discard stale
    /// asynchronous writes from superseded cycles.
    pub generation: u64,
    pub generated_at: DateTime<Utc>,
    /// Whether the assistant records have been through owner enrichment.
    pub enriched: bool,
    pub users: CategoryResult<UserRecord>,
    pub agents: CategoryResult<AgentRecord>,
    pub assistants: CategoryResult<AssistantRecord>,
}

impl Snapshot {
    pub fn origin_of(&self, category: EntityCategory) -> Origin {
        match category {
            EntityCategory::Users => self.users.origin,
            EntityCategory::Agents => self.agents.origin,
            EntityCategory::Assistants => self.assistants.origin,
        }
    }

    pub fn record_count(&self, category: EntityCategory) -> usize {
        match category {
            EntityCategory::Users => self.users.record_count(),
            EntityCategory::Agents => self.agents.record_count(),
            EntityCategory::Assistants => self.assistants.record_count(),
        }
    }

    /// Category → origin, for consumers that badge synthetic data.
    pub fn data_source_map(&self) -> HashMap<EntityCategory, Origin> {
        EntityCategory::ALL
            .iter()
            .map(|c| (*c, self.origin_of(*c)))
            .collect()
    }

    /// The enrichment follow-up: same generation, updated assistants.
    pub fn with_enriched_assistants(&self, records: Vec<AssistantRecord>) -> Snapshot {
        let mut next = self.clone();
        next.assistants.records = records;
        next.enriched = true;
        next
    }
}
