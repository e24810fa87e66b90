//! Consumer-facing load state
//!
//! Single-writer: only the load coordinator (and its own-generation
//! enrichment task) mutates this, through the watch channel it owns.

use super::snapshot::Snapshot;
use std::sync::Arc;

/// What consumers observe between and after aggregation cycles.
///
/// There is no hard failure state: consumers see live data, synthetic data
/// tagged as such, or — after exhausted retries — synthetic data plus a
/// soft advisory in `last_error`.
#[derive(Debug, Clone, Default)]
pub struct LoadState {
    /// An aggregation episode is in progress, including the backoff
    /// windows between retry attempts.
    pub is_loading: bool,
    /// Soft advisory, set only when every category failed in the last cycle.
    pub last_error: Option<String>,
    /// The most recently published snapshot, if any cycle has completed.
    pub snapshot: Option<Arc<Snapshot>>,
}

impl LoadState {
    pub fn generation(&self) -> Option<u64> {
        self.snapshot.as_ref().map(|s| s.generation)
    }
}
