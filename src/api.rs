//! Consumer-facing API layer
//!
//! `SynopticApi` is the single entry point for everything outside the
//! engine (dashboards, CLIs, embedders). Consumers call these methods —
//! they never reach into the coordinator, resolver, or scheduler directly.

use crate::aggregate::{LoadCoordinator, OwnerResolver, RefreshScheduler, RetryController};
use crate::config::Config;
use crate::model::{LoadState, Snapshot};
use crate::source::{DirectoryLookup, PlatformSources};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Single entry point for all consumer-facing operations.
#[derive(Clone)]
pub struct SynopticApi {
    coordinator: Arc<LoadCoordinator>,
    scheduler: Arc<RefreshScheduler>,
}

impl SynopticApi {
    /// Assemble the engine from its upstream collaborators.
    pub fn new(
        sources: PlatformSources,
        primary_directory: Arc<dyn DirectoryLookup>,
        secondary_directories: Vec<Arc<dyn DirectoryLookup>>,
        config: Config,
    ) -> Self {
        let resolver = OwnerResolver::new(primary_directory, secondary_directories);
        let coordinator = LoadCoordinator::new(sources, resolver, &config);
        let retry = Arc::new(RetryController::new(&config));
        let scheduler = RefreshScheduler::new(Arc::clone(&coordinator), retry, &config);
        Self {
            coordinator,
            scheduler,
        }
    }

    /// Start the refresh schedule: one cycle now, then one per interval.
    pub fn start(&self) -> JoinHandle<()> {
        self.scheduler.spawn()
    }

    /// The most recently published snapshot, if any cycle has completed.
    pub fn get_snapshot(&self) -> Option<Arc<Snapshot>> {
        self.coordinator.current_state().snapshot
    }

    /// The full load state, including the loading flag and soft advisory.
    pub fn load_state(&self) -> LoadState {
        self.coordinator.current_state()
    }

    /// Fire-and-forget refresh, debounced by the in-flight guard.
    /// Resets the retry attempt budget.
    pub fn refresh(&self) {
        self.scheduler.refresh();
    }

    /// Run one guarded cycle and wait for its pre-enrichment publication.
    /// Returns false if a cycle was already in flight.
    pub async fn run_once(&self) -> bool {
        self.scheduler.run_now().await
    }

    /// Subscribe to every snapshot publication, including enrichment
    /// follow-ups.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.coordinator.subscribe()
    }
}
