//! Load coordination
//!
//! Orchestrates one aggregation cycle: all category fetchers launched
//! concurrently, outcomes reconciled into an immutable snapshot, the
//! pre-enrichment snapshot published immediately, and owner enrichment
//! spawned in the background to publish a follow-up for the same
//! generation. Consumers never see a hard failure: partial failure is
//! recovered by synthetic substitution, and only a total failure sets the
//! soft advisory.

use crate::aggregate::enrich::OwnerResolver;
use crate::aggregate::reconcile::reconcile;
use crate::config::Config;
use crate::model::{AssistantRecord, EntityCategory, LoadState, Snapshot};
use crate::source::{
    synthetic_agents, synthetic_assistants, synthetic_users, PlatformSources, SourceFetcher,
};
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Advisory shown alongside fully synthetic data after a total failure.
const ALL_SOURCES_DOWN: &str = "all upstream sources unavailable; showing placeholder data";

/// Classification of one finished cycle, consumed by the retry layer.
#[derive(Debug, Clone, Copy)]
pub struct CycleOutcome {
    pub generation: u64,
    /// Every category failed (timeout or error; empty does not count).
    pub all_failed: bool,
    /// At least one category failed transiently.
    pub transient: bool,
}

impl CycleOutcome {
    /// Whether an automatic re-attempt is warranted.
    pub fn should_retry(&self) -> bool {
        self.transient
    }
}

/// Orchestrates aggregation cycles and owns the published load state.
pub struct LoadCoordinator {
    sources: PlatformSources,
    resolver: Arc<OwnerResolver>,
    fetcher: SourceFetcher,
    /// Current cycle generation; enrichment results from older generations
    /// are discarded on arrival.
    generation: Arc<AtomicU64>,
    state_tx: watch::Sender<LoadState>,
}

impl LoadCoordinator {
    pub fn new(sources: PlatformSources, resolver: OwnerResolver, config: &Config) -> Arc<Self> {
        let (state_tx, _) = watch::channel(LoadState::default());
        Arc::new(Self {
            sources,
            resolver: Arc::new(resolver),
            fetcher: SourceFetcher::new(config),
            generation: Arc::new(AtomicU64::new(0)),
            state_tx,
        })
    }

    /// Subscribe to every load-state publication, including enrichment
    /// follow-ups.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state_tx.subscribe()
    }

    pub fn current_state(&self) -> LoadState {
        self.state_tx.borrow().clone()
    }

    /// Raise or drop the loading flag. Owned by the retry layer so the
    /// flag spans a whole episode, backoff windows included.
    pub(crate) fn set_loading(&self, loading: bool) {
        self.state_tx.send_modify(|state| state.is_loading = loading);
    }

    /// Run one full aggregation cycle.
    ///
    /// Returns after the pre-enrichment snapshot is published; the
    /// enrichment follow-up continues in the background.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(generation, "aggregation cycle started");

        let (users, agents, assistants) = tokio::join!(
            self.fetcher.fetch_users(self.sources.users.as_ref()),
            self.fetcher.fetch_agents(self.sources.agents.as_ref()),
            self.fetcher.fetch_assistants(self.sources.assistants.as_ref()),
        );

        let failures = [users.is_failure(), agents.is_failure(), assistants.is_failure()];
        let all_failed = failures.iter().all(|f| *f);
        let transient = users.transient || agents.transient || assistants.transient;

        let snapshot = Arc::new(Snapshot {
            generation,
            generated_at: Utc::now(),
            enriched: false,
            users: reconcile(users, synthetic_users),
            agents: reconcile(agents, synthetic_agents),
            assistants: reconcile(assistants, synthetic_assistants),
        });

        for category in EntityCategory::ALL {
            debug!(
                generation,
                %category,
                origin = ?snapshot.origin_of(category),
                count = snapshot.record_count(category),
                "category reconciled"
            );
        }
        if all_failed {
            warn!(generation, "every category failed; publishing fully synthetic snapshot");
        }

        let assistant_records = snapshot.assistants.records.clone();
        self.state_tx.send_modify(|state| {
            state.last_error = all_failed.then(|| ALL_SOURCES_DOWN.to_string());
            state.snapshot = Some(Arc::clone(&snapshot));
        });

        self.spawn_enrichment(generation, assistant_records);

        CycleOutcome {
            generation,
            all_failed,
            transient,
        }
    }

    /// Background owner enrichment for one generation.
    ///
    /// Spawned exactly once per cycle, so enrichment never runs twice
    /// concurrently for the same generation. The follow-up publication is
    /// dropped if a newer cycle has superseded this one by the time the
    /// batch settles.
    fn spawn_enrichment(&self, generation: u64, records: Vec<AssistantRecord>) {
        if records.is_empty() {
            return;
        }
        let resolver = Arc::clone(&self.resolver);
        let counter = Arc::clone(&self.generation);
        let state_tx = self.state_tx.clone();

        tokio::spawn(async move {
            let enriched = resolver.enrich_batch(records).await;
            if counter.load(Ordering::SeqCst) != generation {
                debug!(generation, "discarding stale enrichment result");
                return;
            }
            state_tx.send_modify(|state| {
                let still_current = state
                    .snapshot
                    .as_ref()
                    .is_some_and(|s| s.generation == generation);
                if still_current {
                    let updated = state
                        .snapshot
                        .as_ref()
                        .map(|s| Arc::new(s.with_enriched_assistants(enriched)));
                    state.snapshot = updated;
                    debug!(generation, "published enrichment follow-up");
                } else {
                    debug!(generation, "discarding stale enrichment result");
                }
            });
        });
    }
}
