//! Owner resolution pipeline
//!
//! Resolves a human-readable owner identity for each assistant record
//! through an ordered chain of directory lookups: primary backend
//! directory first, then the secondary fallback tables in order. Runs
//! concurrently across records, sequentially per record, and settles the
//! whole batch — one record's failure never aborts the others.

use crate::model::{AssistantRecord, OwnerSource};
use crate::source::{DirectoryLookup, OwnerIdentity};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// A cached directory answer: the identity and the rung it came from.
#[derive(Debug, Clone)]
struct ResolvedOwner {
    identity: OwnerIdentity,
    source: OwnerSource,
}

/// Resolves assistant owner identities through directory lookups.
///
/// Lookups are memoized per resolver instance, so an owner appearing on
/// many records costs one directory round-trip per batch.
pub struct OwnerResolver {
    primary: Arc<dyn DirectoryLookup>,
    secondary: Vec<Arc<dyn DirectoryLookup>>,
    cache: DashMap<String, ResolvedOwner>,
}

impl OwnerResolver {
    pub fn new(primary: Arc<dyn DirectoryLookup>, secondary: Vec<Arc<dyn DirectoryLookup>>) -> Self {
        Self {
            primary,
            secondary,
            cache: DashMap::new(),
        }
    }

    /// Enrich a batch of records, preserving order.
    ///
    /// Records that cannot be improved come back unchanged, keeping
    /// whatever heuristic guess reconciliation computed.
    pub async fn enrich_batch(
        self: &Arc<Self>,
        records: Vec<AssistantRecord>,
    ) -> Vec<AssistantRecord> {
        let mut enriched = records.clone();
        let mut tasks = JoinSet::new();

        for (index, record) in records.into_iter().enumerate() {
            let resolver = Arc::clone(self);
            tasks.spawn(async move {
                let resolved = resolver.resolve_one(record).await;
                (index, resolved)
            });
        }

        while let Some(settled) = tasks.join_next().await {
            match settled {
                Ok((index, record)) => enriched[index] = record,
                // A panicked task keeps the record's pre-enrichment state.
                Err(err) => warn!(error = %err, "owner resolution task failed"),
            }
        }

        enriched
    }

    /// Run the resolution chain for one record.
    async fn resolve_one(&self, mut record: AssistantRecord) -> AssistantRecord {
        if record.has_verified_owner() {
            return record;
        }
        let Some(owner_id) = record.owner_id.clone() else {
            // Nothing to look up; the heuristic guess stands.
            return record;
        };

        if let Some(hit) = self.cache.get(&owner_id) {
            let resolved = hit.value().clone();
            drop(hit);
            record.apply_owner(
                resolved.identity.preferred_name(),
                resolved.identity.email.clone(),
                resolved.source,
            );
            return record;
        }

        if let Some(resolved) = self.lookup_chain(&owner_id).await {
            record.apply_owner(
                resolved.identity.preferred_name(),
                resolved.identity.email.clone(),
                resolved.source,
            );
            self.cache.insert(owner_id, resolved);
        }
        record
    }

    /// Primary directory first; on failure or not-found, the secondary
    /// tables in declaration order. First usable identity wins.
    async fn lookup_chain(&self, owner_id: &str) -> Option<ResolvedOwner> {
        match self.primary.by_id(owner_id).await {
            Ok(Some(identity)) if identity.preferred_name().is_some() => {
                return Some(ResolvedOwner {
                    identity,
                    source: OwnerSource::DirectoryPrimary,
                });
            }
            Ok(_) => debug!(directory = self.primary.id(), owner_id, "owner not in primary"),
            Err(err) => {
                debug!(directory = self.primary.id(), owner_id, error = %err, "primary lookup failed")
            }
        }

        for directory in &self.secondary {
            match directory.by_id(owner_id).await {
                Ok(Some(identity)) if identity.preferred_name().is_some() => {
                    return Some(ResolvedOwner {
                        identity,
                        source: OwnerSource::DirectorySecondary,
                    });
                }
                Ok(_) => debug!(directory = directory.id(), owner_id, "owner not found"),
                Err(err) => {
                    debug!(directory = directory.id(), owner_id, error = %err, "secondary lookup failed")
                }
            }
        }

        None
    }
}
