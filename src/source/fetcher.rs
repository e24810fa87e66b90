//! Timeout-bounded fetch normalization
//!
//! Wraps each upstream call with a hard time bound and converts every
//! failure mode into a uniform `SourceOutcome`. Nothing raises past this
//! boundary. A timed-out call's future is dropped, so a late response can
//! never be written into shared state.

use crate::config::Config;
use crate::model::{
    AgentRecord, AssistantRecord, EntityCategory, SourceOutcome, UserRecord,
};
use crate::source::raw::RawAssistantRecord;
use crate::source::traits::{
    AgentsSource, AssistantsSource, SourceError, SourceResult, UsersSource,
};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Bounds upstream calls and normalizes their outcomes.
#[derive(Debug, Clone)]
pub struct SourceFetcher {
    user_timeout: Duration,
    agent_timeout: Duration,
    assistant_timeout: Duration,
}

impl SourceFetcher {
    pub fn new(config: &Config) -> Self {
        Self {
            user_timeout: config.timeout_for(EntityCategory::Users),
            agent_timeout: config.timeout_for(EntityCategory::Agents),
            assistant_timeout: config.timeout_for(EntityCategory::Assistants),
        }
    }

    pub async fn fetch_users(&self, source: &dyn UsersSource) -> SourceOutcome<UserRecord> {
        bounded(EntityCategory::Users, self.user_timeout, source.list()).await
    }

    pub async fn fetch_agents(&self, source: &dyn AgentsSource) -> SourceOutcome<AgentRecord> {
        bounded(EntityCategory::Agents, self.agent_timeout, source.get_all()).await
    }

    /// Fetch assistants through the strategy fan-out.
    ///
    /// The three strategies are tried in order inside one shared time
    /// bound; the first non-empty success wins and is canonicalized. If
    /// every strategy fails, the category reports the most retryable
    /// error among them, so a server blip on the rich endpoint is not
    /// masked by a terminal answer from the legacy one. Only when all
    /// strategies return valid-empty is the category `Empty`.
    pub async fn fetch_assistants(
        &self,
        source: &dyn AssistantsSource,
    ) -> SourceOutcome<AssistantRecord> {
        bounded(
            EntityCategory::Assistants,
            self.assistant_timeout,
            fan_out(source),
        )
        .await
    }
}

async fn fan_out(source: &dyn AssistantsSource) -> SourceResult<Vec<AssistantRecord>> {
    let mut best_error: Option<SourceError> = None;
    let mut saw_empty = false;

    for name in ["detailed", "profiled", "bare"] {
        let result = match name {
            "detailed" => source.detailed().await,
            "profiled" => source.profiled().await,
            _ => source.bare().await,
        };
        match result {
            Ok(raw) if !raw.is_empty() => {
                debug!(strategy = name, count = raw.len(), "assistant strategy succeeded");
                return Ok(raw
                    .into_iter()
                    .map(RawAssistantRecord::canonicalize)
                    .collect());
            }
            Ok(_) => {
                debug!(strategy = name, "assistant strategy returned no records");
                saw_empty = true;
            }
            Err(err) => {
                debug!(strategy = name, error = %err, "assistant strategy failed");
                best_error = Some(match best_error.take() {
                    Some(prev) if prev.is_transient() || !err.is_transient() => prev,
                    _ => err,
                });
            }
        }
    }

    match best_error {
        Some(err) if !saw_empty || err.is_transient() => Err(err),
        _ => Ok(Vec::new()),
    }
}

/// Run one upstream call under a time bound, converting every failure
/// into an outcome.
async fn bounded<T, F>(
    category: EntityCategory,
    bound: Duration,
    call: F,
) -> SourceOutcome<T>
where
    F: Future<Output = SourceResult<Vec<T>>>,
{
    match tokio::time::timeout(bound, call).await {
        Ok(Ok(records)) => SourceOutcome::ok(category, records),
        Ok(Err(err)) => {
            warn!(%category, error = %err, "upstream fetch failed");
            SourceOutcome::error(category, err.to_string(), err.is_transient())
        }
        Err(_) => {
            warn!(%category, bound_ms = bound.as_millis() as u64, "upstream fetch timed out");
            SourceOutcome::timeout(category, bound.as_millis() as u64)
        }
    }
}
