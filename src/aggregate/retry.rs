//! Bounded automatic retry
//!
//! Re-attempts a full aggregation cycle on transient failure, with a
//! fixed backoff and a hard ceiling. Never surfaces an error itself: on
//! exhaustion the coordinator's synthetic-fallback path stands, and the
//! controller only decides how many times real data is attempted first.

use crate::aggregate::coordinator::{CycleOutcome, LoadCoordinator};
use crate::config::Config;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info};

/// Where the controller is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPhase {
    Idle,
    Running,
    RetryScheduled,
    Success,
    Exhausted,
}

/// Drives cycles through the retry state machine:
/// `Idle → Running → {Success, RetryScheduled → Running, Exhausted}`.
///
/// The attempt budget bounds re-attempts of a failing episode, not
/// lifetime cycles: every new episode starts with a full budget unless
/// the previous one exhausted it. A spent budget persists across
/// periodic runs, so the engine stays settled on fallback data until an
/// explicit refresh resets it.
pub struct RetryController {
    max_retries: u32,
    backoff: Duration,
    attempts: AtomicU32,
    phase: Mutex<RetryPhase>,
}

impl RetryController {
    pub fn new(config: &Config) -> Self {
        Self {
            max_retries: config.max_retries,
            backoff: config.retry_backoff(),
            attempts: AtomicU32::new(0),
            phase: Mutex::new(RetryPhase::Idle),
        }
    }

    pub fn phase(&self) -> RetryPhase {
        *self.phase.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Cycles attempted since the last reset.
    pub fn attempts_made(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Reset for a fresh attempt budget (explicit refresh).
    pub fn reset(&self) {
        self.attempts.store(0, Ordering::SeqCst);
        self.set_phase(RetryPhase::Idle);
    }

    fn set_phase(&self, phase: RetryPhase) {
        *self.phase.lock().unwrap_or_else(|e| e.into_inner()) = phase;
    }

    /// Run one aggregation episode: cycles retried on transient failure
    /// until success, a terminal outcome, or the attempt ceiling.
    ///
    /// The loading flag stays up for the whole episode, backoff windows
    /// included, so consumers never mistake a mid-episode synthetic
    /// snapshot for a settled one.
    pub async fn run(&self, coordinator: &LoadCoordinator) -> CycleOutcome {
        if self.phase() != RetryPhase::Exhausted {
            self.attempts.store(0, Ordering::SeqCst);
        }
        self.set_phase(RetryPhase::Running);
        coordinator.set_loading(true);
        loop {
            let outcome = coordinator.run_cycle().await;
            let attempts = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;

            if !outcome.should_retry() {
                // Includes empty-only and terminal failures: synthetic
                // substitution is the recovery, not an error.
                self.set_phase(RetryPhase::Success);
                coordinator.set_loading(false);
                return outcome;
            }

            if attempts > self.max_retries {
                info!(attempts, "retry budget exhausted; settling on fallback data");
                self.set_phase(RetryPhase::Exhausted);
                coordinator.set_loading(false);
                return outcome;
            }

            debug!(
                attempts,
                backoff_ms = self.backoff.as_millis() as u64,
                "transient failure; retry scheduled"
            );
            self.set_phase(RetryPhase::RetryScheduled);
            tokio::time::sleep(self.backoff).await;
            self.set_phase(RetryPhase::Running);
        }
    }
}
