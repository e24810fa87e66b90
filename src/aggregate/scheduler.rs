//! Refresh scheduling
//!
//! Triggers aggregation cycles once at startup, on a fixed interval, and
//! on explicit demand. A single in-flight guard keeps cycles from
//! overlapping: a trigger that arrives while a cycle is running is
//! dropped, not queued.

use crate::aggregate::coordinator::LoadCoordinator;
use crate::aggregate::retry::RetryController;
use crate::config::Config;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

pub struct RefreshScheduler {
    coordinator: Arc<LoadCoordinator>,
    retry: Arc<RetryController>,
    in_flight: Arc<AtomicBool>,
    interval: Duration,
}

impl RefreshScheduler {
    pub fn new(
        coordinator: Arc<LoadCoordinator>,
        retry: Arc<RetryController>,
        config: &Config,
    ) -> Arc<Self> {
        Arc::new(Self {
            coordinator,
            retry,
            in_flight: Arc::new(AtomicBool::new(false)),
            interval: config.refresh_interval(),
        })
    }

    /// Start the schedule: one cycle immediately, then one per interval.
    pub fn spawn(self: &Arc<Self>) -> JoinHandle<()> {
        let scheduler = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(scheduler.interval);
            // The first tick fires immediately and drives the startup cycle.
            loop {
                ticker.tick().await;
                scheduler.run_guarded().await;
            }
        })
    }

    /// Explicit fire-and-forget refresh.
    ///
    /// Resets the retry attempt budget, then runs a cycle unless one is
    /// already in flight, in which case the call is dropped.
    pub fn refresh(self: &Arc<Self>) {
        let scheduler = Arc::clone(self);
        tokio::spawn(async move {
            scheduler.run_guarded_with_reset().await;
        });
    }

    /// Run a guarded cycle and wait for it (used by the CLI's one-shot mode
    /// and tests). Returns false if the trigger was dropped.
    pub async fn run_now(&self) -> bool {
        self.run_guarded_with_reset().await
    }

    async fn run_guarded_with_reset(&self) -> bool {
        if !self.try_acquire() {
            debug!("refresh dropped; cycle already in flight");
            return false;
        }
        self.retry.reset();
        self.retry.run(&self.coordinator).await;
        self.release();
        true
    }

    async fn run_guarded(&self) {
        if !self.try_acquire() {
            debug!("periodic tick dropped; cycle already in flight");
            return;
        }
        self.retry.run(&self.coordinator).await;
        self.release();
    }

    fn try_acquire(&self) -> bool {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    fn release(&self) {
        self.in_flight.store(false, Ordering::SeqCst);
    }

    /// Whether a cycle is currently running.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }
}
