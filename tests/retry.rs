//! Retry policy: bounded re-attempts on transient failure, none on
//! terminal outcomes, and an attempt budget that only an explicit
//! refresh renews.

mod common;

use common::*;
use std::sync::Arc;
use std::time::Duration;
use synoptic::{
    Config, LoadCoordinator, OwnerResolver, RefreshScheduler, RetryController, RetryPhase,
};

fn coordinator_with_users(
    users: &Arc<Script<synoptic::UserRecord>>,
    config: &Config,
) -> Arc<LoadCoordinator> {
    let agents = Arc::new(Script::always(Step::Records(vec![])));
    let assistants = Arc::new(Script::always(Step::Records(vec![])));
    LoadCoordinator::new(
        sources(users, &agents, &assistants),
        OwnerResolver::new(Arc::new(TableDirectory::empty("users")), vec![]),
        config,
    )
}

#[tokio::test(start_paused = true)]
async fn persistent_transient_failure_stops_at_the_attempt_ceiling() {
    let config = Config::default();
    let users = Arc::new(Script::always(Step::Fail(500)));
    let coordinator = coordinator_with_users(&users, &config);
    let retry = RetryController::new(&config);

    retry.run(&coordinator).await;

    // First attempt plus max_retries re-attempts, then settled.
    assert_eq!(users.calls(), 3);
    assert_eq!(retry.attempts_made(), 3);
    assert_eq!(retry.phase(), RetryPhase::Exhausted);
}

#[tokio::test(start_paused = true)]
async fn backoff_between_attempts_is_fixed() {
    let config = Config::default();
    let users = Arc::new(Script::always(Step::Fail(500)));
    let coordinator = coordinator_with_users(&users, &config);
    let retry = RetryController::new(&config);

    let started = tokio::time::Instant::now();
    retry.run(&coordinator).await;

    // Two re-attempts, one fixed backoff before each.
    assert_eq!(started.elapsed(), Duration::from_millis(6_000));
}

#[tokio::test]
async fn empty_responses_are_never_retried() {
    let config = Config::default();
    let users = Arc::new(Script::always(Step::Records(vec![])));
    let coordinator = coordinator_with_users(&users, &config);
    let retry = RetryController::new(&config);

    let outcome = retry.run(&coordinator).await;

    assert!(!outcome.should_retry());
    assert_eq!(users.calls(), 1);
    assert_eq!(retry.attempts_made(), 1);
    assert_eq!(retry.phase(), RetryPhase::Success);
}

#[tokio::test]
async fn terminal_failures_go_straight_to_fallback() {
    let config = Config::default();
    let users = Arc::new(Script::always(Step::Fail(401)));
    let coordinator = coordinator_with_users(&users, &config);
    let retry = RetryController::new(&config);

    let outcome = retry.run(&coordinator).await;

    assert!(!outcome.should_retry());
    assert_eq!(users.calls(), 1);
    assert_eq!(retry.phase(), RetryPhase::Success);
}

#[tokio::test(start_paused = true)]
async fn successful_episodes_do_not_consume_the_retry_budget() {
    let config = Config::default();
    // Two healthy episodes, then the upstream goes down for good.
    let users = Arc::new(Script::new(vec![
        Step::Records(vec![user("u-1", "Maria")]),
        Step::Records(vec![user("u-1", "Maria")]),
        Step::Fail(500),
    ]));
    let coordinator = coordinator_with_users(&users, &config);
    let retry = RetryController::new(&config);

    retry.run(&coordinator).await;
    retry.run(&coordinator).await;
    assert_eq!(retry.phase(), RetryPhase::Success);

    // The failing episode still gets its full budget.
    retry.run(&coordinator).await;
    assert_eq!(retry.attempts_made(), 3);
    assert_eq!(retry.phase(), RetryPhase::Exhausted);
    assert_eq!(users.calls(), 5);
}

#[tokio::test(start_paused = true)]
async fn loading_flag_stays_up_across_the_backoff_window() {
    let config = Config::default();
    let users = Arc::new(Script::new(vec![
        Step::Fail(500),
        Step::Records(vec![user("u-1", "Maria")]),
    ]));
    let coordinator = coordinator_with_users(&users, &config);
    let retry = Arc::new(RetryController::new(&config));

    let episode = tokio::spawn({
        let coordinator = Arc::clone(&coordinator);
        let retry = Arc::clone(&retry);
        async move { retry.run(&coordinator).await }
    });
    tokio::task::yield_now().await;

    // Mid-backoff: the first attempt's synthetic snapshot is published,
    // but the episode still reads as loading.
    tokio::time::sleep(Duration::from_millis(1_000)).await;
    let state = coordinator.current_state();
    assert!(state.is_loading);
    assert!(state.snapshot.is_some());
    assert_eq!(retry.phase(), RetryPhase::RetryScheduled);

    episode.await.unwrap();
    assert!(!coordinator.current_state().is_loading);
    assert_eq!(retry.phase(), RetryPhase::Success);
}

#[tokio::test(start_paused = true)]
async fn explicit_refresh_renews_an_exhausted_attempt_budget() {
    let config = Config::default();
    let users = Arc::new(Script::always(Step::Fail(500)));
    let coordinator = coordinator_with_users(&users, &config);
    let retry = Arc::new(RetryController::new(&config));
    let scheduler = RefreshScheduler::new(Arc::clone(&coordinator), Arc::clone(&retry), &config);

    assert!(scheduler.run_now().await);
    assert_eq!(users.calls(), 3);
    assert_eq!(retry.phase(), RetryPhase::Exhausted);

    // A fresh trigger starts over with a full budget instead of staying
    // settled on fallback data.
    assert!(scheduler.run_now().await);
    assert_eq!(users.calls(), 6);
    assert_eq!(retry.attempts_made(), 3);
}
