//! Shared test doubles: scripted upstream sources and directory tables.
//!
//! Each scripted source plays back a fixed sequence of answers and then
//! repeats the last one, so tests can express behaviors like
//! "hang once, then answer" or "fail forever" in one line.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use synoptic::source::{BareAssistant, DetailedAssistant};
use synoptic::{
    AgentRecord, AgentsSource, AssistantsSource, DirectoryLookup, LoadState, OwnerIdentity,
    PlatformSources, RawAssistantRecord, Snapshot, SourceError, SourceResult, UserRecord,
    UsersSource,
};
use tokio::sync::watch;

/// One scripted answer from a fake upstream.
#[derive(Clone)]
pub enum Step<T> {
    /// Answer immediately with these records.
    Records(Vec<T>),
    /// Answer with this HTTP status as an error.
    Fail(u16),
    /// Hang far past any fetch bound, then answer with these records.
    /// The bounded fetch drops the future first, so the records should
    /// never be observed.
    Hang(Vec<T>),
}

/// A playback script: steps run in order, the last step repeats forever.
pub struct Script<T> {
    steps: Mutex<Vec<Step<T>>>,
    calls: AtomicUsize,
}

impl<T: Clone> Script<T> {
    pub fn new(steps: Vec<Step<T>>) -> Self {
        assert!(!steps.is_empty(), "script needs at least one step");
        Self {
            steps: Mutex::new(steps),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn always(step: Step<T>) -> Self {
        Self::new(vec![step])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn next(&self) -> SourceResult<Vec<T>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = {
            let mut steps = self.steps.lock().unwrap();
            if steps.len() > 1 {
                steps.remove(0)
            } else {
                steps[0].clone()
            }
        };
        match step {
            Step::Records(records) => Ok(records),
            Step::Fail(status) => Err(SourceError::Status {
                status,
                message: "scripted failure".to_string(),
            }),
            Step::Hang(records) => {
                tokio::time::sleep(Duration::from_secs(86_400)).await;
                Ok(records)
            }
        }
    }
}

pub struct ScriptedUsers(pub Arc<Script<UserRecord>>);

#[async_trait]
impl UsersSource for ScriptedUsers {
    async fn list(&self) -> SourceResult<Vec<UserRecord>> {
        self.0.next().await
    }
}

pub struct ScriptedAgents(pub Arc<Script<AgentRecord>>);

#[async_trait]
impl AgentsSource for ScriptedAgents {
    async fn get_all(&self) -> SourceResult<Vec<AgentRecord>> {
        self.0.next().await
    }
}

/// Scripted assistants upstream: the detailed strategy follows the script,
/// the two fallback strategies always answer valid-empty.
pub struct ScriptedAssistants(pub Arc<Script<RawAssistantRecord>>);

#[async_trait]
impl AssistantsSource for ScriptedAssistants {
    async fn detailed(&self) -> SourceResult<Vec<RawAssistantRecord>> {
        self.0.next().await
    }

    async fn profiled(&self) -> SourceResult<Vec<RawAssistantRecord>> {
        Ok(vec![])
    }

    async fn bare(&self) -> SourceResult<Vec<RawAssistantRecord>> {
        Ok(vec![])
    }
}

/// An in-memory directory table, optionally slow, with call counting.
pub struct TableDirectory {
    name: &'static str,
    rows: HashMap<String, OwnerIdentity>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl TableDirectory {
    pub fn with_rows(name: &'static str, rows: Vec<(&str, &str, &str)>) -> Self {
        Self {
            name,
            rows: rows
                .into_iter()
                .map(|(id, display, email)| {
                    (
                        id.to_string(),
                        OwnerIdentity {
                            display_name: Some(display.to_string()),
                            email: Some(email.to_string()),
                        },
                    )
                })
                .collect(),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn empty(name: &'static str) -> Self {
        Self::with_rows(name, vec![])
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DirectoryLookup for TableDirectory {
    fn id(&self) -> &str {
        self.name
    }

    async fn by_id(&self, owner_id: &str) -> SourceResult<Option<OwnerIdentity>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.rows.get(owner_id).cloned())
    }
}

pub fn user(id: &str, display_name: &str) -> UserRecord {
    UserRecord {
        id: id.to_string(),
        display_name: display_name.to_string(),
        email: Some(format!("{}@example.com", id)),
        role: "user".to_string(),
        last_active: None,
    }
}

pub fn agent(id: &str, name: &str) -> AgentRecord {
    AgentRecord {
        id: id.to_string(),
        name: name.to_string(),
        kind: "general".to_string(),
        status: "active".to_string(),
        interactions: 10,
        description: None,
    }
}

/// A detailed assistant payload with an owner id but no embedded identity,
/// so only a directory lookup can resolve the owner.
pub fn assistant_with_owner(id: &str, name: &str, owner_id: &str) -> RawAssistantRecord {
    RawAssistantRecord::Detailed(DetailedAssistant {
        id: id.to_string(),
        name: name.to_string(),
        owner_id: Some(owner_id.to_string()),
        owner_name: None,
        owner_email: None,
        personality: Some("friendly".to_string()),
        total_interactions: Some(42),
    })
}

/// A detailed assistant payload with an embedded email, which seeds a
/// heuristic owner guess before any directory lookup.
pub fn assistant_with_email(
    id: &str,
    name: &str,
    owner_id: &str,
    email: &str,
) -> RawAssistantRecord {
    RawAssistantRecord::Detailed(DetailedAssistant {
        id: id.to_string(),
        name: name.to_string(),
        owner_id: Some(owner_id.to_string()),
        owner_name: None,
        owner_email: Some(email.to_string()),
        personality: None,
        total_interactions: None,
    })
}

pub fn bare_assistant(name: &str) -> RawAssistantRecord {
    RawAssistantRecord::Bare(BareAssistant {
        id: None,
        name: name.to_string(),
    })
}

/// Wait until the enrichment follow-up for `generation` is published.
pub async fn enriched_snapshot(
    rx: &mut watch::Receiver<LoadState>,
    generation: u64,
) -> Arc<Snapshot> {
    loop {
        {
            let state = rx.borrow_and_update();
            if let Some(snapshot) = &state.snapshot {
                if snapshot.generation == generation && snapshot.enriched {
                    return Arc::clone(snapshot);
                }
            }
        }
        rx.changed().await.expect("state channel closed");
    }
}

/// Bundle scripted sources into the shape the coordinator consumes.
pub fn sources(
    users: &Arc<Script<UserRecord>>,
    agents: &Arc<Script<AgentRecord>>,
    assistants: &Arc<Script<RawAssistantRecord>>,
) -> PlatformSources {
    PlatformSources {
        users: Arc::new(ScriptedUsers(Arc::clone(users))),
        agents: Arc::new(ScriptedAgents(Arc::clone(agents))),
        assistants: Arc::new(ScriptedAssistants(Arc::clone(assistants))),
    }
}
