//! Synoptic: Resilient Platform-Snapshot Aggregation Engine
//!
//! Aggregates a platform's entity catalog (users, worker agents,
//! personalized assistants) from independent, unreliable upstream
//! services into one immutable snapshot, and keeps that snapshot fresh.
//!
//! # Core Concepts
//!
//! - **Snapshot**: one fully-merged aggregation result, tagged with a
//!   monotonically increasing generation
//! - **Origin**: whether a category's records came from a live upstream
//!   call or from the deterministic fallback synthesizer
//! - **Enrichment**: background owner-identity resolution for assistant
//!   records, published as a follow-up snapshot of the same generation
//!
//! # Example
//!
//! ```
//! use synoptic::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.max_retries, 2);
//! ```

pub mod aggregate;
mod api;
pub mod config;
pub mod model;
pub mod source;

pub use aggregate::{
    CycleOutcome, LoadCoordinator, OwnerResolver, RefreshScheduler, RetryController, RetryPhase,
};
pub use api::SynopticApi;
pub use config::{Config, ConfigError};
pub use model::{
    AgentRecord, AssistantRecord, CategoryResult, EntityCategory, LoadState, Origin, OwnerSource,
    Snapshot, SourceOutcome, SourceStatus, UserRecord,
};
pub use source::{
    AgentsSource, AssistantsSource, DirectoryLookup, OwnerIdentity, PlatformSources,
    RawAssistantRecord, RestAgentsSource, RestAssistantsSource, RestClient, RestDirectory,
    RestUsersSource, SourceError, SourceFetcher, SourceResult, UsersSource,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
