//! Aggregation pipeline: reconciliation, enrichment, coordination,
//! retry, and scheduling

mod coordinator;
mod enrich;
mod reconcile;
mod retry;
mod scheduler;

pub use coordinator::{CycleOutcome, LoadCoordinator};
pub use enrich::OwnerResolver;
pub use reconcile::reconcile;
pub use retry::{RetryController, RetryPhase};
pub use scheduler::RefreshScheduler;
