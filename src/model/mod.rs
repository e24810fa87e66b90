//! Core data model for the aggregation engine

mod category;
mod outcome;
mod record;
mod snapshot;
mod state;

pub use category::EntityCategory;
pub use outcome::{SourceOutcome, SourceStatus};
pub use record::{
    AgentRecord, AssistantRecord, Normalize, OwnerSource, UserRecord, PLACEHOLDER_NAMES,
};
pub(crate) use record::{email_local_part, id_prefix, placeholder_name};
pub use snapshot::{CategoryResult, Origin, Snapshot};
pub use state::LoadState;
