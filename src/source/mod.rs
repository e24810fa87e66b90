//! Upstream source contracts, fetch bounding, and fallback synthesis

mod fetcher;
mod raw;
mod rest;
mod synthetic;
mod traits;

pub use fetcher::SourceFetcher;
pub use raw::{BareAssistant, DetailedAssistant, OwnerGuess, ProfiledAssistant, RawAssistantRecord};
pub use rest::{
    RestAgentsSource, RestAssistantsSource, RestClient, RestDirectory, RestUsersSource,
};
pub use synthetic::{synthetic_agents, synthetic_assistants, synthetic_users};
pub use traits::{
    AgentsSource, AssistantsSource, DirectoryLookup, OwnerIdentity, PlatformSources, SourceError,
    SourceResult, UsersSource,
};
