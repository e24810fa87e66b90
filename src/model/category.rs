//! Entity categories aggregated into a snapshot
//!
//! Static catalog data (plans, tutorials) is compiled in elsewhere and is
//! not aggregated, so it has no category here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// The record types aggregated from upstream sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    /// Platform user accounts
    Users,
    /// Worker agents
    Agents,
    /// Personalized assistant instances
    Assistants,
}

impl EntityCategory {
    /// All categories, in fetch order.
    pub const ALL: [EntityCategory; 3] = [
        EntityCategory::Users,
        EntityCategory::Agents,
        EntityCategory::Assistants,
    ];

    /// Human-readable label for logs and the CLI.
    pub fn label(&self) -> &'static str {
        match self {
            EntityCategory::Users => "users",
            EntityCategory::Agents => "agents",
            EntityCategory::Assistants => "assistants",
        }
    }

    /// Default per-fetch time bound.
    ///
    /// Assistants get a larger bound because the fetcher fans out through
    /// three upstream strategies for that category.
    pub fn default_timeout(&self) -> Duration {
        match self {
            EntityCategory::Users | EntityCategory::Agents => Duration::from_millis(5_000),
            EntityCategory::Assistants => Duration::from_millis(8_000),
        }
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
