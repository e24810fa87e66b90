//! Canonical record types for each entity category
//!
//! Records cross the source adapter boundary already shaped like these
//! types — downstream code never branches on "does this field exist".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display names that indicate a placeholder rather than a real person.
///
/// An assistant whose owner display name matches this list (case-insensitive)
/// is still considered unresolved and stays eligible for directory lookup.
pub const PLACEHOLDER_NAMES: &[&str] = &["user", "admin", "assistant", "owner", "unknown", "guest"];

/// Normalization applied to live payloads after a successful fetch.
///
/// Fills missing optional fields with type-appropriate defaults. Field
/// names are never reshaped — that is the adapter's job.
pub trait Normalize {
    fn normalized(self) -> Self;
}

/// A platform user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub last_active: Option<DateTime<Utc>>,
}

impl Normalize for UserRecord {
    fn normalized(mut self) -> Self {
        if self.display_name.is_empty() {
            self.display_name = self
                .email
                .as_deref()
                .and_then(email_local_part)
                .unwrap_or_else(|| placeholder_name(&self.id));
        }
        if self.role.is_empty() {
            self.role = "user".to_string();
        }
        self
    }
}

/// A worker agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub interactions: u64,
    #[serde(default)]
    pub description: Option<String>,
}

impl Normalize for AgentRecord {
    fn normalized(mut self) -> Self {
        if self.name.is_empty() {
            self.name = format!("Agent {}", id_prefix(&self.id));
        }
        if self.kind.is_empty() {
            self.kind = "general".to_string();
        }
        if self.status.is_empty() {
            self.status = "inactive".to_string();
        }
        self
    }
}

/// Provenance of an assistant's owner identity, ordered by confidence.
///
/// Enrichment may upgrade a record along this ladder but never downgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OwnerSource {
    /// No usable identity information
    Unresolved,
    /// Guessed from embedded email-like fields on the raw record
    Heuristic,
    /// The raw record itself carried a verified name from the backend
    Backend,
    /// Resolved through a secondary fallback directory table
    DirectorySecondary,
    /// Resolved through the primary backend directory
    DirectoryPrimary,
}

impl OwnerSource {
    /// Position on the confidence ladder; higher wins.
    pub fn confidence(&self) -> u8 {
        match self {
            OwnerSource::Unresolved => 0,
            OwnerSource::Heuristic => 1,
            OwnerSource::Backend => 2,
            OwnerSource::DirectorySecondary => 3,
            OwnerSource::DirectoryPrimary => 4,
        }
    }
}

/// A personalized assistant instance — the enrichable entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantRecord {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub personality: String,
    #[serde(default)]
    pub interactions: u64,
    #[serde(default)]
    pub owner_display_name: Option<String>,
    #[serde(default)]
    pub owner_email: Option<String>,
    pub owner_source: OwnerSource,
}

impl AssistantRecord {
    /// Whether the owner identity is already verified through the primary
    /// directory with a non-placeholder display name. Such records are
    /// skipped by enrichment.
    pub fn has_verified_owner(&self) -> bool {
        if self.owner_source != OwnerSource::DirectoryPrimary {
            return false;
        }
        match &self.owner_display_name {
            Some(name) if !name.trim().is_empty() => {
                let lowered = name.trim().to_lowercase();
                !PLACEHOLDER_NAMES.iter().any(|p| lowered == *p)
            }
            _ => false,
        }
    }

    /// Apply an owner identity at the given confidence level.
    ///
    /// Returns true if applied. A lower- or equal-confidence identity is
    /// ignored so enrichment can never downgrade a record.
    pub fn apply_owner(
        &mut self,
        display_name: Option<String>,
        email: Option<String>,
        source: OwnerSource,
    ) -> bool {
        if source.confidence() <= self.owner_source.confidence() {
            return false;
        }
        let resolved_name = display_name
            .filter(|n| !n.trim().is_empty())
            .or_else(|| email.as_deref().and_then(email_local_part));
        let Some(name) = resolved_name else {
            return false;
        };
        self.owner_display_name = Some(name);
        if email.is_some() {
            self.owner_email = email;
        }
        self.owner_source = source;
        true
    }
}

impl Normalize for AssistantRecord {
    fn normalized(mut self) -> Self {
        if self.display_name.is_empty() {
            self.display_name = format!("Assistant {}", id_prefix(&self.id));
        }
        if self.personality.is_empty() {
            self.personality = "balanced".to_string();
        }
        self
    }
}

/// Local part of an email address, as a display-name fallback.
pub(crate) fn email_local_part(email: &str) -> Option<String> {
    let local = email.split('@').next()?.trim();
    if local.is_empty() {
        None
    } else {
        Some(local.to_string())
    }
}

/// Generated placeholder of the form `User <id-prefix>`.
pub(crate) fn placeholder_name(id: &str) -> String {
    format!("User {}", id_prefix(id))
}

pub(crate) fn id_prefix(id: &str) -> &str {
    let end = id.char_indices().nth(8).map(|(i, _)| i).unwrap_or(id.len());
    &id[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assistant(owner_source: OwnerSource) -> AssistantRecord {
        AssistantRecord {
            id: "asst-1".to_string(),
            display_name: "Echo".to_string(),
            owner_id: Some("user-9".to_string()),
            personality: "friendly".to_string(),
            interactions: 12,
            owner_display_name: None,
            owner_email: None,
            owner_source,
        }
    }

    #[test]
    fn confidence_ladder_is_strictly_ordered() {
        let ladder = [
            OwnerSource::Unresolved,
            OwnerSource::Heuristic,
            OwnerSource::Backend,
            OwnerSource::DirectorySecondary,
            OwnerSource::DirectoryPrimary,
        ];
        for pair in ladder.windows(2) {
            assert!(pair[0].confidence() < pair[1].confidence());
        }
    }

    #[test]
    fn apply_owner_upgrades_confidence() {
        let mut record = assistant(OwnerSource::Heuristic);
        assert!(record.apply_owner(
            Some("Maria Silva".to_string()),
            Some("maria@example.com".to_string()),
            OwnerSource::DirectoryPrimary,
        ));
        assert_eq!(record.owner_display_name.as_deref(), Some("Maria Silva"));
        assert_eq!(record.owner_source, OwnerSource::DirectoryPrimary);
    }

    #[test]
    fn apply_owner_never_downgrades() {
        let mut record = assistant(OwnerSource::DirectoryPrimary);
        record.owner_display_name = Some("Maria Silva".to_string());
        assert!(!record.apply_owner(
            Some("guessed".to_string()),
            None,
            OwnerSource::Heuristic,
        ));
        assert_eq!(record.owner_display_name.as_deref(), Some("Maria Silva"));
    }

    #[test]
    fn apply_owner_derives_name_from_email_local_part() {
        let mut record = assistant(OwnerSource::Unresolved);
        assert!(record.apply_owner(
            None,
            Some("joao.souza@example.com".to_string()),
            OwnerSource::DirectoryPrimary,
        ));
        assert_eq!(record.owner_display_name.as_deref(), Some("joao.souza"));
    }

    #[test]
    fn placeholder_display_name_is_not_verified() {
        let mut record = assistant(OwnerSource::DirectoryPrimary);
        record.owner_display_name = Some("User".to_string());
        assert!(!record.has_verified_owner());

        record.owner_display_name = Some("Maria Silva".to_string());
        assert!(record.has_verified_owner());
    }

    #[test]
    fn user_normalization_fills_defaults() {
        let user = UserRecord {
            id: "u-123456789".to_string(),
            display_name: String::new(),
            email: None,
            role: String::new(),
            last_active: None,
        }
        .normalized();
        assert_eq!(user.display_name, "User u-123456");
        assert_eq!(user.role, "user");
    }

    #[test]
    fn agent_normalization_fills_defaults() {
        let agent = AgentRecord {
            id: "a1".to_string(),
            name: String::new(),
            kind: String::new(),
            status: String::new(),
            interactions: 0,
            description: None,
        }
        .normalized();
        assert_eq!(agent.name, "Agent a1");
        assert_eq!(agent.kind, "general");
        assert_eq!(agent.status, "inactive");
    }
}
