//! Raw assistant payloads and their canonical adapters
//!
//! Each upstream strategy returns its own shape. The shapes are tagged
//! variants here, and every variant is mapped through an explicit adapter
//! into the canonical `AssistantRecord` before reconciliation — downstream
//! code never branches on which fields happen to be present.

use crate::model::{
    email_local_part, id_prefix, placeholder_name, AssistantRecord, Normalize, OwnerSource,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Record shape from the rich companion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedAssistant {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub owner_email: Option<String>,
    #[serde(default)]
    pub personality: Option<String>,
    #[serde(default)]
    pub total_interactions: Option<u64>,
}

/// Record shape from the per-user personalization profile table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfiledAssistant {
    pub user_id: String,
    #[serde(default)]
    pub assistant_id: Option<String>,
    #[serde(default)]
    pub assistant_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub personality: Option<String>,
    #[serde(default)]
    pub interactions: Option<u64>,
}

/// Record shape from the bare legacy listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BareAssistant {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

/// A raw assistant record, tagged by the strategy that produced it.
#[derive(Debug, Clone)]
pub enum RawAssistantRecord {
    Detailed(DetailedAssistant),
    Profiled(ProfiledAssistant),
    Bare(BareAssistant),
}

/// An owner identity guess derived from a raw record, before any
/// directory lookup has run.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerGuess {
    pub display_name: String,
    pub email: Option<String>,
    pub source: OwnerSource,
}

/// A pure guess strategy over a raw record.
type GuessFn = fn(&RawAssistantRecord) -> Option<OwnerGuess>;

/// The guess strategies, tried in this order; first hit wins.
/// A verified backend name outranks anything derived from an email,
/// which outranks the generated placeholder.
const GUESS_CHAIN: &[GuessFn] = &[backend_name, embedded_email, owner_placeholder];

/// Verified owner name carried on the raw record itself.
fn backend_name(raw: &RawAssistantRecord) -> Option<OwnerGuess> {
    let RawAssistantRecord::Detailed(detailed) = raw else {
        return None;
    };
    let name = detailed.owner_name.as_deref()?.trim();
    if name.is_empty() {
        return None;
    }
    Some(OwnerGuess {
        display_name: name.to_string(),
        email: detailed.owner_email.clone(),
        source: OwnerSource::Backend,
    })
}

/// Display name from the local part of an embedded email-like field.
fn embedded_email(raw: &RawAssistantRecord) -> Option<OwnerGuess> {
    let email = match raw {
        RawAssistantRecord::Detailed(d) => d.owner_email.as_deref(),
        RawAssistantRecord::Profiled(p) => p.user_email.as_deref(),
        RawAssistantRecord::Bare(_) => None,
    }?;
    let local = email_local_part(email)?;
    Some(OwnerGuess {
        display_name: local,
        email: Some(email.to_string()),
        source: OwnerSource::Heuristic,
    })
}

/// Generated `User <id-prefix>` placeholder for records that carry an
/// owner id but no embedded identity. Stays `Unresolved` so directory
/// lookups remain eligible to replace it.
fn owner_placeholder(raw: &RawAssistantRecord) -> Option<OwnerGuess> {
    let owner_id = match raw {
        RawAssistantRecord::Detailed(d) => d.owner_id.as_deref(),
        RawAssistantRecord::Profiled(p) => Some(p.user_id.as_str()),
        RawAssistantRecord::Bare(_) => None,
    }?;
    Some(OwnerGuess {
        display_name: placeholder_name(owner_id),
        email: None,
        source: OwnerSource::Unresolved,
    })
}

/// Run the guess chain over a raw record.
pub fn guess_owner(raw: &RawAssistantRecord) -> Option<OwnerGuess> {
    GUESS_CHAIN.iter().find_map(|strategy| strategy(raw))
}

impl RawAssistantRecord {
    /// Map into the canonical record shape.
    ///
    /// Bare records without an id get one derived deterministically from
    /// the name, so repeated fetches of the same listing produce the same
    /// ids.
    pub fn canonicalize(self) -> AssistantRecord {
        let guess = guess_owner(&self);
        let (id, display_name, owner_id, owner_email, personality, interactions) = match &self {
            RawAssistantRecord::Detailed(d) => (
                d.id.clone(),
                d.name.clone(),
                d.owner_id.clone(),
                d.owner_email.clone(),
                d.personality.clone(),
                d.total_interactions.unwrap_or(0),
            ),
            RawAssistantRecord::Profiled(p) => (
                p.assistant_id
                    .clone()
                    .unwrap_or_else(|| format!("assistant-{}", p.user_id)),
                p.assistant_name.clone().unwrap_or_default(),
                Some(p.user_id.clone()),
                p.user_email.clone(),
                p.personality.clone(),
                p.interactions.unwrap_or(0),
            ),
            RawAssistantRecord::Bare(b) => (
                b.id.clone().unwrap_or_else(|| derived_id(&b.name)),
                b.name.clone(),
                None,
                None,
                None,
                0,
            ),
        };

        let (owner_display_name, owner_email, owner_source) = match guess {
            Some(g) => (Some(g.display_name), g.email.or(owner_email), g.source),
            None => (None, owner_email, OwnerSource::Unresolved),
        };

        AssistantRecord {
            id,
            display_name,
            owner_id,
            personality: personality.unwrap_or_default(),
            interactions,
            owner_display_name,
            owner_email,
            owner_source,
        }
        .normalized()
    }
}

/// Deterministic id for records that arrive without one.
fn derived_id(name: &str) -> String {
    let uuid = Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes());
    format!("assistant-{}", id_prefix(&uuid.to_string()))
}
