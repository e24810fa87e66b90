//! Fallback synthesizer
//!
//! Deterministic placeholder records for any category whose source failed
//! or returned nothing. Shape is the contract: every required field is
//! populated so downstream code needs no null-checks beyond what live data
//! already requires. Values such as timestamps may shift between calls.

use crate::model::{AgentRecord, AssistantRecord, OwnerSource, UserRecord};
use chrono::{Duration, Utc};

pub fn synthetic_users() -> Vec<UserRecord> {
    let now = Utc::now();
    vec![
        UserRecord {
            id: "synthetic-user-1".to_string(),
            display_name: "Admin".to_string(),
            email: Some("admin@placeholder.local".to_string()),
            role: "administrator".to_string(),
            last_active: Some(now - Duration::minutes(30)),
        },
        UserRecord {
            id: "synthetic-user-2".to_string(),
            display_name: "User One".to_string(),
            email: Some("user1@placeholder.local".to_string()),
            role: "user".to_string(),
            last_active: Some(now - Duration::hours(2)),
        },
        UserRecord {
            id: "synthetic-user-3".to_string(),
            display_name: "User Two".to_string(),
            email: Some("user2@placeholder.local".to_string()),
            role: "user".to_string(),
            last_active: Some(now - Duration::hours(20)),
        },
    ]
}

pub fn synthetic_agents() -> Vec<AgentRecord> {
    vec![
        AgentRecord {
            id: "synthetic-agent-echo".to_string(),
            name: "Echo".to_string(),
            kind: "communication".to_string(),
            status: "active".to_string(),
            interactions: 1_250,
            description: Some("Voice and audio command processing".to_string()),
        },
        AgentRecord {
            id: "synthetic-agent-guardian".to_string(),
            name: "Guardian".to_string(),
            kind: "security".to_string(),
            status: "active".to_string(),
            interactions: 890,
            description: Some("System monitoring and threat detection".to_string()),
        },
        AgentRecord {
            id: "synthetic-agent-nova".to_string(),
            name: "Nova".to_string(),
            kind: "analytics".to_string(),
            status: "active".to_string(),
            interactions: 456,
            description: Some("Data analysis and insight generation".to_string()),
        },
        AgentRecord {
            id: "synthetic-agent-ada".to_string(),
            name: "ADA".to_string(),
            kind: "development".to_string(),
            status: "inactive".to_string(),
            interactions: 678,
            description: Some("Task automation and process optimization".to_string()),
        },
    ]
}

pub fn synthetic_assistants() -> Vec<AssistantRecord> {
    vec![
        AssistantRecord {
            id: "synthetic-assistant-1".to_string(),
            display_name: "Quest".to_string(),
            owner_id: None,
            personality: "analytical".to_string(),
            interactions: 530,
            owner_display_name: None,
            owner_email: None,
            owner_source: OwnerSource::Unresolved,
        },
        AssistantRecord {
            id: "synthetic-assistant-2".to_string(),
            display_name: "Echo".to_string(),
            owner_id: None,
            personality: "friendly".to_string(),
            interactions: 230,
            owner_display_name: None,
            owner_email: None,
            owner_source: OwnerSource::Unresolved,
        },
        AssistantRecord {
            id: "synthetic-assistant-3".to_string(),
            display_name: "Nova".to_string(),
            owner_id: None,
            personality: "creative".to_string(),
            interactions: 180,
            owner_display_name: None,
            owner_email: None,
            owner_source: OwnerSource::Unresolved,
        },
    ]
}
