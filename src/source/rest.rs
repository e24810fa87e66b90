//! REST implementations of the source traits
//!
//! The backend answers either a bare JSON array or an envelope of the form
//! `{"data": [...]}`; both shapes are accepted here so callers never see
//! the difference. HTTP status classes map onto the error taxonomy: 5xx is
//! server-class (transient), 4xx is client-class (terminal).

use crate::model::{AgentRecord, UserRecord};
use crate::source::raw::{
    BareAssistant, DetailedAssistant, ProfiledAssistant, RawAssistantRecord,
};
use crate::source::traits::{
    AgentsSource, AssistantsSource, DirectoryLookup, OwnerIdentity, SourceError, SourceResult,
    UsersSource,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Shared HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn get_json(&self, path: &str) -> SourceResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SourceError::Malformed(e.to_string()))
    }

    /// Fetch a path expected to hold a record sequence in either payload shape.
    async fn get_records<T: DeserializeOwned>(&self, path: &str) -> SourceResult<Vec<T>> {
        let value = self.get_json(path).await?;
        let items = extract_records(value)?;
        items
            .into_iter()
            .map(|item| {
                serde_json::from_value(item).map_err(|e| SourceError::Malformed(e.to_string()))
            })
            .collect()
    }
}

/// Unwrap a record sequence from a bare array or a `{"data": [...]}` envelope.
fn extract_records(value: Value) -> SourceResult<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Ok(vec![other]),
            None => Err(SourceError::Malformed(
                "expected array or data envelope".to_string(),
            )),
        },
        _ => Err(SourceError::Malformed(
            "expected array or data envelope".to_string(),
        )),
    }
}

/// `GET /users`
#[derive(Debug, Clone)]
pub struct RestUsersSource {
    client: RestClient,
}

impl RestUsersSource {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UsersSource for RestUsersSource {
    async fn list(&self) -> SourceResult<Vec<UserRecord>> {
        self.client.get_records("/users").await
    }
}

/// `GET /agents`
#[derive(Debug, Clone)]
pub struct RestAgentsSource {
    client: RestClient,
}

impl RestAgentsSource {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AgentsSource for RestAgentsSource {
    async fn get_all(&self) -> SourceResult<Vec<AgentRecord>> {
        self.client.get_records("/agents").await
    }
}

/// The three assistant endpoints, richest first.
#[derive(Debug, Clone)]
pub struct RestAssistantsSource {
    client: RestClient,
}

impl RestAssistantsSource {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AssistantsSource for RestAssistantsSource {
    async fn detailed(&self) -> SourceResult<Vec<RawAssistantRecord>> {
        let records: Vec<DetailedAssistant> =
            self.client.get_records("/assistants/companions").await?;
        Ok(records.into_iter().map(RawAssistantRecord::Detailed).collect())
    }

    async fn profiled(&self) -> SourceResult<Vec<RawAssistantRecord>> {
        let records: Vec<ProfiledAssistant> =
            self.client.get_records("/assistants/profiles").await?;
        Ok(records.into_iter().map(RawAssistantRecord::Profiled).collect())
    }

    async fn bare(&self) -> SourceResult<Vec<RawAssistantRecord>> {
        let records: Vec<BareAssistant> = self.client.get_records("/assistants").await?;
        Ok(records.into_iter().map(RawAssistantRecord::Bare).collect())
    }
}

#[derive(Debug, Deserialize)]
struct DirectoryRow {
    #[serde(default, alias = "full_name", alias = "name")]
    display_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

/// A directory table reachable as `GET <table>/<id>`.
///
/// Not-found is a definitive answer (`Ok(None)`), not an error.
#[derive(Debug, Clone)]
pub struct RestDirectory {
    client: RestClient,
    table: String,
}

impl RestDirectory {
    pub fn new(client: RestClient, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }
}

#[async_trait]
impl DirectoryLookup for RestDirectory {
    fn id(&self) -> &str {
        &self.table
    }

    async fn by_id(&self, owner_id: &str) -> SourceResult<Option<OwnerIdentity>> {
        let path = format!("/{}/{}", self.table, owner_id);
        let value = match self.client.get_json(&path).await {
            Ok(value) => value,
            Err(SourceError::Status { status: 404, .. }) => return Ok(None),
            Err(err) => return Err(err),
        };

        // Single-record endpoints may still wrap the row in a data envelope.
        let row_value = match value {
            Value::Object(mut map) if map.contains_key("data") => {
                map.remove("data").unwrap_or(Value::Null)
            }
            other => other,
        };
        if row_value.is_null() {
            return Ok(None);
        }

        let row: DirectoryRow = serde_json::from_value(row_value)
            .map_err(|e| SourceError::Malformed(e.to_string()))?;
        Ok(Some(OwnerIdentity {
            display_name: row.display_name,
            email: row.email,
        }))
    }
}
