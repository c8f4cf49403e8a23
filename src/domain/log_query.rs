use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::null_as_default;

/// Query types accepted by `POST /api/v1/logs/query`.
pub const SUPPORTED_QUERY_TYPES: &[&str] = &["component"];

/// A log query request, selected by its `type` discriminator.
#[derive(Clone, Debug, PartialEq)]
pub enum LogQuery {
    /// Logs of components deployed into a project environment.
    Component(ComponentLogsParams),
}

#[derive(Error, Debug)]
pub enum QueryDecodeError {
    #[error("invalid request body: {0}")]
    Body(#[source] serde_json::Error),

    #[error("unknown log query type: {0}")]
    UnknownType(String),

    #[error("invalid {kind} logs params: {source}")]
    Payload {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {kind} logs params: {reason}")]
    Invalid { kind: &'static str, reason: String },
}

#[derive(Deserialize)]
struct Discriminator {
    #[serde(rename = "type")]
    kind: String,
}

impl LogQuery {
    /// Decodes a request body: the discriminator first, then the full variant
    /// from the same buffer.
    pub fn from_slice(body: &[u8]) -> Result<Self, QueryDecodeError> {
        let Discriminator { kind } =
            serde_json::from_slice(body).map_err(QueryDecodeError::Body)?;

        match kind.as_str() {
            "component" => {
                let params: ComponentLogsParams =
                    serde_json::from_slice(body).map_err(|source| QueryDecodeError::Payload {
                        kind: "component",
                        source,
                    })?;
                params
                    .validate()
                    .map_err(|reason| QueryDecodeError::Invalid {
                        kind: "component",
                        reason,
                    })?;
                Ok(Self::Component(params))
            }
            _ => Err(QueryDecodeError::UnknownType(kind)),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentLogsParams {
    /// Empty means every component in the project environment.
    #[serde(default, deserialize_with = "null_as_default")]
    pub component_ids: Vec<String>,
    pub environment_id: String,
    pub project_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub search_phrase: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub log_levels: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub limit: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sort_order: String,
}

impl ComponentLogsParams {
    fn validate(&self) -> Result<(), String> {
        if self.project_id.trim().is_empty() {
            return Err("projectId is required".to_string());
        }
        if self.environment_id.trim().is_empty() {
            return Err("environmentId is required".to_string());
        }
        if self.start_time > self.end_time {
            return Err("startTime must not be after endTime".to_string());
        }
        Ok(())
    }

    pub fn sort_order(&self) -> SortOrder {
        SortOrder::parse(&self.sort_order)
    }
}

/// Result ordering by timestamp. Only `asc` and `ASC` sort oldest first;
/// anything else, mixed case included, sorts newest first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Self {
        if matches!(raw, "asc" | "ASC") {
            Self::Asc
        } else {
            Self::Desc
        }
    }

    /// SQL keyword. Only these two fixed strings ever reach the query text.
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}
