use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A normalized log line returned to API callers.
///
/// A `timestamp` at the Unix epoch means the backend hit carried no usable
/// timestamp.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub log: String,
    pub log_level: String,
    pub component_id: String,
    pub environment_id: String,
    pub project_id: String,
    pub namespace: String,
    pub pod_id: String,
    pub container_name: String,
    pub labels: HashMap<String, String>,
}

impl Default for LogEntry {
    fn default() -> Self {
        Self {
            timestamp: DateTime::UNIX_EPOCH,
            log: String::new(),
            log_level: String::new(),
            component_id: String::new(),
            environment_id: String::new(),
            project_id: String::new(),
            namespace: String::new(),
            pod_id: String::new(),
            container_name: String::new(),
            labels: HashMap::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogQueryResult {
    pub logs: Vec<LogEntry>,
    pub total_count: i64,
    /// Backend-reported execution time in milliseconds.
    pub took: i64,
}
