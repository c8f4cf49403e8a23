//! Conversion of raw search hits into [`LogEntry`] values.
//!
//! Extraction is total: every field is read independently, and a missing or
//! mistyped field yields its empty value instead of an error.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::domain::LogEntry;
use crate::query::fields;

pub fn normalize_hit(hit: &Value) -> LogEntry {
    let Some(source) = hit.as_object() else {
        return LogEntry::default();
    };

    LogEntry {
        timestamp: timestamp_field(source),
        log: string_field(source, fields::LOG),
        log_level: string_field(source, fields::LOG_LEVEL),
        component_id: string_field(source, fields::COMPONENT_ID),
        environment_id: string_field(source, fields::ENVIRONMENT_ID),
        project_id: string_field(source, fields::PROJECT_ID),
        namespace: string_field(source, fields::NAMESPACE),
        pod_id: string_field(source, fields::POD_ID),
        container_name: string_field(source, fields::CONTAINER_NAME),
        labels: labels_field(source),
    }
}

fn string_field(source: &Map<String, Value>, key: &str) -> String {
    source
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Microseconds since the epoch. Unusable values map to the epoch itself.
fn timestamp_field(source: &Map<String, Value>) -> DateTime<Utc> {
    source
        .get(fields::TIMESTAMP)
        .and_then(|value| value.as_i64().or_else(|| value.as_f64().map(|f| f as i64)))
        .and_then(DateTime::from_timestamp_micros)
        .unwrap_or(DateTime::UNIX_EPOCH)
}

fn labels_field(source: &Map<String, Value>) -> HashMap<String, String> {
    source
        .get(fields::LABELS)
        .and_then(Value::as_object)
        .map(|labels| {
            labels
                .iter()
                .filter_map(|(key, value)| value.as_str().map(|v| (key.clone(), v.to_string())))
                .collect()
        })
        .unwrap_or_default()
}
