use serde::Serialize;
use tracing::debug;

use super::{escape_sql_literal, fields, quoted};
use crate::domain::ComponentLogsParams;

/// Page size used when the request asks for zero or a negative limit.
pub const DEFAULT_LIMIT: i64 = 100;

/// Body of the backend's `_search` endpoint.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: SearchQuery,
    /// Server-side timeout in seconds; 0 leaves it to the backend default.
    pub timeout: u64,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery {
    pub sql: String,
    /// Inclusive lower bound, microseconds since the Unix epoch.
    pub start_time: i64,
    /// Upper bound, microseconds since the Unix epoch.
    pub end_time: i64,
    pub from: i64,
    pub size: i64,
}

pub fn effective_limit(limit: i64) -> i64 {
    if limit <= 0 { DEFAULT_LIMIT } else { limit }
}

/// `(<column> = '<v1>' OR <column> = '<v2>' ...)`
fn any_of(column: &str, values: &[String]) -> String {
    let alternatives: Vec<String> = values
        .iter()
        .map(|value| format!("{column} = {}", quoted(value)))
        .collect();
    format!("({})", alternatives.join(" OR "))
}

/// Renders the search document for a component logs query.
///
/// `stream` must already be a validated identifier: it is placed in the SQL
/// unquoted.
pub fn build_component_logs_query(params: &ComponentLogsParams, stream: &str) -> SearchRequest {
    let mut conditions = vec![
        format!("{} = {}", fields::PROJECT_ID, quoted(&params.project_id)),
        format!("{} = {}", fields::ENVIRONMENT_ID, quoted(&params.environment_id)),
    ];

    if !params.component_ids.is_empty() {
        conditions.push(any_of(fields::COMPONENT_ID, &params.component_ids));
    }

    if !params.search_phrase.is_empty() {
        conditions.push(format!(
            "{} LIKE '%{}%'",
            fields::LOG,
            escape_sql_literal(&params.search_phrase)
        ));
    }

    if !params.log_levels.is_empty() {
        conditions.push(any_of(fields::LOG_LEVEL, &params.log_levels));
    }

    let sql = format!(
        "SELECT * FROM {stream} WHERE {} ORDER BY {} {}",
        conditions.join(" AND "),
        fields::TIMESTAMP,
        params.sort_order().as_sql(),
    );

    let request = SearchRequest {
        query: SearchQuery {
            sql,
            start_time: params.start_time.timestamp_micros(),
            end_time: params.end_time.timestamp_micros(),
            from: 0,
            size: effective_limit(params.limit),
        },
        timeout: 0,
    };

    debug!(
        stream,
        sql = %request.query.sql,
        start_time = request.query.start_time,
        end_time = request.query.end_time,
        size = request.query.size,
        "Generated component logs query"
    );

    request
}
