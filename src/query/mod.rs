//! Pure rendering of backend documents from validated requests.
//!
//! Nothing in here performs I/O or fails on well-typed input. Every string
//! that ends up inside a single-quoted SQL literal goes through
//! [`escape_sql_literal`]; values in unquoted positions come from fixed
//! allow-lists.

mod alert;
pub mod fields;
mod search;

pub use alert::{ALERT_COUNT_COLUMN, AlertCondition, AlertConfig, build_alert_config};
pub use search::{
    DEFAULT_LIMIT, SearchQuery, SearchRequest, build_component_logs_query, effective_limit,
};

/// Escapes a value for embedding in a single-quoted SQL literal.
///
/// Backslashes are doubled first, then single quotes are doubled.
pub fn escape_sql_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "''")
}

/// `'<escaped value>'`
pub(crate) fn quoted(value: &str) -> String {
    format!("'{}'", escape_sql_literal(value))
}
