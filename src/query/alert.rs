use serde::Serialize;
use tracing::debug;

use super::{fields, quoted};
use crate::domain::AlertDefinition;

/// Column the alert query's count is aliased to.
pub const ALERT_COUNT_COLUMN: &str = "match_count";

/// Body of the backend's alert creation endpoint.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct AlertConfig {
    pub name: String,
    pub stream_name: String,
    pub query: String,
    pub condition: AlertCondition,
    pub duration: i64,
    pub frequency: i64,
    pub is_realtime: bool,
    pub destinations: Vec<String>,
    pub alert_type: &'static str,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct AlertCondition {
    pub column: &'static str,
    pub operator: &'static str,
    pub value: i64,
}

/// Renders a scheduled alert that fires when more than
/// `threshold_value` log lines match the search pattern.
pub fn build_alert_config(alert: &AlertDefinition, stream: &str, destination: &str) -> AlertConfig {
    let query = format!(
        "SELECT count(*) as {ALERT_COUNT_COLUMN} FROM \"{stream}\" WHERE str_match({}, {})",
        fields::LOG,
        quoted(&alert.search_pattern),
    );

    let config = AlertConfig {
        name: alert.name.clone(),
        stream_name: stream.to_string(),
        query,
        condition: AlertCondition {
            column: ALERT_COUNT_COLUMN,
            operator: ">",
            value: alert.threshold_value,
        },
        duration: alert.duration,
        frequency: alert.frequency,
        is_realtime: false,
        destinations: vec![destination.to_string()],
        alert_type: "scheduled",
    };

    debug!(alert = %config.name, query = %config.query, "Generated alert config");

    config
}
