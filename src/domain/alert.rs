use serde::{Deserialize, Serialize};

/// A named scheduled detection rule over a log search pattern.
///
/// `name` is the adapter's external key for the rule. The backend assigns its
/// own opaque ID on creation, which is only discoverable by listing alerts.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AlertDefinition {
    #[serde(default)]
    pub name: String,
    pub search_pattern: String,
    pub threshold_value: i64,
    /// Evaluation window, in the backend's time unit (minutes).
    pub duration: i64,
    /// Evaluation frequency, in the backend's time unit (minutes).
    pub frequency: i64,
}

impl AlertDefinition {
    /// Returns the definition renamed to `name`.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_optional_in_body() {
        let alert: AlertDefinition = serde_json::from_str(
            r#"{"searchPattern":"ERROR","thresholdValue":10,"duration":5,"frequency":1}"#,
        )
        .unwrap();

        assert_eq!(alert.name, "");
        assert_eq!(alert.search_pattern, "ERROR");
        assert_eq!(alert.threshold_value, 10);
    }

    #[test]
    fn test_named_overrides_body_name() {
        let alert: AlertDefinition = serde_json::from_str(
            r#"{"name":"from-body","searchPattern":"x","thresholdValue":1,"duration":1,"frequency":1}"#,
        )
        .unwrap();

        assert_eq!(alert.named("from-path").name, "from-path");
    }

    #[test]
    fn test_missing_pattern_is_rejected() {
        let result: Result<AlertDefinition, _> =
            serde_json::from_str(r#"{"thresholdValue":1,"duration":1,"frequency":1}"#);
        assert!(result.is_err());
    }
}
