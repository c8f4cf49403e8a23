mod alert;
mod log_entry;
mod log_query;

pub use alert::AlertDefinition;
pub use log_entry::{LogEntry, LogQueryResult};
pub use log_query::{
    ComponentLogsParams, LogQuery, QueryDecodeError, SUPPORTED_QUERY_TYPES, SortOrder,
};

use serde::{Deserialize, Deserializer};

/// Deserializes `null` the same way as an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
