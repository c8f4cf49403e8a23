//! Column names of the backend's log stream.

pub const TIMESTAMP: &str = "_timestamp";
pub const LOG: &str = "log";
pub const LOG_LEVEL: &str = "logLevel";
pub const COMPONENT_ID: &str = "kubernetes_labels_openchoreo_dev_component_uid";
pub const ENVIRONMENT_ID: &str = "kubernetes_labels_openchoreo_dev_environment_uid";
pub const PROJECT_ID: &str = "kubernetes_labels_openchoreo_dev_project_uid";
pub const NAMESPACE: &str = "kubernetes_namespace_name";
pub const POD_ID: &str = "kubernetes_pod_id";
pub const CONTAINER_NAME: &str = "kubernetes_container_name";
pub const LABELS: &str = "labels";
