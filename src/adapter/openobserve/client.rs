use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use tracing::{debug, error, info, instrument, warn};

use super::OpenObserveConfig;
use super::health::HEALTH_PROBE_TIMEOUT;
use super::normalize::normalize_hit;
use crate::domain::{AlertDefinition, ComponentLogsParams, LogQueryResult, null_as_default};
use crate::error::BackendError;
use crate::port::{BackendFuture, LogBackend};
use crate::query::{SearchRequest, build_alert_config, build_component_logs_query};

/// Envelope returned by the `_search` endpoint.
///
/// Hits stay untyped only until [`normalize_hit`] turns them into log entries.
/// Absent and `null` fields both read as empty.
#[derive(Deserialize, Debug, Default)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub took: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hits: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: i64,
}

#[derive(Deserialize)]
struct AlertList {
    #[serde(default, deserialize_with = "null_as_default")]
    list: Vec<AlertSummary>,
}

#[derive(Deserialize)]
struct AlertSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    alert_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
}

#[derive(Deserialize)]
struct HealthStatus {
    #[serde(default)]
    status: Value,
}

/// Authenticated client for the OpenObserve search and alert APIs.
///
/// Built once at startup and shared read-only; the inner `reqwest::Client`
/// holds the connection pool and the request deadline.
#[derive(Clone)]
pub struct OpenObserveClient {
    http: Client,
    base_url: Url,
    org: String,
    stream: String,
    user: String,
    password: String,
    alert_destination: String,
}

impl fmt::Debug for OpenObserveClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenObserveClient")
            .field("base_url", &self.base_url.as_str())
            .field("org", &self.org)
            .field("stream", &self.stream)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

impl OpenObserveClient {
    /// Builds a client with its own connection pool bounded by `config.timeout`.
    pub fn new(config: OpenObserveConfig) -> Result<Self, BackendError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(BackendError::ClientBuild)?;
        Self::with_http_client(config, http)
    }

    /// Uses an already constructed HTTP client. Its timeout and pool settings
    /// are used as-is.
    pub fn with_http_client(config: OpenObserveConfig, http: Client) -> Result<Self, BackendError> {
        let trimmed = config.base_url.trim_end_matches('/');
        let base_url = Url::parse(trimmed).map_err(|e| BackendError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::InvalidBaseUrl {
                url: config.base_url,
                reason: "URL cannot carry a path".to_string(),
            });
        }

        Ok(Self {
            http,
            base_url,
            org: config.org,
            stream: config.stream,
            user: config.user,
            password: config.password,
            alert_destination: config.alert_destination,
        })
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // base_url is checked to be a base URL on construction
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn alerts_endpoint(&self) -> Url {
        self.endpoint(&["api", "v2", &self.org, "alerts"])
    }

    /// Sends an authenticated request and reads the whole response body.
    async fn send(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<(StatusCode, String), BackendError> {
        let transport = |source: reqwest::Error| {
            error!(endpoint = url.path(), error = %source, "Request to OpenObserve failed");
            BackendError::Transport {
                endpoint: url.path().to_string(),
                source,
            }
        };

        let response = request
            .basic_auth(&self.user, Some(&self.password))
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;
        Ok((status, body))
    }

    /// Fails with [`BackendError::Status`] unless `status` is one of `accepted`.
    fn check_status(
        url: &Url,
        status: StatusCode,
        body: String,
        accepted: &[StatusCode],
    ) -> Result<String, BackendError> {
        if accepted.contains(&status) {
            return Ok(body);
        }
        error!(
            endpoint = url.path(),
            status_code = status.as_u16(),
            body = %body,
            "OpenObserve returned error"
        );
        Err(BackendError::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// Runs a search document against the configured organization.
    ///
    /// No retries: a failed search fails the caller's request.
    #[instrument(skip_all)]
    pub async fn execute_search(
        &self,
        search: &SearchRequest,
    ) -> Result<SearchResponse, BackendError> {
        let url = self.endpoint(&["api", &self.org, "_search"]);
        let payload = serde_json::to_vec(search).map_err(|source| BackendError::Encode {
            what: "search request",
            source,
        })?;

        let request = self
            .http
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(payload);
        let (status, body) = self.send(request, &url).await?;
        let body = Self::check_status(&url, status, body, &[StatusCode::OK])?;

        serde_json::from_str(&body).map_err(|source| {
            error!(error = %source, "Failed to decode search response from OpenObserve");
            BackendError::Decode {
                what: "search response",
                source,
            }
        })
    }

    /// Probes `/healthz`. Healthy means status 200 and `{"status": "ok"}`.
    pub async fn check_health(&self) -> Result<(), BackendError> {
        let url = self.endpoint(&["healthz"]);
        let response = self
            .http
            .get(url.clone())
            .timeout(HEALTH_PROBE_TIMEOUT)
            .send()
            .await
            .map_err(|source| BackendError::Transport {
                endpoint: url.path().to_string(),
                source,
            })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| BackendError::Transport {
                endpoint: url.path().to_string(),
                source,
            })?;

        if status != StatusCode::OK {
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let health: HealthStatus =
            serde_json::from_str(&body).map_err(|source| BackendError::Decode {
                what: "health response",
                source,
            })?;
        match health.status.as_str() {
            Some("ok") => Ok(()),
            _ => Err(BackendError::Unhealthy(health.status.to_string())),
        }
    }
}

impl LogBackend for OpenObserveClient {
    fn get_component_logs(&self, params: ComponentLogsParams) -> BackendFuture<'_, LogQueryResult> {
        Box::pin(async move {
            let search = build_component_logs_query(&params, &self.stream);
            let response = self.execute_search(&search).await?;

            let logs: Vec<_> = response.hits.iter().map(normalize_hit).collect();
            debug!(
                returned = logs.len(),
                total = response.total,
                took_ms = response.took,
                "Fetched component logs"
            );

            Ok(LogQueryResult {
                logs,
                total_count: response.total,
                took: response.took,
            })
        })
    }

    fn create_alert(&self, alert: AlertDefinition) -> BackendFuture<'_, ()> {
        Box::pin(async move {
            let config = build_alert_config(&alert, &self.stream, &self.alert_destination);
            let payload = serde_json::to_vec(&config).map_err(|source| BackendError::Encode {
                what: "alert config",
                source,
            })?;

            let url = self.alerts_endpoint();
            let request = self
                .http
                .post(url.clone())
                .header(CONTENT_TYPE, "application/json")
                .body(payload);
            let (status, body) = self.send(request, &url).await?;
            Self::check_status(&url, status, body, &[StatusCode::OK, StatusCode::CREATED])?;

            info!(alert = %alert.name, "Created alert in OpenObserve");
            Ok(())
        })
    }

    fn resolve_alert_id<'a>(&'a self, name: &'a str) -> BackendFuture<'a, String> {
        Box::pin(async move {
            let url = self.alerts_endpoint();
            let (status, body) = self.send(self.http.get(url.clone()), &url).await?;
            let body = Self::check_status(&url, status, body, &[StatusCode::OK])?;

            let alerts: AlertList =
                serde_json::from_str(&body).map_err(|source| BackendError::Decode {
                    what: "alert list",
                    source,
                })?;

            // Names are not unique on the backend; the first listed match wins.
            match alerts.list.into_iter().find(|alert| alert.name == name) {
                Some(alert) => {
                    debug!(alert = name, alert_id = %alert.alert_id, "Resolved alert ID");
                    Ok(alert.alert_id)
                }
                None => {
                    warn!(alert = name, "No alert with this name in OpenObserve");
                    Err(BackendError::AlertNotFound(name.to_string()))
                }
            }
        })
    }

    fn delete_alert_by_id<'a>(&'a self, alert_id: &'a str) -> BackendFuture<'a, ()> {
        Box::pin(async move {
            let url = self.endpoint(&["api", "v2", &self.org, "alerts", alert_id]);
            let (status, body) = self.send(self.http.delete(url.clone()), &url).await?;
            Self::check_status(&url, status, body, &[StatusCode::OK, StatusCode::NO_CONTENT])?;

            info!(alert_id, "Deleted alert in OpenObserve");
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(base_url: &str) -> OpenObserveConfig {
        OpenObserveConfig {
            base_url: base_url.to_string(),
            org: "default".to_string(),
            stream: "default".to_string(),
            user: "admin".to_string(),
            password: "secret".to_string(),
            alert_destination: "openchoreo_alerts".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = OpenObserveClient::new(config("http://openobserve:5080/")).unwrap();
        assert_eq!(
            client.endpoint(&["api", "default", "_search"]).as_str(),
            "http://openobserve:5080/api/default/_search"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = OpenObserveClient::new(config("http://gateway/observe/")).unwrap();
        assert_eq!(
            client.alerts_endpoint().as_str(),
            "http://gateway/observe/api/v2/default/alerts"
        );
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = OpenObserveClient::new(config("http://openobserve:5080")).unwrap();
        let url = client.endpoint(&["api", "v2", "default", "alerts", "a/b c"]);
        assert_eq!(url.path(), "/api/v2/default/alerts/a%2Fb%20c");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = OpenObserveClient::new(config("not a url")).unwrap_err();
        assert!(matches!(err, BackendError::InvalidBaseUrl { .. }));

        let err = OpenObserveClient::new(config("mailto:ops@example.com")).unwrap_err();
        assert!(matches!(err, BackendError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_debug_hides_password() {
        let client = OpenObserveClient::new(config("http://openobserve:5080")).unwrap();
        assert!(!format!("{client:?}").contains("secret"));
    }
}
