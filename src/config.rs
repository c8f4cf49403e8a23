use std::env;
use std::fmt;
use std::fs;
use std::time::Duration;

use thiserror::Error;
use tracing::Level;

const DEFAULT_SERVER_PORT: u16 = 9098;
const DEFAULT_ORG: &str = "default";
const DEFAULT_STREAM: &str = "default";
const DEFAULT_ALERT_DESTINATION: &str = "openchoreo_alerts";
const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;
const DEFAULT_HEALTH_CHECK_ATTEMPTS: u32 = 5;
const DEFAULT_HEALTH_CHECK_INTERVAL_SECS: u64 = 2;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {source}")]
    Invalid {
        name: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

#[derive(Clone)]
pub struct Settings {
    pub openobserve_url: String,
    pub openobserve_org: String,
    /// Stream queried by searches and alerts. Restricted to identifier
    /// characters because it is embedded unquoted in search SQL.
    pub openobserve_stream: String,
    pub openobserve_user: String,
    pub openobserve_password: String,
    pub alert_destination: String,
    pub server_port: u16,
    pub log_level: Level,
    pub backend_timeout: Duration,
    pub health_check_attempts: u32,
    pub health_check_interval: Duration,
}

impl Settings {
    /// Validates the settings and returns an error if invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url("OPENOBSERVE_URL", &self.openobserve_url)?;
        validate_not_blank("OPENOBSERVE_ORG", &self.openobserve_org)?;
        validate_stream(&self.openobserve_stream)?;
        validate_not_blank("OPENOBSERVE_USER", &self.openobserve_user)?;
        validate_not_blank("OPENOBSERVE_PASSWORD", &self.openobserve_password)?;
        validate_not_blank("ALERT_DESTINATION", &self.alert_destination)?;
        validate_port(self.server_port)?;
        if self.health_check_attempts == 0 {
            return Err(invalid(
                "HEALTH_CHECK_ATTEMPTS",
                "must be greater than zero",
            ));
        }
        if self.backend_timeout.is_zero() {
            return Err(invalid("BACKEND_TIMEOUT_SECS", "must be greater than zero"));
        }
        Ok(())
    }

    /// Password with everything but the first character hidden, for logs.
    pub fn masked_password(&self) -> String {
        mask_secret(&self.openobserve_password)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("openobserve_url", &self.openobserve_url)
            .field("openobserve_org", &self.openobserve_org)
            .field("openobserve_stream", &self.openobserve_stream)
            .field("openobserve_user", &self.openobserve_user)
            .field("openobserve_password", &self.masked_password())
            .field("alert_destination", &self.alert_destination)
            .field("server_port", &self.server_port)
            .field("log_level", &self.log_level)
            .field("backend_timeout", &self.backend_timeout)
            .field("health_check_attempts", &self.health_check_attempts)
            .field("health_check_interval", &self.health_check_interval)
            .finish()
    }
}

fn mask_secret(secret: &str) -> String {
    match secret.chars().next() {
        Some(first) => format!("{first}*****"),
        None => String::new(),
    }
}

fn invalid(name: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid {
        name,
        source: anyhow::anyhow!(reason),
    }
}

fn validate_not_blank(name: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(invalid(name, "cannot be empty"));
    }
    Ok(())
}

fn validate_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    let url = reqwest::Url::parse(value).map_err(|e| ConfigError::Invalid {
        name,
        source: anyhow::Error::new(e),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(invalid(name, "scheme must be http or https")),
    }
}

fn validate_stream(stream: &str) -> Result<(), ConfigError> {
    validate_not_blank("OPENOBSERVE_STREAM", stream)?;
    if !stream
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(invalid(
            "OPENOBSERVE_STREAM",
            "may only contain ASCII letters, digits and underscores",
        ));
    }
    Ok(())
}

/// Validates that the port is in valid range (1-65535).
fn validate_port(port: u16) -> Result<(), ConfigError> {
    if port == 0 {
        return Err(invalid("SERVER_PORT", "Port cannot be 0"));
    }
    Ok(())
}

/// Read a value from environment variable, with support for _FILE suffix (Docker Secrets)
fn get_env_or_file(env_name: &'static str) -> Result<String, ConfigError> {
    let file_env = format!("{env_name}_FILE");
    if let Ok(file_path) = env::var(&file_env) {
        return fs::read_to_string(&file_path)
            .map(|content| content.trim().to_string())
            .map_err(|e| ConfigError::Invalid {
                name: env_name,
                source: anyhow::Error::new(e).context(format!("failed to read {file_env}")),
            });
    }

    env_var(env_name)
}

/// Required variable; empty counts as missing.
fn env_var(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn env_or(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

fn parse_env<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + ToString,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env_or(name, &default.to_string())
        .parse::<T>()
        .map_err(|error| ConfigError::Invalid {
            name,
            source: anyhow::Error::new(error),
        })
}

/// Parses a `LOG_LEVEL` value. Unknown or empty values fall back to INFO.
pub fn parse_log_level(raw: &str) -> Level {
    match raw.trim().to_ascii_uppercase().as_str() {
        "DEBUG" => Level::DEBUG,
        "WARN" | "WARNING" => Level::WARN,
        "ERROR" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Log level from `LOG_LEVEL`, readable before the rest of the settings so
/// that configuration errors are logged at the requested verbosity.
pub fn log_level_from_env() -> Level {
    parse_log_level(&env::var("LOG_LEVEL").unwrap_or_default())
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let openobserve_url = env_var("OPENOBSERVE_URL")?;
    let openobserve_user = env_var("OPENOBSERVE_USER")?;
    let openobserve_password = get_env_or_file("OPENOBSERVE_PASSWORD")?;

    let settings = Settings {
        openobserve_url,
        openobserve_org: env_or("OPENOBSERVE_ORG", DEFAULT_ORG),
        openobserve_stream: env_or("OPENOBSERVE_STREAM", DEFAULT_STREAM),
        openobserve_user,
        openobserve_password,
        alert_destination: env_or("ALERT_DESTINATION", DEFAULT_ALERT_DESTINATION),
        server_port: parse_env("SERVER_PORT", DEFAULT_SERVER_PORT)?,
        log_level: log_level_from_env(),
        backend_timeout: Duration::from_secs(parse_env(
            "BACKEND_TIMEOUT_SECS",
            DEFAULT_BACKEND_TIMEOUT_SECS,
        )?),
        health_check_attempts: parse_env("HEALTH_CHECK_ATTEMPTS", DEFAULT_HEALTH_CHECK_ATTEMPTS)?,
        health_check_interval: Duration::from_secs(parse_env(
            "HEALTH_CHECK_INTERVAL_SECS",
            DEFAULT_HEALTH_CHECK_INTERVAL_SECS,
        )?),
    };

    settings.validate()?;

    Ok(settings)
}
