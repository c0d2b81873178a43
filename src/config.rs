use std::env;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use crate::layout::DEFAULT_PADDING;

/// Complete application configuration, loaded from environment variables or default values.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub assistant: AssistantConfig,
    pub layout: LayoutConfig,
}

impl AppConfig {
    /// Creates a configuration from the currently available environment variables.
    pub fn from_env() -> Self {
        Self {
            api: ApiConfig::from_env(),
            assistant: AssistantConfig::from_env(),
            layout: LayoutConfig::from_env(),
        }
    }
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    bind_ip: IpAddr,
    display_host: String,
    port: u16,
}

impl ApiConfig {
    const DEFAULT_HOST: &'static str = "0.0.0.0";
    const DEFAULT_PORT: u16 = 8080;

    fn from_env() -> Self {
        let host_value =
            env_string("STOW_IT_NOW_API_HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string());
        let (bind_ip, effective_host) = match host_value.parse::<IpAddr>() {
            Ok(ip) => (ip, host_value),
            Err(err) => {
                eprintln!(
                    "⚠️ Could not parse STOW_IT_NOW_API_HOST ('{}'): {}. Using {}.",
                    host_value,
                    err,
                    Self::DEFAULT_HOST
                );
                (
                    Self::DEFAULT_HOST
                        .parse::<IpAddr>()
                        .expect("Default host must be valid"),
                    Self::DEFAULT_HOST.to_string(),
                )
            }
        };

        let port = match env_string("STOW_IT_NOW_API_PORT") {
            Some(raw) => match raw.parse::<u16>() {
                Ok(value) if value != 0 => value,
                Ok(_) => {
                    eprintln!(
                        "⚠️ STOW_IT_NOW_API_PORT must not be 0. Using {}.",
                        Self::DEFAULT_PORT
                    );
                    Self::DEFAULT_PORT
                }
                Err(err) => {
                    eprintln!(
                        "⚠️ Could not parse STOW_IT_NOW_API_PORT ('{}'): {}. Using {}.",
                        raw,
                        err,
                        Self::DEFAULT_PORT
                    );
                    Self::DEFAULT_PORT
                }
            },
            None => Self::DEFAULT_PORT,
        };

        Self {
            bind_ip,
            display_host: effective_host,
            port,
        }
    }

    /// Socket address to bind the server to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_ip, self.port)
    }

    /// Visible hostname for logging and hints.
    pub fn display_host(&self) -> &str {
        &self.display_host
    }

    /// Configured port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Indicates whether binding to all interfaces.
    pub fn binds_to_all_interfaces(&self) -> bool {
        match self.bind_ip {
            IpAddr::V4(addr) => addr == Ipv4Addr::UNSPECIFIED,
            IpAddr::V6(addr) => addr == Ipv6Addr::UNSPECIFIED,
        }
    }

    /// Checks whether the hostname matches the default value.
    pub fn uses_default_host(&self) -> bool {
        self.display_host == Self::DEFAULT_HOST
    }
}

/// Configuration for the external AI suggestion service.
///
/// Without an endpoint the service runs fully offline and every
/// suggestion request uses the local rule-based generator.
#[derive(Clone, Debug)]
pub struct AssistantConfig {
    endpoint: Option<String>,
    api_key: Option<String>,
    timeout_secs: u64,
}

impl AssistantConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 20;

    fn from_env() -> Self {
        let timeout_secs = match env_string("STOW_IT_NOW_ASSISTANT_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(value) if value > 0 => value,
                Ok(_) => {
                    eprintln!(
                        "⚠️ STOW_IT_NOW_ASSISTANT_TIMEOUT_SECS must not be 0. Using {}.",
                        Self::DEFAULT_TIMEOUT_SECS
                    );
                    Self::DEFAULT_TIMEOUT_SECS
                }
                Err(err) => {
                    eprintln!(
                        "⚠️ Could not parse STOW_IT_NOW_ASSISTANT_TIMEOUT_SECS ('{}'): {}. Using {}.",
                        raw,
                        err,
                        Self::DEFAULT_TIMEOUT_SECS
                    );
                    Self::DEFAULT_TIMEOUT_SECS
                }
            },
            None => Self::DEFAULT_TIMEOUT_SECS,
        };

        Self {
            endpoint: env_string("STOW_IT_NOW_ASSISTANT_URL"),
            api_key: env_string("STOW_IT_NOW_ASSISTANT_KEY"),
            timeout_secs,
        }
    }

    /// Endpoint URL, if an assistant is configured.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Bearer token for the assistant, if any.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Request timeout in seconds.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Builds a config directly; used by tests.
    #[cfg(test)]
    pub fn offline() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Configuration for the layout engine.
#[derive(Clone, Copy, Debug)]
pub struct LayoutConfig {
    padding: f64,
}

impl LayoutConfig {
    const PADDING_VAR: &'static str = "STOW_IT_NOW_LAYOUT_PADDING";

    fn from_env() -> Self {
        let padding = load_f64_with_warning(
            Self::PADDING_VAR,
            DEFAULT_PADDING,
            |value| value > 0.0 && value < 0.1,
            "must be between 0 and 0.1 meters",
            "Warning: Adjusted padding changes every computed layout",
        );
        Self { padding }
    }

    /// Padding margin between items and walls, in meters.
    pub fn padding(&self) -> f64 {
        self.padding
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
        }
    }
}

fn env_string(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_owned())
            }
        }
        Err(env::VarError::NotPresent) => None,
        Err(err) => {
            eprintln!(
                "⚠️ Access to {} failed: {}. Using default value.",
                name, err
            );
            None
        }
    }
}

fn load_f64_with_warning(
    var_name: &str,
    default: f64,
    validator: impl Fn(f64) -> bool,
    invalid_hint: &str,
    warning: &str,
) -> f64 {
    match env_string(var_name) {
        Some(raw) => match raw.parse::<f64>() {
            Ok(value) => {
                if !validator(value) {
                    eprintln!(
                        "⚠️ {} contains invalid value '{}': {}. Using {}.",
                        var_name, raw, invalid_hint, default
                    );
                    default
                } else {
                    let tolerance = (default.abs().max(1.0)) * 1e-9;
                    if (value - default).abs() > tolerance {
                        println!("⚠️ {} ({} = {}).", warning, var_name, value);
                    }
                    value
                }
            }
            Err(err) => {
                eprintln!(
                    "⚠️ Could not parse {} ('{}') as number: {}. Using {}.",
                    var_name, raw, err, default
                );
                default
            }
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_config_uses_standard_padding() {
        let config = LayoutConfig::default();
        assert!((config.padding() - DEFAULT_PADDING).abs() < f64::EPSILON);
    }

    #[test]
    fn offline_assistant_config_has_no_endpoint() {
        let config = AssistantConfig::offline();
        assert!(config.endpoint().is_none());
        assert!(config.api_key().is_none());
        assert!(config.timeout_secs() > 0);
    }
}
