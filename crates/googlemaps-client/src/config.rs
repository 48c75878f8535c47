//! Client configuration types.

use googlemaps_core::{MapsError, Result};
use std::time::Duration;

use crate::signer;

/// The Google Maps web services host
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

/// The host serving Google APIs such as geolocation
pub const GOOGLEAPIS_BASE_URL: &str = "https://www.googleapis.com";

/// The Roads API host
pub const ROADS_BASE_URL: &str = "https://roads.googleapis.com";

/// Prefix every Maps API key starts with
pub(crate) const API_KEY_PREFIX: &str = "AIza";

/// Default deadline across all attempts of one request
pub(crate) const DEFAULT_RETRY_TIMEOUT: Duration = Duration::from_secs(60);

/// Default number of requests allowed per second
pub(crate) const DEFAULT_QUERIES_PER_SECOND: usize = 10;

/// Serialization requested from services that offer a choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// JSON bodies (default)
    #[default]
    Json,
    /// XML bodies
    Xml,
}

impl ResponseFormat {
    /// The format as it appears in service paths
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }
}

impl std::fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResponseFormat {
    type Err = MapsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            other => Err(MapsError::Config(format!(
                "unsupported response format {other:?}, expected json or xml"
            ))),
        }
    }
}

/// HTTP timeouts applied to every attempt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timeouts {
    /// Combined timeout for a whole attempt
    pub total: Option<Duration>,
    /// Timeout for establishing the connection
    pub connect: Option<Duration>,
    /// Timeout between reads of the response
    pub read: Option<Duration>,
}

/// Base URLs of the hosts the services live on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hosts {
    /// Maps web services
    pub maps: String,
    /// Roads API
    pub roads: String,
    /// Google APIs (geolocation)
    pub googleapis: String,
}

impl Default for Hosts {
    fn default() -> Self {
        Self {
            maps: DEFAULT_BASE_URL.to_string(),
            roads: ROADS_BASE_URL.to_string(),
            googleapis: GOOGLEAPIS_BASE_URL.to_string(),
        }
    }
}

/// Validated, immutable settings of a client.
///
/// Either an API key or a client ID and secret pair must be present. Once
/// built the configuration is shared read-only by every request.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub(crate) key: Option<String>,
    pub(crate) client_id: Option<String>,
    pub(crate) client_secret: Option<String>,
    pub(crate) channel: Option<String>,
    pub(crate) timeouts: Timeouts,
    pub(crate) retry_timeout: Duration,
    pub(crate) queries_per_second: usize,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) response_format: ResponseFormat,
    pub(crate) retry_over_query_limit: bool,
    pub(crate) hosts: Hosts,
    pub(crate) user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            key: None,
            client_id: None,
            client_secret: None,
            channel: None,
            timeouts: Timeouts::default(),
            retry_timeout: DEFAULT_RETRY_TIMEOUT,
            queries_per_second: DEFAULT_QUERIES_PER_SECOND,
            headers: Vec::new(),
            response_format: ResponseFormat::default(),
            retry_over_query_limit: true,
            hosts: Hosts::default(),
            user_agent: format!("GoogleMapsRustClient/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// API key, if configured
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Enterprise client ID, if configured
    #[must_use]
    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    /// Tracking channel, if configured
    #[must_use]
    pub fn channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }

    /// Per-attempt HTTP timeouts
    #[must_use]
    pub const fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    /// Deadline across all attempts of one request
    #[must_use]
    pub const fn retry_timeout(&self) -> Duration {
        self.retry_timeout
    }

    /// Maximum requests per rolling second
    #[must_use]
    pub const fn queries_per_second(&self) -> usize {
        self.queries_per_second
    }

    /// Format requested from services that offer a choice
    #[must_use]
    pub const fn response_format(&self) -> ResponseFormat {
        self.response_format
    }

    /// Whether quota exhaustion is retried or surfaced
    #[must_use]
    pub const fn retry_over_query_limit(&self) -> bool {
        self.retry_over_query_limit
    }

    /// Service hosts
    #[must_use]
    pub const fn hosts(&self) -> &Hosts {
        &self.hosts
    }

    /// User-Agent sent with every request
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// The client ID and secret, when both are configured
    pub(crate) fn enterprise_credentials(&self) -> Option<(&str, &str)> {
        match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }

    /// Check every invariant a usable client depends on.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.key.is_none() && self.enterprise_credentials().is_none() {
            return Err(MapsError::Config(
                "must provide an API key or enterprise credentials when creating a client"
                    .to_string(),
            ));
        }

        if let Some(key) = &self.key {
            if !key.starts_with(API_KEY_PREFIX) {
                return Err(MapsError::Config("invalid API key provided".to_string()));
            }
        }

        if let Some(channel) = &self.channel {
            if self.client_id.is_none() {
                return Err(MapsError::Config(
                    "the channel argument must be used with a client ID".to_string(),
                ));
            }
            if !is_valid_channel(channel) {
                return Err(MapsError::Config(
                    "the channel argument must be an ASCII alphanumeric string; \
                     the period (.), underscore (_) and hyphen (-) characters are allowed"
                        .to_string(),
                ));
            }
        }

        if let Some(secret) = &self.client_secret {
            signer::decode_secret(secret)
                .map_err(|e| MapsError::Config(format!("invalid client secret: {e}")))?;
        }

        if self.timeouts.total.is_some()
            && (self.timeouts.connect.is_some() || self.timeouts.read.is_some())
        {
            return Err(MapsError::Config(
                "specify either timeout, or connect_timeout and read_timeout".to_string(),
            ));
        }

        if self.queries_per_second == 0 {
            return Err(MapsError::Config(
                "queries_per_second must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

fn is_valid_channel(channel: &str) -> bool {
    channel
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "AIzadGhpcyBpcyBhIGtleQ==";

    fn with_key() -> ClientConfig {
        ClientConfig {
            key: Some(KEY.to_string()),
            ..ClientConfig::default()
        }
    }

    #[test]
    fn test_requires_credentials() {
        let err = ClientConfig::default().validate().unwrap_err();
        assert!(matches!(err, MapsError::Config(_)));
    }

    #[test]
    fn test_client_id_without_secret_is_not_enough() {
        let config = ClientConfig {
            client_id: Some("gme-test".to_string()),
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_key_without_prefix() {
        let config = ClientConfig {
            key: Some("dGhpcyBpcyBhIGtleQ==".to_string()),
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(with_key().validate().is_ok());
    }

    #[test]
    fn test_channel_requires_client_id() {
        let config = ClientConfig {
            channel: Some("chan_attr".to_string()),
            ..with_key()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_channel_character_set() {
        let enterprise = ClientConfig {
            client_id: Some("gme-test".to_string()),
            client_secret: Some("U0VDUkVU".to_string()),
            ..ClientConfig::default()
        };

        for channel in ["chan_attr", "a.b-c_1", ""] {
            let config = ClientConfig {
                channel: Some(channel.to_string()),
                ..enterprise.clone()
            };
            assert!(config.validate().is_ok(), "{channel:?} should be accepted");
        }

        for channel in ["chan attr", "chan/attr", "canal-é"] {
            let config = ClientConfig {
                channel: Some(channel.to_string()),
                ..enterprise.clone()
            };
            assert!(config.validate().is_err(), "{channel:?} should be rejected");
        }
    }

    #[test]
    fn test_rejects_conflicting_timeouts() {
        let config = ClientConfig {
            timeouts: Timeouts {
                total: Some(Duration::from_secs(60)),
                connect: Some(Duration::from_secs(30)),
                read: None,
            },
            ..with_key()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_rate() {
        let config = ClientConfig {
            queries_per_second: 0,
            ..with_key()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_response_format_parsing() {
        assert_eq!("xml".parse::<ResponseFormat>().unwrap(), ResponseFormat::Xml);
        assert!("yaml".parse::<ResponseFormat>().is_err());
    }
}
