//! Per-call request descriptions consumed by the client's `execute`.

use googlemaps_core::convert::format_float;
use std::fmt;
use std::sync::Arc;
use url::form_urlencoded;

use crate::config::{Hosts, ResponseFormat};
use crate::decode::ResponseExtractor;

/// A query parameter value: one string, or a list rendered as repeated keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Rendered as `key=value`
    Single(String),
    /// Rendered as `key=a&key=b`
    Multiple(Vec<String>),
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Single(value.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Single(format_float(value))
    }
}

macro_rules! integer_param {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    Self::Single(value.to_string())
                }
            }
        )+
    };
}

integer_param!(u8, u16, u32, u64, usize, i32, i64);

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multiple(values)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Multiple(values.into_iter().map(String::from).collect())
    }
}

/// Ordered query parameters.
///
/// Parameters render in insertion order. Setting an existing key replaces its
/// value without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    /// Create an empty parameter list
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set a parameter, replacing any previous value for the key
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Set a parameter only when a value is present
    pub fn set_opt<V: Into<ParamValue>>(
        &mut self,
        key: impl Into<String>,
        value: Option<V>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.set(key, value);
        }
        self
    }

    /// Builder-style [`Params::set`]
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Value of a parameter
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Number of parameters
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no parameter is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as an `application/x-www-form-urlencoded` query string
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.entries {
            match value {
                ParamValue::Single(value) => {
                    serializer.append_pair(key, value);
                }
                ParamValue::Multiple(values) => {
                    for value in values {
                        serializer.append_pair(key, value);
                    }
                }
            }
        }
        serializer.finish()
    }
}

/// Host a request is sent to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Host {
    /// The Maps web services host (default)
    #[default]
    Maps,
    /// The Roads API host
    Roads,
    /// The Google APIs host
    GoogleApis,
    /// Any other base URL, without a trailing slash
    Custom(String),
}

impl Host {
    pub(crate) fn base_url<'a>(&'a self, hosts: &'a Hosts) -> &'a str {
        match self {
            Self::Maps => &hosts.maps,
            Self::Roads => &hosts.roads,
            Self::GoogleApis => &hosts.googleapis,
            Self::Custom(url) => url,
        }
    }
}

/// Everything the client needs to perform one logical request
#[derive(Clone)]
pub struct RequestSpec {
    pub(crate) path: String,
    pub(crate) params: Params,
    pub(crate) format: ResponseFormat,
    pub(crate) accepts_client_id: bool,
    pub(crate) host: Host,
    pub(crate) body: Option<serde_json::Value>,
    pub(crate) extractor: Option<Arc<dyn ResponseExtractor>>,
}

impl RequestSpec {
    /// A GET request for `path`, which should begin with a slash
    #[must_use]
    pub fn get(path: impl Into<String>, params: Params) -> Self {
        Self {
            path: path.into(),
            params,
            format: ResponseFormat::Json,
            accepts_client_id: true,
            host: Host::Maps,
            body: None,
            extractor: None,
        }
    }

    /// A POST request carrying a JSON body
    #[must_use]
    pub fn post_json(path: impl Into<String>, params: Params, body: serde_json::Value) -> Self {
        Self {
            body: Some(body),
            ..Self::get(path, params)
        }
    }

    /// Format the body is expected in when the response does not declare one
    #[must_use]
    pub const fn format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    /// Refuse enterprise signing; the endpoint only accepts API keys
    #[must_use]
    pub const fn api_key_only(mut self) -> Self {
        self.accepts_client_id = false;
        self
    }

    /// Send to another host
    #[must_use]
    pub fn host(mut self, host: Host) -> Self {
        self.host = host;
        self
    }

    /// Replace the default response decoding
    #[must_use]
    pub fn extractor(mut self, extractor: impl ResponseExtractor + 'static) -> Self {
        self.extractor = Some(Arc::new(extractor));
        self
    }

    /// Request path
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters
    #[must_use]
    pub const fn params(&self) -> &Params {
        &self.params
    }
}

impl fmt::Debug for RequestSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSpec")
            .field("path", &self.path)
            .field("params", &self.params)
            .field("format", &self.format)
            .field("accepts_client_id", &self.accepts_client_id)
            .field("host", &self.host)
            .field("body", &self.body)
            .field("extractor", &self.extractor.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_encoding() {
        let params = Params::new()
            .with("origins", "Sydney")
            .with("destinations", "New York")
            .with("key", "AIzaBuyMirfbsiR91cw_JAD89Cwoocho4tZi7g");
        assert_eq!(
            params.to_query_string(),
            "origins=Sydney&destinations=New+York&key=AIzaBuyMirfbsiR91cw_JAD89Cwoocho4tZi7g"
        );
    }

    #[test]
    fn test_reserved_characters_are_escaped() {
        let params = Params::new()
            .with("destination", "52.520645,13.409779")
            .with("avoid", "tolls|ferries");
        assert_eq!(
            params.to_query_string(),
            "destination=52.520645%2C13.409779&avoid=tolls%7Cferries"
        );
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut params = Params::new().with("a", "1").with("b", "2");
        params.set("a", "3");
        assert_eq!(params.len(), 2);
        assert_eq!(params.to_query_string(), "a=3&b=2");
    }

    #[test]
    fn test_multiple_values_repeat_the_key() {
        let params = Params::new().with("placeId", vec!["one", "two"]);
        assert_eq!(params.to_query_string(), "placeId=one&placeId=two");
    }

    #[test]
    fn test_numeric_values() {
        let mut params = Params::new();
        params.set("zoom", 12_u8).set("radius", 1500.0).set_opt("page", None::<u32>);
        assert_eq!(params.to_query_string(), "zoom=12&radius=1500");
    }
}
