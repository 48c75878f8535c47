//! Time Zone API endpoint.

use crate::{GoogleMapsClient, Params, RequestSpec};
use chrono::{DateTime, TimeZone, Utc};
use googlemaps_core::convert::unix_time;
use googlemaps_core::{LatLng, Result};
use serde_json::Value;

const TIMEZONE_PATH: &str = "/maps/api/timezone/json";

/// Time Zone API endpoint
pub struct TimezoneApi<'a> {
    client: &'a GoogleMapsClient,
}

impl<'a> TimezoneApi<'a> {
    pub(crate) fn new(client: &'a GoogleMapsClient) -> Self {
        Self { client }
    }

    /// Time zone and offsets at a location
    #[must_use]
    pub fn query(&self, location: impl Into<LatLng>) -> TimezoneRequestBuilder<'a> {
        TimezoneRequestBuilder {
            client: self.client,
            location: location.into(),
            timestamp: None,
            language: None,
        }
    }
}

/// Builder for time zone requests
pub struct TimezoneRequestBuilder<'a> {
    client: &'a GoogleMapsClient,
    location: LatLng,
    timestamp: Option<String>,
    language: Option<String>,
}

impl TimezoneRequestBuilder<'_> {
    /// Instant to evaluate daylight saving at; defaults to now
    #[must_use]
    pub fn timestamp<Tz: TimeZone>(mut self, time: &DateTime<Tz>) -> Self {
        self.timestamp = Some(unix_time(time));
        self
    }

    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub(crate) fn params(&self) -> Params {
        let timestamp = self
            .timestamp
            .clone()
            .unwrap_or_else(|| unix_time(&Utc::now()));
        let mut params = Params::new()
            .with("location", self.location.to_string())
            .with("timestamp", timestamp);
        params.set_opt("language", self.language.as_deref());
        params
    }

    /// Execute the request, returning the response body
    pub async fn send(self) -> Result<Value> {
        let params = self.params();
        self.client
            .execute(RequestSpec::get(TIMEZONE_PATH, params))
            .await?
            .into_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParamValue;

    fn client() -> GoogleMapsClient {
        GoogleMapsClient::new("AIzadGhpcyBpcyBhIGtleQ==").unwrap()
    }

    #[test]
    fn test_explicit_timestamp() {
        let client = client();
        let time = Utc.timestamp_opt(1_331_161_200, 0).unwrap();
        let params = client
            .timezone()
            .query(LatLng::new(39.603481, -119.682251))
            .timestamp(&time)
            .language("es")
            .params();
        assert_eq!(
            params.to_query_string(),
            "location=39.603481%2C-119.682251&timestamp=1331161200&language=es"
        );
    }

    #[test]
    fn test_timestamp_defaults_to_now() {
        let client = client();
        let before = Utc::now().timestamp();
        let params = client.timezone().query((1.0, 2.0)).params();
        let Some(ParamValue::Single(stamp)) = params.get("timestamp") else {
            panic!("timestamp missing");
        };
        let stamp: i64 = stamp.parse().unwrap();
        assert!(stamp >= before && stamp <= Utc::now().timestamp());
    }
}
