//! Main Google Maps client and its request execution loop.

use crate::api::*;
use crate::auth::generate_auth_url;
use crate::config::{ClientConfig, ResponseFormat};
use crate::decode::{decode_response, Classified, RawResponse};
use crate::rate_limit::RateLimiter;
use crate::request::RequestSpec;
use crate::retry::{AttemptState, RetryPolicy};
use googlemaps_core::{MapsError, Payload, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::Client as HttpClient;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Main Google Maps web services client.
///
/// Cloning is cheap; clones share configuration, connection pool and rate limiter.
#[derive(Clone)]
pub struct GoogleMapsClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    config: ClientConfig,
    rate_limiter: RateLimiter,
    retry: RetryPolicy,
}

impl GoogleMapsClient {
    /// Create a client authenticating with an API key, using default settings
    pub fn new(key: impl Into<String>) -> Result<Self> {
        GoogleMapsClientBuilder::new().key(key).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> GoogleMapsClientBuilder {
        GoogleMapsClientBuilder::new()
    }

    /// The validated configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Format requested from services that offer a choice
    #[must_use]
    pub fn response_format(&self) -> ResponseFormat {
        self.inner.config.response_format()
    }

    /// Access the Directions API
    #[must_use]
    pub fn directions(&self) -> DirectionsApi<'_> {
        DirectionsApi::new(self)
    }

    /// Access the Distance Matrix API
    #[must_use]
    pub fn distance_matrix(&self) -> DistanceMatrixApi<'_> {
        DistanceMatrixApi::new(self)
    }

    /// Access the Elevation API
    #[must_use]
    pub fn elevation(&self) -> ElevationApi<'_> {
        ElevationApi::new(self)
    }

    /// Access the Geocoding API
    #[must_use]
    pub fn geocoding(&self) -> GeocodingApi<'_> {
        GeocodingApi::new(self)
    }

    /// Access the Geolocation API
    #[must_use]
    pub fn geolocation(&self) -> GeolocationApi<'_> {
        GeolocationApi::new(self)
    }

    /// Access the Places API
    #[must_use]
    pub fn places(&self) -> PlacesApi<'_> {
        PlacesApi::new(self)
    }

    /// Access the Roads API
    #[must_use]
    pub fn roads(&self) -> RoadsApi<'_> {
        RoadsApi::new(self)
    }

    /// Access the Static Maps API
    #[must_use]
    pub fn static_map(&self) -> StaticMapApi<'_> {
        StaticMapApi::new(self)
    }

    /// Access the Street View Image API
    #[must_use]
    pub fn street_view(&self) -> StreetViewApi<'_> {
        StreetViewApi::new(self)
    }

    /// Access the Time Zone API
    #[must_use]
    pub fn timezone(&self) -> TimezoneApi<'_> {
        TimezoneApi::new(self)
    }

    /// Perform a logical request: authenticate, rate limit, send, decode, and
    /// retry retriable outcomes until the retry deadline passes
    pub async fn execute(&self, spec: RequestSpec) -> Result<Payload> {
        let inner = &self.inner;
        let mut state = AttemptState::new();

        loop {
            inner.retry.check_deadline(&state)?;

            let authed = generate_auth_url(
                &spec.path,
                spec.params.clone(),
                spec.accepts_client_id,
                &inner.config,
            )?;
            let url = format!("{}{}", spec.host.base_url(&inner.config.hosts), authed);

            inner.rate_limiter.wait().await;
            debug!(path = %spec.path, attempt = state.attempt(), "dispatching request");

            let response = self.send(&spec, &url).await?;
            let outcome = match &spec.extractor {
                Some(extractor) => extractor.extract(&response),
                None => decode_response(&response, spec.format),
            };

            match outcome {
                Ok(payload) => {
                    inner.rate_limiter.record().await;
                    return Ok(payload);
                }
                Err(Classified::Failed(err)) => return Err(err),
                Err(Classified::Retryable(reason)) => {
                    if reason.is_quota() && !inner.config.retry_over_query_limit {
                        return Err(reason.into_error());
                    }
                    state.next_attempt();
                    let delay = inner.retry.jittered_delay(state.attempt());
                    warn!(
                        path = %spec.path,
                        attempt = state.attempt(),
                        %reason,
                        ?delay,
                        "retriable response, backing off"
                    );
                    state.add_delay(delay);
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// [`GoogleMapsClient::execute`], abandoned with [`MapsError::Cancelled`]
    /// as soon as `token` is cancelled
    pub async fn execute_with_cancel(
        &self,
        spec: RequestSpec,
        token: &CancellationToken,
    ) -> Result<Payload> {
        tokio::select! {
            biased;
            () = token.cancelled() => Err(MapsError::Cancelled),
            result = self.execute(spec) => result,
        }
    }

    /// Perform one HTTP round trip
    async fn send(&self, spec: &RequestSpec, url: &str) -> Result<RawResponse> {
        let request = match &spec.body {
            Some(body) => self.inner.http.post(url).json(body),
            None => self.inner.http.get(url),
        };

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                MapsError::Timeout
            } else {
                MapsError::Transport(e.to_string())
            }
        })?;

        RawResponse::read(response).await
    }
}

/// Builder for configuring a [`GoogleMapsClient`]
#[derive(Debug, Clone, Default)]
pub struct GoogleMapsClientBuilder {
    config: ClientConfig,
    retry: RetryPolicy,
}

impl GoogleMapsClientBuilder {
    /// Create a builder with default settings and no credentials
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Authenticate with an API key
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.config.key = Some(key.into());
        self
    }

    /// Enterprise client ID, used together with [`Self::client_secret`]
    #[must_use]
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.config.client_id = Some(client_id.into());
        self
    }

    /// URL-safe base64 enterprise signing secret
    #[must_use]
    pub fn client_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.client_secret = Some(secret.into());
        self
    }

    /// Tracking channel; requires a client ID
    #[must_use]
    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.config.channel = Some(channel.into());
        self
    }

    /// Combined timeout of each attempt; excludes connect and read timeouts
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeouts.total = Some(timeout);
        self
    }

    /// Connection timeout of each attempt
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeouts.connect = Some(timeout);
        self
    }

    /// Read timeout of each attempt
    #[must_use]
    pub const fn read_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeouts.read = Some(timeout);
        self
    }

    /// Deadline across all attempts of one request (default 60 seconds)
    #[must_use]
    pub fn retry_timeout(mut self, timeout: Duration) -> Self {
        self.config.retry_timeout = timeout;
        self.retry = self.retry.retry_timeout(timeout);
        self
    }

    /// Backoff tunables; the policy's timeout replaces the retry timeout
    #[must_use]
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.config.retry_timeout = policy.timeout();
        self.retry = policy;
        self
    }

    /// Maximum requests per rolling second (default 10)
    #[must_use]
    pub const fn queries_per_second(mut self, limit: usize) -> Self {
        self.config.queries_per_second = limit;
        self
    }

    /// Format requested from services that offer a choice (default JSON)
    #[must_use]
    pub const fn response_format(mut self, format: ResponseFormat) -> Self {
        self.config.response_format = format;
        self
    }

    /// Whether `OVER_QUERY_LIMIT` and `RESOURCE_EXHAUSTED` are retried
    /// (default) or surfaced as [`MapsError::OverQueryLimit`]
    #[must_use]
    pub const fn retry_over_query_limit(mut self, retry: bool) -> Self {
        self.config.retry_over_query_limit = retry;
        self
    }

    /// Add a header sent with every request
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.push((name.into(), value.into()));
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set the Maps host (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.hosts.maps = url.into();
        self
    }

    /// Set the Roads API host
    #[must_use]
    pub fn roads_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.hosts.roads = url.into();
        self
    }

    /// Set the Google APIs host
    #[must_use]
    pub fn googleapis_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.hosts.googleapis = url.into();
        self
    }

    /// Validate the configuration and build the client
    pub fn build(self) -> Result<GoogleMapsClient> {
        self.config.validate()?;

        let mut headers = HeaderMap::new();
        for (name, value) in &self.config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| MapsError::Config(format!("invalid header name {name:?}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| MapsError::Config(format!("invalid value for header {name}: {e}")))?;
            headers.append(name, value);
        }

        let mut http = HttpClient::builder()
            .user_agent(&self.config.user_agent)
            .default_headers(headers)
            .redirect(Policy::none())
            .gzip(true);

        let timeouts = self.config.timeouts;
        if let Some(timeout) = timeouts.total {
            http = http.timeout(timeout);
        }
        if let Some(timeout) = timeouts.connect {
            http = http.connect_timeout(timeout);
        }
        if let Some(timeout) = timeouts.read {
            http = http.read_timeout(timeout);
        }

        let http = http
            .build()
            .map_err(|e| MapsError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(GoogleMapsClient {
            inner: Arc::new(ClientInner {
                http,
                rate_limiter: RateLimiter::new(self.config.queries_per_second),
                retry: self.retry,
                config: self.config,
            }),
        })
    }
}
