//! Geolocation API endpoint.

use crate::decode::google_apis_error_extractor;
use crate::{GoogleMapsClient, Host, Params, RequestSpec};
use googlemaps_core::{
    CellTower, Geolocation, GeolocationRequest, RadioType, Result, WifiAccessPoint,
};

const GEOLOCATE_PATH: &str = "/geolocation/v1/geolocate";

/// Geolocation API endpoint
pub struct GeolocationApi<'a> {
    client: &'a GoogleMapsClient,
}

impl<'a> GeolocationApi<'a> {
    pub(crate) fn new(client: &'a GoogleMapsClient) -> Self {
        Self { client }
    }

    /// Locate a device from the cell towers and WiFi networks it can see
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let position = client
    ///     .geolocation()
    ///     .geolocate()
    ///     .wifi_access_point(WifiAccessPoint {
    ///         mac_address: "00:25:9c:cf:1c:ac".into(),
    ///         ..Default::default()
    ///     })
    ///     .send()
    ///     .await?;
    /// ```
    #[must_use]
    pub fn geolocate(&self) -> GeolocationRequestBuilder<'a> {
        GeolocationRequestBuilder {
            client: self.client,
            request: GeolocationRequest::default(),
        }
    }
}

/// Builder for geolocation requests
pub struct GeolocationRequestBuilder<'a> {
    client: &'a GoogleMapsClient,
    request: GeolocationRequest,
}

impl GeolocationRequestBuilder<'_> {
    #[must_use]
    pub const fn home_mobile_country_code(mut self, code: u16) -> Self {
        self.request.home_mobile_country_code = Some(code);
        self
    }

    #[must_use]
    pub const fn home_mobile_network_code(mut self, code: u16) -> Self {
        self.request.home_mobile_network_code = Some(code);
        self
    }

    #[must_use]
    pub const fn radio_type(mut self, radio_type: RadioType) -> Self {
        self.request.radio_type = Some(radio_type);
        self
    }

    #[must_use]
    pub fn carrier(mut self, carrier: impl Into<String>) -> Self {
        self.request.carrier = Some(carrier.into());
        self
    }

    /// Whether to fall back to IP geolocation; the service defaults to true
    #[must_use]
    pub const fn consider_ip(mut self, consider_ip: bool) -> Self {
        self.request.consider_ip = Some(consider_ip);
        self
    }

    #[must_use]
    pub fn cell_tower(mut self, tower: CellTower) -> Self {
        self.request.cell_towers.push(tower);
        self
    }

    #[must_use]
    pub fn wifi_access_point(mut self, access_point: WifiAccessPoint) -> Self {
        self.request.wifi_access_points.push(access_point);
        self
    }

    pub(crate) fn spec(&self) -> Result<RequestSpec> {
        let body = serde_json::to_value(&self.request)?;
        Ok(RequestSpec::post_json(GEOLOCATE_PATH, Params::new(), body)
            .host(Host::GoogleApis)
            .extractor(google_apis_error_extractor))
    }

    /// Execute the request
    pub async fn send(self) -> Result<Geolocation> {
        let spec = self.spec()?;
        self.client.execute(spec).await?.deserialize()
    }
}
