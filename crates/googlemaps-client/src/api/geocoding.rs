//! Geocoding API endpoints.

use crate::{GoogleMapsClient, Params, RequestSpec};
use googlemaps_core::convert::{components, join_list};
use googlemaps_core::{Bounds, LatLng, MapsError, Records, Result};

/// Geocoding API endpoints
pub struct GeocodingApi<'a> {
    client: &'a GoogleMapsClient,
}

impl<'a> GeocodingApi<'a> {
    pub(crate) fn new(client: &'a GoogleMapsClient) -> Self {
        Self { client }
    }

    /// Convert an address into coordinates
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let results = client
    ///     .geocoding()
    ///     .geocode()
    ///     .address("1600 Amphitheatre Parkway, Mountain View, CA")
    ///     .send()
    ///     .await?;
    /// ```
    #[must_use]
    pub fn geocode(&self) -> GeocodeRequestBuilder<'a> {
        GeocodeRequestBuilder {
            client: self.client,
            address: None,
            components: Vec::new(),
            bounds: None,
            region: None,
            language: None,
        }
    }

    /// Convert a coordinate into addresses
    #[must_use]
    pub fn reverse(&self, latlng: impl Into<LatLng>) -> ReverseGeocodeRequestBuilder<'a> {
        ReverseGeocodeRequestBuilder::new(self.client, ReverseTarget::Coordinate(latlng.into()))
    }

    /// Look up the address of a place ID
    #[must_use]
    pub fn reverse_place(&self, place_id: impl Into<String>) -> ReverseGeocodeRequestBuilder<'a> {
        ReverseGeocodeRequestBuilder::new(self.client, ReverseTarget::PlaceId(place_id.into()))
    }
}

/// Builder for forward geocoding
pub struct GeocodeRequestBuilder<'a> {
    client: &'a GoogleMapsClient,
    address: Option<String>,
    components: Vec<(String, String)>,
    bounds: Option<Bounds>,
    region: Option<String>,
    language: Option<String>,
}

impl GeocodeRequestBuilder<'_> {
    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Restrict results to a component, e.g. `("country", "FR")`
    #[must_use]
    pub fn component(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.components.push((name.into(), value.into()));
        self
    }

    /// Viewport to prefer results in
    #[must_use]
    pub const fn bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub(crate) fn params(&self) -> Result<Params> {
        if self.address.is_none() && self.components.is_empty() {
            return Err(MapsError::InvalidRequest(
                "an address or component filter is required".to_string(),
            ));
        }

        let mut params = Params::new();
        params.set_opt("address", self.address.as_deref());
        if !self.components.is_empty() {
            params.set("components", components(&self.components));
        }
        params
            .set_opt("bounds", self.bounds.as_ref().map(ToString::to_string))
            .set_opt("region", self.region.as_deref())
            .set_opt("language", self.language.as_deref());
        Ok(params)
    }

    /// Execute the request, returning the result records
    pub async fn send(self) -> Result<Records> {
        let params = self.params()?;
        fetch(self.client, params).await
    }
}

#[derive(Debug, Clone)]
enum ReverseTarget {
    Coordinate(LatLng),
    PlaceId(String),
}

/// Builder for reverse geocoding
pub struct ReverseGeocodeRequestBuilder<'a> {
    client: &'a GoogleMapsClient,
    target: ReverseTarget,
    result_types: Vec<String>,
    location_types: Vec<String>,
    language: Option<String>,
}

impl<'a> ReverseGeocodeRequestBuilder<'a> {
    const fn new(client: &'a GoogleMapsClient, target: ReverseTarget) -> Self {
        Self {
            client,
            target,
            result_types: Vec::new(),
            location_types: Vec::new(),
            language: None,
        }
    }

    /// Keep only results of an address type such as `street_address`
    #[must_use]
    pub fn result_type(mut self, result_type: impl Into<String>) -> Self {
        self.result_types.push(result_type.into());
        self
    }

    /// Keep only results of a location type such as `ROOFTOP`
    #[must_use]
    pub fn location_type(mut self, location_type: impl Into<String>) -> Self {
        self.location_types.push(location_type.into());
        self
    }

    /// Language of the returned addresses
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub(crate) fn params(&self) -> Params {
        let mut params = match &self.target {
            ReverseTarget::Coordinate(latlng) => Params::new().with("latlng", latlng.to_string()),
            ReverseTarget::PlaceId(id) => Params::new().with("place_id", id.as_str()),
        };
        if !self.result_types.is_empty() {
            params.set("result_type", join_list("|", &self.result_types));
        }
        if !self.location_types.is_empty() {
            params.set("location_type", join_list("|", &self.location_types));
        }
        params.set_opt("language", self.language.as_deref());
        params
    }

    /// Execute the request, returning the result records
    pub async fn send(self) -> Result<Records> {
        let params = self.params();
        fetch(self.client, params).await
    }
}

async fn fetch(client: &GoogleMapsClient, params: Params) -> Result<Records> {
    let format = client.response_format();
    let spec = RequestSpec::get(format!("/maps/api/geocode/{format}"), params).format(format);
    client.execute(spec).await?.into_records("results", "result")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GoogleMapsClient {
        GoogleMapsClient::new("AIzadGhpcyBpcyBhIGtleQ==").unwrap()
    }

    #[test]
    fn test_geocode_params() {
        let client = client();
        let params = client
            .geocoding()
            .geocode()
            .address("Sydney")
            .component("postal_code", "2000")
            .component("country", "AU")
            .region("au")
            .params()
            .unwrap();
        assert_eq!(
            params.to_query_string(),
            "address=Sydney&components=country%3AAU%7Cpostal_code%3A2000&region=au"
        );
    }

    #[test]
    fn test_geocode_requires_address_or_components() {
        let client = client();
        let err = client.geocoding().geocode().language("fr").params().unwrap_err();
        assert!(matches!(err, MapsError::InvalidRequest(_)));
    }

    #[test]
    fn test_reverse_params() {
        let client = client();
        let params = client
            .geocoding()
            .reverse(LatLng::new(-33.8674869, 151.2069902))
            .result_type("street_address")
            .result_type("route")
            .location_type("ROOFTOP")
            .params();
        assert_eq!(
            params.to_query_string(),
            "latlng=-33.8674869%2C151.2069902&result_type=street_address%7Croute&location_type=ROOFTOP"
        );
    }

    #[test]
    fn test_reverse_place_id() {
        let client = client();
        let params = client
            .geocoding()
            .reverse_place("ChIJ3S-JXmauEmsRUcIaWtf4MzE")
            .params();
        assert_eq!(params.to_query_string(), "place_id=ChIJ3S-JXmauEmsRUcIaWtf4MzE");
    }
}
