//! Places API endpoints.

use crate::{GoogleMapsClient, Params, RequestSpec};
use googlemaps_core::convert::components;
use googlemaps_core::{LatLng, MapsError, Payload, Result};
use serde_json::Value;
use std::fmt;

const MAX_PRICE_LEVEL: u8 = 4;

/// Ordering of nearby search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankBy {
    /// By importance (default)
    #[default]
    Prominence,
    /// By distance from the search location
    Distance,
}

impl RankBy {
    /// The value as sent on the wire
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prominence => "prominence",
            Self::Distance => "distance",
        }
    }
}

impl fmt::Display for RankBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchKind {
    Text,
    Nearby,
    Radar,
}

impl SearchKind {
    const fn path(self) -> &'static str {
        match self {
            Self::Text => "/maps/api/place/textsearch/json",
            Self::Nearby => "/maps/api/place/nearbysearch/json",
            Self::Radar => "/maps/api/place/radarsearch/json",
        }
    }
}

/// Places API endpoints
pub struct PlacesApi<'a> {
    client: &'a GoogleMapsClient,
}

impl<'a> PlacesApi<'a> {
    pub(crate) fn new(client: &'a GoogleMapsClient) -> Self {
        Self { client }
    }

    /// Search places by free text, e.g. "restaurants in Sydney"
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let body = client
    ///     .places()
    ///     .text_search("pizza in New York")
    ///     .open_now(true)
    ///     .send()
    ///     .await?;
    /// ```
    #[must_use]
    pub fn text_search(&self, query: impl Into<String>) -> PlaceSearchRequestBuilder<'a> {
        let mut builder = PlaceSearchRequestBuilder::new(self.client, SearchKind::Text);
        builder.query = Some(query.into());
        builder
    }

    /// Search places around a location
    #[must_use]
    pub fn nearby(&self, location: impl Into<LatLng>) -> PlaceSearchRequestBuilder<'a> {
        let mut builder = PlaceSearchRequestBuilder::new(self.client, SearchKind::Nearby);
        builder.location = Some(location.into());
        builder
    }

    /// List up to 200 place IDs within a radius
    #[must_use]
    pub fn radar(&self, location: impl Into<LatLng>, radius: u32) -> PlaceSearchRequestBuilder<'a> {
        let mut builder = PlaceSearchRequestBuilder::new(self.client, SearchKind::Radar);
        builder.location = Some(location.into());
        builder.radius = Some(radius);
        builder
    }

    /// Full details of a place
    #[must_use]
    pub fn details(&self, place_id: impl Into<String>) -> PlaceDetailsRequestBuilder<'a> {
        PlaceDetailsRequestBuilder {
            client: self.client,
            place_id: place_id.into(),
            language: None,
        }
    }

    /// Fetch a place photo by its reference
    #[must_use]
    pub fn photo(&self, photo_reference: impl Into<String>) -> PlacePhotoRequestBuilder<'a> {
        PlacePhotoRequestBuilder {
            client: self.client,
            photo_reference: photo_reference.into(),
            max_width: None,
            max_height: None,
        }
    }

    /// Place predictions for a partially typed name or address
    #[must_use]
    pub fn autocomplete(&self, input: impl Into<String>) -> AutocompleteRequestBuilder<'a> {
        AutocompleteRequestBuilder::new(self.client, input.into(), false)
    }

    /// Query predictions for a partially typed search, e.g. "pizza near"
    #[must_use]
    pub fn query_autocomplete(&self, input: impl Into<String>) -> AutocompleteRequestBuilder<'a> {
        AutocompleteRequestBuilder::new(self.client, input.into(), true)
    }
}

/// Builder shared by the text, nearby and radar searches
pub struct PlaceSearchRequestBuilder<'a> {
    client: &'a GoogleMapsClient,
    kind: SearchKind,
    query: Option<String>,
    location: Option<LatLng>,
    radius: Option<u32>,
    keyword: Option<String>,
    language: Option<String>,
    min_price: Option<u8>,
    max_price: Option<u8>,
    name: Option<String>,
    open_now: bool,
    rank_by: Option<RankBy>,
    place_type: Option<String>,
    page_token: Option<String>,
}

impl<'a> PlaceSearchRequestBuilder<'a> {
    const fn new(client: &'a GoogleMapsClient, kind: SearchKind) -> Self {
        Self {
            client,
            kind,
            query: None,
            location: None,
            radius: None,
            keyword: None,
            language: None,
            min_price: None,
            max_price: None,
            name: None,
            open_now: false,
            rank_by: None,
            place_type: None,
            page_token: None,
        }
    }

    /// Bias results towards a location
    #[must_use]
    pub const fn location(mut self, location: LatLng) -> Self {
        self.location = Some(location);
        self
    }

    /// Search radius in meters
    #[must_use]
    pub const fn radius(mut self, radius: u32) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Term matched against all indexed content
    #[must_use]
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Lowest price level, 0 (free) to 4 (very expensive)
    #[must_use]
    pub const fn min_price(mut self, level: u8) -> Self {
        self.min_price = Some(level);
        self
    }

    /// Highest price level, 0 (free) to 4 (very expensive)
    #[must_use]
    pub const fn max_price(mut self, level: u8) -> Self {
        self.max_price = Some(level);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Only places open at the time of the query
    #[must_use]
    pub const fn open_now(mut self, open_now: bool) -> Self {
        self.open_now = open_now;
        self
    }

    /// Result ordering, nearby search only
    #[must_use]
    pub const fn rank_by(mut self, rank_by: RankBy) -> Self {
        self.rank_by = Some(rank_by);
        self
    }

    /// Restrict to a place type such as `restaurant`
    #[must_use]
    pub fn place_type(mut self, place_type: impl Into<String>) -> Self {
        self.place_type = Some(place_type.into());
        self
    }

    /// Continue a previous search from its `next_page_token`
    #[must_use]
    pub fn page_token(mut self, token: impl Into<String>) -> Self {
        self.page_token = Some(token.into());
        self
    }

    fn has_filter(&self) -> bool {
        self.keyword.is_some() || self.name.is_some() || self.place_type.is_some()
    }

    fn validate(&self) -> Result<()> {
        for level in [self.min_price, self.max_price].into_iter().flatten() {
            if level > MAX_PRICE_LEVEL {
                return Err(MapsError::InvalidRequest(format!(
                    "price level must be between 0 and {MAX_PRICE_LEVEL}, got {level}"
                )));
            }
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(MapsError::InvalidRequest(
                    "min_price must not exceed max_price".to_string(),
                ));
            }
        }

        if self.rank_by.is_some() && self.kind != SearchKind::Nearby {
            return Err(MapsError::InvalidRequest(
                "rank_by is only supported by nearby search".to_string(),
            ));
        }
        if self.rank_by == Some(RankBy::Distance) {
            if self.radius.is_some() {
                return Err(MapsError::InvalidRequest(
                    "radius cannot be used with rank_by distance".to_string(),
                ));
            }
            if !self.has_filter() {
                return Err(MapsError::InvalidRequest(
                    "rank_by distance requires a keyword, name or type".to_string(),
                ));
            }
        }
        if self.kind == SearchKind::Radar && !self.has_filter() {
            return Err(MapsError::InvalidRequest(
                "radar search requires a keyword, name or type".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn params(&self) -> Result<Params> {
        self.validate()?;

        let mut params = Params::new();
        params
            .set_opt("query", self.query.as_deref())
            .set_opt("location", self.location.map(|latlng| latlng.to_string()))
            .set_opt("radius", self.radius)
            .set_opt("keyword", self.keyword.as_deref())
            .set_opt("language", self.language.as_deref())
            .set_opt("minprice", self.min_price)
            .set_opt("maxprice", self.max_price)
            .set_opt("name", self.name.as_deref());
        if self.open_now {
            params.set("opennow", true);
        }
        params
            .set_opt("rankby", self.rank_by.map(RankBy::as_str))
            .set_opt("type", self.place_type.as_deref())
            .set_opt("pagetoken", self.page_token.as_deref());
        Ok(params)
    }

    /// Execute the search, returning the response body
    ///
    /// The body carries `results` and, when more pages exist,
    /// `next_page_token`.
    pub async fn send(self) -> Result<Value> {
        let params = self.params()?;
        self.client
            .execute(RequestSpec::get(self.kind.path(), params))
            .await?
            .into_json()
    }
}

/// Builder for place details
pub struct PlaceDetailsRequestBuilder<'a> {
    client: &'a GoogleMapsClient,
    place_id: String,
    language: Option<String>,
}

impl PlaceDetailsRequestBuilder<'_> {
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub(crate) fn params(&self) -> Params {
        let mut params = Params::new().with("placeid", self.place_id.as_str());
        params.set_opt("language", self.language.as_deref());
        params
    }

    /// Execute the request, returning the response body
    pub async fn send(self) -> Result<Value> {
        let params = self.params();
        self.client
            .execute(RequestSpec::get("/maps/api/place/details/json", params))
            .await?
            .into_json()
    }
}

/// Builder for place photos
pub struct PlacePhotoRequestBuilder<'a> {
    client: &'a GoogleMapsClient,
    photo_reference: String,
    max_width: Option<u32>,
    max_height: Option<u32>,
}

impl PlacePhotoRequestBuilder<'_> {
    /// Maximum width in pixels, 1 to 1600
    #[must_use]
    pub const fn max_width(mut self, width: u32) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Maximum height in pixels, 1 to 1600
    #[must_use]
    pub const fn max_height(mut self, height: u32) -> Self {
        self.max_height = Some(height);
        self
    }

    pub(crate) fn params(&self) -> Result<Params> {
        if self.max_width.is_none() && self.max_height.is_none() {
            return Err(MapsError::InvalidRequest(
                "a max_width or max_height is required".to_string(),
            ));
        }
        let mut params = Params::new().with("photoreference", self.photo_reference.as_str());
        params
            .set_opt("maxwidth", self.max_width)
            .set_opt("maxheight", self.max_height);
        Ok(params)
    }

    /// Execute the request
    ///
    /// The service normally answers with a redirect to the image, which is
    /// returned as [`Payload::Redirect`]; an image served directly comes back
    /// as [`Payload::Image`].
    pub async fn send(self) -> Result<Payload> {
        let params = self.params()?;
        self.client
            .execute(RequestSpec::get("/maps/api/place/photo", params))
            .await
    }
}

/// Builder for place and query autocompletion
pub struct AutocompleteRequestBuilder<'a> {
    client: &'a GoogleMapsClient,
    query_only: bool,
    input: String,
    offset: Option<u32>,
    location: Option<LatLng>,
    radius: Option<u32>,
    language: Option<String>,
    types: Option<String>,
    components: Vec<(String, String)>,
}

impl<'a> AutocompleteRequestBuilder<'a> {
    const fn new(client: &'a GoogleMapsClient, input: String, query_only: bool) -> Self {
        Self {
            client,
            query_only,
            input,
            offset: None,
            location: None,
            radius: None,
            language: None,
            types: None,
            components: Vec::new(),
        }
    }

    /// Character position in the input the service should complete at
    #[must_use]
    pub const fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    #[must_use]
    pub const fn location(mut self, location: LatLng) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub const fn radius(mut self, radius: u32) -> Self {
        self.radius = Some(radius);
        self
    }

    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Restrict predictions to a type collection such as `(cities)`
    #[must_use]
    pub fn types(mut self, types: impl Into<String>) -> Self {
        self.types = Some(types.into());
        self
    }

    /// Restrict predictions to a component, e.g. `("country", "fr")`
    #[must_use]
    pub fn component(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.components.push((name.into(), value.into()));
        self
    }

    const fn path(&self) -> &'static str {
        if self.query_only {
            "/maps/api/place/queryautocomplete/json"
        } else {
            "/maps/api/place/autocomplete/json"
        }
    }

    pub(crate) fn params(&self) -> Result<Params> {
        if self.query_only && (self.types.is_some() || !self.components.is_empty()) {
            return Err(MapsError::InvalidRequest(
                "query autocomplete does not support types or components".to_string(),
            ));
        }

        let mut params = Params::new().with("input", self.input.as_str());
        params
            .set_opt("offset", self.offset)
            .set_opt("location", self.location.map(|latlng| latlng.to_string()))
            .set_opt("radius", self.radius)
            .set_opt("language", self.language.as_deref())
            .set_opt("types", self.types.as_deref());
        if !self.components.is_empty() {
            params.set("components", components(&self.components));
        }
        Ok(params)
    }

    /// Execute the request, returning the `predictions` array
    pub async fn send(self) -> Result<Vec<Value>> {
        let params = self.params()?;
        self.client
            .execute(RequestSpec::get(self.path(), params))
            .await?
            .json_array("predictions")
    }
}
