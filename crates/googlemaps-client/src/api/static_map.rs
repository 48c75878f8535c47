//! Static Maps API endpoint.

use crate::{GoogleMapsClient, Params, RequestSpec};
use googlemaps_core::convert::piped_locations;
use googlemaps_core::{
    ImageData, ImageFormat, Location, MapType, MapsError, Result, Scale, Size,
};

const STATIC_MAP_PATH: &str = "/maps/api/staticmap";

/// Static Maps API endpoint
pub struct StaticMapApi<'a> {
    client: &'a GoogleMapsClient,
}

impl<'a> StaticMapApi<'a> {
    pub(crate) fn new(client: &'a GoogleMapsClient) -> Self {
        Self { client }
    }

    /// Render a map image of the given size
    ///
    /// A map needs either markers or both a center and a zoom level.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let image = client
    ///     .static_map()
    ///     .render(Size::new(400, 400))
    ///     .center("Brooklyn Bridge, New York, NY")
    ///     .zoom(13)
    ///     .send()
    ///     .await?;
    /// ```
    #[must_use]
    pub fn render(&self, size: Size) -> StaticMapRequestBuilder<'a> {
        StaticMapRequestBuilder {
            client: self.client,
            size,
            center: None,
            zoom: None,
            scale: Scale::default(),
            format: ImageFormat::default(),
            map_type: MapType::default(),
            language: None,
            region: None,
            markers: Vec::new(),
            paths: Vec::new(),
            visible: Vec::new(),
            styles: Vec::new(),
        }
    }
}

/// Builder for static map requests
pub struct StaticMapRequestBuilder<'a> {
    client: &'a GoogleMapsClient,
    size: Size,
    center: Option<Location>,
    zoom: Option<u8>,
    scale: Scale,
    format: ImageFormat,
    map_type: MapType,
    language: Option<String>,
    region: Option<String>,
    markers: Vec<String>,
    paths: Vec<String>,
    visible: Vec<Location>,
    styles: Vec<String>,
}

impl StaticMapRequestBuilder<'_> {
    #[must_use]
    pub fn center(mut self, center: impl Into<Location>) -> Self {
        self.center = Some(center.into());
        self
    }

    #[must_use]
    pub const fn zoom(mut self, zoom: u8) -> Self {
        self.zoom = Some(zoom);
        self
    }

    #[must_use]
    pub const fn scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub const fn format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub const fn map_type(mut self, map_type: MapType) -> Self {
        self.map_type = map_type;
        self
    }

    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Add a marker group, e.g. `color:blue|label:S|40.702147,-74.015794`
    #[must_use]
    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.markers.push(marker.into());
        self
    }

    /// Add a path, e.g. `color:0x0000ff|weight:5|40.737102,-73.990318|...`
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Keep a location visible in the viewport
    #[must_use]
    pub fn visible(mut self, location: impl Into<Location>) -> Self {
        self.visible.push(location.into());
        self
    }

    /// Add a map style, e.g. `feature:road|color:0xff0000`
    #[must_use]
    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.styles.push(style.into());
        self
    }

    pub(crate) fn params(&self) -> Result<Params> {
        let mut params = Params::new().with("size", self.size.to_string());

        if self.markers.is_empty() {
            let (Some(center), Some(zoom)) = (&self.center, self.zoom) else {
                return Err(MapsError::InvalidRequest(
                    "center and zoom are required when there are no markers".to_string(),
                ));
            };
            params.set("center", center.to_string()).set("zoom", zoom);
        } else {
            params.set("markers", self.markers.clone());
            params
                .set_opt("center", self.center.as_ref().map(ToString::to_string))
                .set_opt("zoom", self.zoom);
        }

        if self.scale != Scale::default() {
            params.set("scale", self.scale.as_str());
        }
        if self.format != ImageFormat::default() {
            params.set("format", self.format.as_str());
        }
        if self.map_type != MapType::default() {
            params.set("maptype", self.map_type.as_str());
        }
        params
            .set_opt("language", self.language.as_deref())
            .set_opt("region", self.region.as_deref());
        if !self.paths.is_empty() {
            params.set("path", self.paths.clone());
        }
        if !self.visible.is_empty() {
            params.set("visible", piped_locations(&self.visible));
        }
        if !self.styles.is_empty() {
            params.set("style", self.styles.clone());
        }
        Ok(params)
    }

    /// Execute the request, returning the image
    pub async fn send(self) -> Result<ImageData> {
        let params = self.params()?;
        self.client
            .execute(RequestSpec::get(STATIC_MAP_PATH, params))
            .await?
            .into_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GoogleMapsClient {
        GoogleMapsClient::new("AIzadGhpcyBpcyBhIGtleQ==").unwrap()
    }

    #[test]
    fn test_center_and_zoom_without_markers() {
        let client = client();
        let params = client
            .static_map()
            .render(Size::new(400, 300))
            .center("Brooklyn Bridge,New York,NY")
            .zoom(13)
            .params()
            .unwrap();
        assert_eq!(
            params.to_query_string(),
            "size=400x300&center=Brooklyn+Bridge%2CNew+York%2CNY&zoom=13"
        );
    }

    #[test]
    fn test_missing_center_or_zoom_is_rejected() {
        let client = client();
        let err = client
            .static_map()
            .render(Size::square(100))
            .center("Paris")
            .params()
            .unwrap_err();
        assert!(matches!(err, MapsError::InvalidRequest(_)));
    }

    #[test]
    fn test_markers_and_non_default_options() {
        let client = client();
        let params = client
            .static_map()
            .render(Size::square(100))
            .marker("color:blue|label:S|1,2")
            .marker("color:red|3,4")
            .scale(Scale::Two)
            .format(ImageFormat::Png)
            .map_type(MapType::Hybrid)
            .params()
            .unwrap();
        assert_eq!(
            params.to_query_string(),
            "size=100x100&markers=color%3Ablue%7Clabel%3AS%7C1%2C2\
             &markers=color%3Ared%7C3%2C4&scale=2&maptype=hybrid"
        );
    }
}
