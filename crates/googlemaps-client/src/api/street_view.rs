//! Street View Static API endpoint.

use crate::{GoogleMapsClient, Params, RequestSpec};
use googlemaps_core::convert::format_float;
use googlemaps_core::{ImageData, Location, MapsError, Result, Size};
use std::ops::RangeInclusive;

const STREET_VIEW_PATH: &str = "/maps/api/streetview";

const HEADING_RANGE: RangeInclusive<f64> = 0.0..=360.0;
const FOV_RANGE: RangeInclusive<f64> = 0.0..=120.0;
const PITCH_RANGE: RangeInclusive<f64> = -90.0..=90.0;

/// Street View Static API endpoint
pub struct StreetViewApi<'a> {
    client: &'a GoogleMapsClient,
}

impl<'a> StreetViewApi<'a> {
    pub(crate) fn new(client: &'a GoogleMapsClient) -> Self {
        Self { client }
    }

    /// Render a panorama image of the given size
    ///
    /// The panorama is chosen by either [`location`] or [`pano`], not both.
    ///
    /// [`location`]: StreetViewRequestBuilder::location
    /// [`pano`]: StreetViewRequestBuilder::pano
    #[must_use]
    pub fn render(&self, size: Size) -> StreetViewRequestBuilder<'a> {
        StreetViewRequestBuilder {
            client: self.client,
            size,
            location: None,
            pano: None,
            heading: None,
            fov: None,
            pitch: None,
        }
    }
}

/// Builder for street view requests
pub struct StreetViewRequestBuilder<'a> {
    client: &'a GoogleMapsClient,
    size: Size,
    location: Option<Location>,
    pano: Option<String>,
    heading: Option<f64>,
    fov: Option<f64>,
    pitch: Option<f64>,
}

impl StreetViewRequestBuilder<'_> {
    /// Panorama nearest to an address or coordinate
    #[must_use]
    pub fn location(mut self, location: impl Into<Location>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// A specific panorama ID
    #[must_use]
    pub fn pano(mut self, pano: impl Into<String>) -> Self {
        self.pano = Some(pano.into());
        self
    }

    /// Compass heading of the camera, 0 to 360 degrees
    #[must_use]
    pub const fn heading(mut self, heading: f64) -> Self {
        self.heading = Some(heading);
        self
    }

    /// Horizontal field of view, 0 to 120 degrees
    #[must_use]
    pub const fn fov(mut self, fov: f64) -> Self {
        self.fov = Some(fov);
        self
    }

    /// Camera pitch, -90 to 90 degrees
    #[must_use]
    pub const fn pitch(mut self, pitch: f64) -> Self {
        self.pitch = Some(pitch);
        self
    }

    pub(crate) fn params(&self) -> Result<Params> {
        let mut params = Params::new().with("size", self.size.to_string());

        match (&self.location, &self.pano) {
            (Some(_), Some(_)) => {
                return Err(MapsError::InvalidRequest(
                    "should not specify both location and pano".to_string(),
                ));
            }
            (None, None) => {
                return Err(MapsError::InvalidRequest(
                    "a location or pano is required".to_string(),
                ));
            }
            (Some(location), None) => {
                params.set("location", location.to_string());
            }
            (None, Some(pano)) => {
                params.set("pano", pano.as_str());
            }
        }

        for (name, value, range) in [
            ("heading", self.heading, HEADING_RANGE),
            ("fov", self.fov, FOV_RANGE),
            ("pitch", self.pitch, PITCH_RANGE),
        ] {
            let Some(value) = value else { continue };
            if !range.contains(&value) {
                return Err(MapsError::InvalidRequest(format!(
                    "{name} must be between {} and {}, got {value}",
                    range.start(),
                    range.end()
                )));
            }
            params.set(name, format_float(value));
        }

        Ok(params)
    }

    /// Execute the request, returning the image
    pub async fn send(self) -> Result<ImageData> {
        let params = self.params()?;
        self.client
            .execute(RequestSpec::get(STREET_VIEW_PATH, params))
            .await?
            .into_image()
    }
}
