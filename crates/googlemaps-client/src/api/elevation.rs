//! Elevation API endpoints.

use crate::{GoogleMapsClient, Params, RequestSpec};
use googlemaps_core::convert::shortest_path;
use googlemaps_core::{LatLng, MapsError, Result};
use serde_json::Value;

const ELEVATION_PATH: &str = "/maps/api/elevation/json";

/// A path to sample elevation along
#[derive(Debug, Clone, PartialEq)]
pub enum ElevationPath {
    /// An already encoded polyline, sent as `enc:<polyline>`
    Encoded(String),
    /// Points, sent in whichever encoding is shorter
    Points(Vec<LatLng>),
}

impl From<Vec<LatLng>> for ElevationPath {
    fn from(points: Vec<LatLng>) -> Self {
        Self::Points(points)
    }
}

impl From<&[LatLng]> for ElevationPath {
    fn from(points: &[LatLng]) -> Self {
        Self::Points(points.to_vec())
    }
}

/// Elevation API endpoints
pub struct ElevationApi<'a> {
    client: &'a GoogleMapsClient,
}

impl<'a> ElevationApi<'a> {
    pub(crate) fn new(client: &'a GoogleMapsClient) -> Self {
        Self { client }
    }

    /// Elevation at each of the given points
    pub async fn locations(&self, points: &[LatLng]) -> Result<Vec<Value>> {
        let params = locations_params(points)?;
        self.fetch(params).await
    }

    /// Elevation at `samples` evenly spaced points along a path
    pub async fn along_path(
        &self,
        path: impl Into<ElevationPath>,
        samples: u32,
    ) -> Result<Vec<Value>> {
        let params = path_params(&path.into(), samples)?;
        self.fetch(params).await
    }

    async fn fetch(&self, params: Params) -> Result<Vec<Value>> {
        self.client
            .execute(RequestSpec::get(ELEVATION_PATH, params))
            .await?
            .json_array("results")
    }
}

fn locations_params(points: &[LatLng]) -> Result<Params> {
    if points.is_empty() {
        return Err(MapsError::InvalidRequest(
            "at least one location is required".to_string(),
        ));
    }
    Ok(Params::new().with("locations", shortest_path(points)))
}

fn path_params(path: &ElevationPath, samples: u32) -> Result<Params> {
    if samples == 0 {
        return Err(MapsError::InvalidRequest(
            "samples must be at least 1".to_string(),
        ));
    }
    let path = match path {
        ElevationPath::Encoded(polyline) => format!("enc:{polyline}"),
        ElevationPath::Points(points) if points.is_empty() => {
            return Err(MapsError::InvalidRequest("path is empty".to_string()));
        }
        ElevationPath::Points(points) => shortest_path(points),
    };
    Ok(Params::new().with("path", path).with("samples", samples))
}
