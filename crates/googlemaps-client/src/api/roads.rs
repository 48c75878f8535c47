//! Roads API endpoints.
//!
//! The roads service lives on its own host, accepts API keys only and
//! reports errors in the Google APIs envelope.

use crate::decode::google_apis_error_extractor;
use crate::{GoogleMapsClient, Host, Params, RequestSpec};
use googlemaps_core::convert::join_list;
use googlemaps_core::{LatLng, MapsError, Payload, Result};
use serde_json::Value;

/// Roads API endpoints
pub struct RoadsApi<'a> {
    client: &'a GoogleMapsClient,
}

impl<'a> RoadsApi<'a> {
    pub(crate) fn new(client: &'a GoogleMapsClient) -> Self {
        Self { client }
    }

    /// Snap a GPS trace to the most likely roads travelled
    ///
    /// With `interpolate` the result also contains points that smoothly
    /// follow the road geometry between the snapped ones.
    pub async fn snap_to_roads(&self, path: &[LatLng], interpolate: bool) -> Result<Vec<Value>> {
        let mut params = path_params("path", path)?;
        if interpolate {
            params.set("interpolate", true);
        }
        self.fetch("/v1/snapToRoads", params)
            .await?
            .json_array("snappedPoints")
    }

    /// The nearest road segment for each point
    pub async fn nearest_roads(&self, points: &[LatLng]) -> Result<Vec<Value>> {
        let params = path_params("points", points)?;
        self.fetch("/v1/nearestRoads", params)
            .await?
            .json_array("snappedPoints")
    }

    /// Posted speed limits for road segments given by place ID
    pub async fn speed_limits<S: AsRef<str>>(&self, place_ids: &[S]) -> Result<Vec<Value>> {
        let params = speed_limit_params(place_ids)?;
        self.fetch("/v1/speedLimits", params)
            .await?
            .json_array("speedLimits")
    }

    /// Snap a path and return the speed limits along it
    ///
    /// The whole body is returned since it carries both `snappedPoints` and
    /// `speedLimits`.
    pub async fn snapped_speed_limits(&self, path: &[LatLng]) -> Result<Value> {
        let params = path_params("path", path)?;
        self.fetch("/v1/speedLimits", params).await?.into_json()
    }

    async fn fetch(&self, path: &str, params: Params) -> Result<Payload> {
        let spec = RequestSpec::get(path, params)
            .host(Host::Roads)
            .api_key_only()
            .extractor(google_apis_error_extractor);
        self.client.execute(spec).await
    }
}

fn path_params(key: &str, points: &[LatLng]) -> Result<Params> {
    if points.is_empty() {
        return Err(MapsError::InvalidRequest(format!("{key} is empty")));
    }
    Ok(Params::new().with(key, join_list("|", points)))
}

fn speed_limit_params<S: AsRef<str>>(place_ids: &[S]) -> Result<Params> {
    if place_ids.is_empty() {
        return Err(MapsError::InvalidRequest(
            "at least one place ID is required".to_string(),
        ));
    }
    let ids: Vec<String> = place_ids.iter().map(|id| id.as_ref().to_string()).collect();
    Ok(Params::new().with("placeId", ids))
}
