//! Directions API endpoints.

use crate::api::TravelTimes;
use crate::{GoogleMapsClient, Params, RequestSpec};
use chrono::{DateTime, TimeZone};
use googlemaps_core::convert::{join_list, piped_locations};
use googlemaps_core::{
    Avoid, Location, Result, TrafficModel, TransitMode, TransitRoutingPreference, TravelMode,
    Units,
};
use serde_json::Value;

const DIRECTIONS_PATH: &str = "/maps/api/directions/json";

/// Directions API endpoints
pub struct DirectionsApi<'a> {
    client: &'a GoogleMapsClient,
}

impl<'a> DirectionsApi<'a> {
    pub(crate) fn new(client: &'a GoogleMapsClient) -> Self {
        Self { client }
    }

    /// Get routes between two locations
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let routes = client
    ///     .directions()
    ///     .query("Brussels", LatLng::new(52.520645, 13.409779))
    ///     .mode(TravelMode::Driving)
    ///     .send()
    ///     .await?;
    /// ```
    #[must_use]
    pub fn query(
        &self,
        origin: impl Into<Location>,
        destination: impl Into<Location>,
    ) -> DirectionsRequestBuilder<'a> {
        DirectionsRequestBuilder::new(self.client, origin.into(), destination.into())
    }
}

/// Builder for directions requests
pub struct DirectionsRequestBuilder<'a> {
    client: &'a GoogleMapsClient,
    origin: Location,
    destination: Location,
    mode: Option<TravelMode>,
    waypoints: Vec<Location>,
    optimize_waypoints: bool,
    alternatives: bool,
    avoid: Vec<Avoid>,
    language: Option<String>,
    units: Option<Units>,
    region: Option<String>,
    times: TravelTimes,
    transit_modes: Vec<TransitMode>,
    transit_routing_preference: Option<TransitRoutingPreference>,
    traffic_model: Option<TrafficModel>,
}

impl<'a> DirectionsRequestBuilder<'a> {
    fn new(client: &'a GoogleMapsClient, origin: Location, destination: Location) -> Self {
        Self {
            client,
            origin,
            destination,
            mode: None,
            waypoints: Vec::new(),
            optimize_waypoints: false,
            alternatives: false,
            avoid: Vec::new(),
            language: None,
            units: None,
            region: None,
            times: TravelTimes::default(),
            transit_modes: Vec::new(),
            transit_routing_preference: None,
            traffic_model: None,
        }
    }

    /// Mode of transport
    #[must_use]
    pub const fn mode(mut self, mode: TravelMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Route through an intermediate location
    #[must_use]
    pub fn waypoint(mut self, waypoint: impl Into<Location>) -> Self {
        self.waypoints.push(waypoint.into());
        self
    }

    /// Route through several intermediate locations
    #[must_use]
    pub fn waypoints<I, L>(mut self, waypoints: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Location>,
    {
        self.waypoints.extend(waypoints.into_iter().map(Into::into));
        self
    }

    /// Let the service reorder waypoints for the shortest route
    #[must_use]
    pub const fn optimize_waypoints(mut self, optimize: bool) -> Self {
        self.optimize_waypoints = optimize;
        self
    }

    /// Ask for alternative routes
    #[must_use]
    pub const fn alternatives(mut self, alternatives: bool) -> Self {
        self.alternatives = alternatives;
        self
    }

    /// Avoid a feature such as tolls
    #[must_use]
    pub fn avoid(mut self, avoid: Avoid) -> Self {
        self.avoid.push(avoid);
        self
    }

    /// Language of returned text
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Unit system of displayed distances
    #[must_use]
    pub const fn units(mut self, units: Units) -> Self {
        self.units = Some(units);
        self
    }

    /// Region bias, as a ccTLD code
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Desired departure time
    #[must_use]
    pub fn departure_time<Tz: TimeZone>(mut self, time: &DateTime<Tz>) -> Self {
        self.times.depart_at(time);
        self
    }

    /// Desired arrival time, transit only
    #[must_use]
    pub fn arrival_time<Tz: TimeZone>(mut self, time: &DateTime<Tz>) -> Self {
        self.times.arrive_by(time);
        self
    }

    /// Preferred transit vehicle
    #[must_use]
    pub fn transit_mode(mut self, mode: TransitMode) -> Self {
        self.transit_modes.push(mode);
        self
    }

    /// Transit route preference
    #[must_use]
    pub const fn transit_routing_preference(mut self, preference: TransitRoutingPreference) -> Self {
        self.transit_routing_preference = Some(preference);
        self
    }

    /// Traffic prediction model
    #[must_use]
    pub const fn traffic_model(mut self, model: TrafficModel) -> Self {
        self.traffic_model = Some(model);
        self
    }

    pub(crate) fn params(&self) -> Result<Params> {
        self.times.validate()?;

        let mut params = Params::new()
            .with("origin", self.origin.to_string())
            .with("destination", self.destination.to_string());

        params.set_opt("mode", self.mode.map(TravelMode::as_str));

        if !self.waypoints.is_empty() {
            let mut waypoints = piped_locations(&self.waypoints);
            if self.optimize_waypoints {
                waypoints.insert_str(0, "optimize:true|");
            }
            params.set("waypoints", waypoints);
        }

        if self.alternatives {
            params.set("alternatives", true);
        }
        if !self.avoid.is_empty() {
            params.set("avoid", join_list("|", &self.avoid));
        }

        params
            .set_opt("language", self.language.as_deref())
            .set_opt("units", self.units.map(Units::as_str))
            .set_opt("region", self.region.as_deref());
        self.times.apply(&mut params);

        if !self.transit_modes.is_empty() {
            params.set("transit_mode", join_list("|", &self.transit_modes));
        }
        params
            .set_opt(
                "transit_routing_preference",
                self.transit_routing_preference
                    .map(TransitRoutingPreference::as_str),
            )
            .set_opt("traffic_model", self.traffic_model.map(TrafficModel::as_str));

        Ok(params)
    }

    /// Execute the request, returning the `routes` array
    pub async fn send(self) -> Result<Vec<Value>> {
        let params = self.params()?;
        self.client
            .execute(RequestSpec::get(DIRECTIONS_PATH, params))
            .await?
            .json_array("routes")
    }
}
