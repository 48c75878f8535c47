//! Distance Matrix API endpoints.

use crate::api::TravelTimes;
use crate::{GoogleMapsClient, Params, RequestSpec};
use chrono::{DateTime, TimeZone};
use googlemaps_core::convert::{join_list, piped_locations};
use googlemaps_core::{
    Avoid, Location, MapsError, Payload, Result, TrafficModel, TransitMode,
    TransitRoutingPreference, TravelMode, Units,
};

/// Distance Matrix API endpoints
pub struct DistanceMatrixApi<'a> {
    client: &'a GoogleMapsClient,
}

impl<'a> DistanceMatrixApi<'a> {
    pub(crate) fn new(client: &'a GoogleMapsClient) -> Self {
        Self { client }
    }

    /// Travel distance and time for every origin/destination pair
    #[must_use]
    pub fn query<O, D, L, M>(&self, origins: O, destinations: D) -> DistanceMatrixRequestBuilder<'a>
    where
        O: IntoIterator<Item = L>,
        D: IntoIterator<Item = M>,
        L: Into<Location>,
        M: Into<Location>,
    {
        DistanceMatrixRequestBuilder {
            client: self.client,
            origins: origins.into_iter().map(Into::into).collect(),
            destinations: destinations.into_iter().map(Into::into).collect(),
            mode: None,
            avoid: None,
            language: None,
            units: None,
            times: TravelTimes::default(),
            transit_modes: Vec::new(),
            transit_routing_preference: None,
            traffic_model: None,
        }
    }
}

/// Builder for distance matrix requests
pub struct DistanceMatrixRequestBuilder<'a> {
    client: &'a GoogleMapsClient,
    origins: Vec<Location>,
    destinations: Vec<Location>,
    mode: Option<TravelMode>,
    avoid: Option<Avoid>,
    language: Option<String>,
    units: Option<Units>,
    times: TravelTimes,
    transit_modes: Vec<TransitMode>,
    transit_routing_preference: Option<TransitRoutingPreference>,
    traffic_model: Option<TrafficModel>,
}

impl DistanceMatrixRequestBuilder<'_> {
    #[must_use]
    pub const fn mode(mut self, mode: TravelMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Feature to avoid; indoor steps are not supported here
    #[must_use]
    pub const fn avoid(mut self, avoid: Avoid) -> Self {
        self.avoid = Some(avoid);
        self
    }

    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    #[must_use]
    pub const fn units(mut self, units: Units) -> Self {
        self.units = Some(units);
        self
    }

    #[must_use]
    pub fn departure_time<Tz: TimeZone>(mut self, time: &DateTime<Tz>) -> Self {
        self.times.depart_at(time);
        self
    }

    #[must_use]
    pub fn arrival_time<Tz: TimeZone>(mut self, time: &DateTime<Tz>) -> Self {
        self.times.arrive_by(time);
        self
    }

    #[must_use]
    pub fn transit_mode(mut self, mode: TransitMode) -> Self {
        self.transit_modes.push(mode);
        self
    }

    #[must_use]
    pub const fn transit_routing_preference(mut self, preference: TransitRoutingPreference) -> Self {
        self.transit_routing_preference = Some(preference);
        self
    }

    #[must_use]
    pub const fn traffic_model(mut self, model: TrafficModel) -> Self {
        self.traffic_model = Some(model);
        self
    }

    pub(crate) fn params(&self) -> Result<Params> {
        if self.origins.is_empty() || self.destinations.is_empty() {
            return Err(MapsError::InvalidRequest(
                "at least one origin and one destination are required".to_string(),
            ));
        }
        if self.avoid == Some(Avoid::Indoor) {
            return Err(MapsError::InvalidRequest(
                "invalid avoid value: indoor".to_string(),
            ));
        }
        self.times.validate()?;

        let mut params = Params::new()
            .with("origins", piped_locations(&self.origins))
            .with("destinations", piped_locations(&self.destinations));

        params
            .set_opt("mode", self.mode.map(TravelMode::as_str))
            .set_opt("avoid", self.avoid.map(Avoid::as_str))
            .set_opt("language", self.language.as_deref())
            .set_opt("units", self.units.map(Units::as_str));
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

    /// Execute the request
    ///
    /// The body comes back in the client's configured response format.
    pub async fn send(self) -> Result<Payload> {
        let params = self.params()?;
        let format = self.client.response_format();
        let spec = RequestSpec::get(format!("/maps/api/distancematrix/{format}"), params)
            .format(format);
        self.client.execute(spec).await
    }
}
