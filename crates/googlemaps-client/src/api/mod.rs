//! API endpoint modules.

mod directions;
mod distance_matrix;
mod elevation;
mod geocoding;
mod geolocation;
mod places;
mod roads;
mod static_map;
mod street_view;
mod timezone;

pub use directions::{DirectionsApi, DirectionsRequestBuilder};
pub use distance_matrix::{DistanceMatrixApi, DistanceMatrixRequestBuilder};
pub use elevation::{ElevationApi, ElevationPath};
pub use geocoding::{GeocodeRequestBuilder, GeocodingApi, ReverseGeocodeRequestBuilder};
pub use geolocation::{GeolocationApi, GeolocationRequestBuilder};
pub use places::{
    AutocompleteRequestBuilder, PlaceDetailsRequestBuilder, PlacePhotoRequestBuilder,
    PlaceSearchRequestBuilder, PlacesApi, RankBy,
};
pub use roads::RoadsApi;
pub use static_map::{StaticMapApi, StaticMapRequestBuilder};
pub use street_view::{StreetViewApi, StreetViewRequestBuilder};
pub use timezone::{TimezoneApi, TimezoneRequestBuilder};

use chrono::{DateTime, TimeZone};
use googlemaps_core::convert::unix_time;
use googlemaps_core::{MapsError, Result};

/// Departure and arrival constraints shared by the routing services
#[derive(Debug, Clone, Default)]
pub(crate) struct TravelTimes {
    departure: Option<String>,
    arrival: Option<String>,
}

impl TravelTimes {
    pub(crate) fn depart_at<Tz: TimeZone>(&mut self, time: &DateTime<Tz>) {
        self.departure = Some(unix_time(time));
    }

    pub(crate) fn arrive_by<Tz: TimeZone>(&mut self, time: &DateTime<Tz>) {
        self.arrival = Some(unix_time(time));
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.departure.is_some() && self.arrival.is_some() {
            return Err(MapsError::InvalidRequest(
                "should not specify both departure_time and arrival_time".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn apply(&self, params: &mut crate::Params) {
        params.set_opt("departure_time", self.departure.as_deref());
        params.set_opt("arrival_time", self.arrival.as_deref());
    }
}
