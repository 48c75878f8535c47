use serde::{Deserialize, Serialize};
use std::fmt;

use crate::convert::format_float;

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
}

impl LatLng {
    /// Create a new coordinate
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", format_float(self.lat), format_float(self.lng))
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// A location given either as free text or as a coordinate
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    /// An address or place name, geocoded by the service
    Place(String),
    /// An exact coordinate
    Coordinate(LatLng),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Place(name) => f.write_str(name),
            Self::Coordinate(latlng) => latlng.fmt(f),
        }
    }
}

impl From<&str> for Location {
    fn from(place: &str) -> Self {
        Self::Place(place.to_string())
    }
}

impl From<String> for Location {
    fn from(place: String) -> Self {
        Self::Place(place)
    }
}

impl From<LatLng> for Location {
    fn from(latlng: LatLng) -> Self {
        Self::Coordinate(latlng)
    }
}

impl From<(f64, f64)> for Location {
    fn from(pair: (f64, f64)) -> Self {
        Self::Coordinate(pair.into())
    }
}

/// Pixel dimensions of a requested image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Size {
    /// Create a new size
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A square of the given side
    #[must_use]
    pub const fn square(side: u32) -> Self {
        Self::new(side, side)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A viewport given by its south-west and north-east corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// South-west corner
    pub southwest: LatLng,
    /// North-east corner
    pub northeast: LatLng,
}

impl Bounds {
    /// Create a viewport from its corners
    #[must_use]
    pub const fn new(southwest: LatLng, northeast: LatLng) -> Self {
        Self {
            southwest,
            northeast,
        }
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.southwest, self.northeast)
    }
}
