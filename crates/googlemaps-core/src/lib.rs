//! Core types and helpers for the Google Maps web services client.
//!
//! This crate provides the foundational pieces shared across the library:
//!
//! - **Types**: coordinates, locations, travel and imagery options, and the
//!   decoded [`Payload`] returned by every request
//! - **Errors**: the [`MapsError`] taxonomy surfaced to callers
//! - **Helpers**: parameter formatting in [`convert`] and the encoded
//!   polyline codec in [`polyline`]
//!
//! # Example
//!
//! ```rust,ignore
//! use googlemaps_core::{LatLng, Location, polyline};
//!
//! let berlin = Location::from(LatLng::new(52.520645, 13.409779));
//! assert_eq!(berlin.to_string(), "52.520645,13.409779");
//!
//! let encoded = polyline::encode(&[LatLng::new(38.5, -120.2)]);
//! ```

#![doc(html_root_url = "https://docs.rs/googlemaps-core/2.0.0")]

pub mod convert;
mod error;
pub mod polyline;
pub mod types;

pub use error::{MapsError, Result};
pub use types::*;
