//! Rust client for the Google Maps web services.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use googlemaps::{GoogleMapsClient, LatLng, TravelMode};
//!
//! #[tokio::main]
//! async fn main() -> googlemaps::Result<()> {
//!     let client = GoogleMapsClient::new("AIza...")?;
//!
//!     // Geocode an address
//!     let results = client
//!         .geocoding()
//!         .geocode()
//!         .address("1600 Amphitheatre Parkway, Mountain View, CA")
//!         .send()
//!         .await?;
//!     println!("{} results", results.len());
//!
//!     // Route between two places
//!     let routes = client
//!         .directions()
//!         .query("Brussels", LatLng::new(52.520645, 13.409779))
//!         .mode(TravelMode::Driving)
//!         .send()
//!         .await?;
//!     println!("{} routes", routes.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Enterprise credentials
//!
//! ```rust,ignore
//! let client = GoogleMapsClient::builder()
//!     .client_id("gme-example")
//!     .client_secret("base64-url-safe-secret")
//!     .channel("reporting")
//!     .build()?;
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/googlemaps/2.0.0")]

// Re-export core types
pub use googlemaps_core::*;

// Re-export client
pub use googlemaps_client::api;
pub use googlemaps_client::{
    GoogleMapsClient, GoogleMapsClientBuilder, Host, Params, RequestSpec, ResponseFormat,
    RetryPolicy,
};

// Re-export runtime for convenience
pub use serde;
pub use serde_json;
pub use tokio;
pub use tokio_util::sync::CancellationToken;
