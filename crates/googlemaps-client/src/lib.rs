//! HTTP client for the Google Maps web services.
//!
//! This crate provides the main [`GoogleMapsClient`] together with the request
//! execution engine behind it: URL signing, client-side rate limiting, retries
//! with jittered backoff and response decoding.
//!
//! Every service call is described by a [`RequestSpec`] and driven through
//! [`GoogleMapsClient::execute`], which is also available to callers for
//! endpoints this crate does not wrap.

#![doc(html_root_url = "https://docs.rs/googlemaps-client/2.0.0")]

pub mod api;
mod auth;
mod client;
mod config;
mod decode;
mod rate_limit;
mod request;
mod retry;
mod signer;

pub use auth::generate_auth_url;
pub use client::{GoogleMapsClient, GoogleMapsClientBuilder};
pub use config::*;
pub use decode::{
    decode_json, decode_response, decode_xml, google_apis_error_extractor, map_image,
    redirect_location, retriable_status, Classified, DecodeResult, RawResponse,
    ResponseExtractor, RetryReason, RETRIABLE_STATUSES,
};
pub use googlemaps_core::{MapsError, Result};
pub use rate_limit::RateLimiter;
pub use request::{Host, ParamValue, Params, RequestSpec};
pub use retry::{AttemptState, RetryPolicy};
pub use signer::sign_hmac;
