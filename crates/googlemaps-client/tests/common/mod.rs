//! Shared helpers for the mock-server tests.

#![allow(dead_code)]

use googlemaps_client::{GoogleMapsClient, GoogleMapsClientBuilder, RetryPolicy};
use std::time::Duration;
use wiremock::MockServer;

pub const TEST_KEY: &str = "AIzaasdf";

/// A builder whose every host points at the mock server, with short backoff
pub fn builder_for(server: &MockServer) -> GoogleMapsClientBuilder {
    GoogleMapsClient::builder()
        .key(TEST_KEY)
        .base_url(server.uri())
        .roads_base_url(server.uri())
        .googleapis_base_url(server.uri())
        .retry_policy(
            RetryPolicy::new()
                .retry_timeout(Duration::from_secs(5))
                .base_delay(Duration::from_millis(5)),
        )
}

pub fn client_for(server: &MockServer) -> GoogleMapsClient {
    builder_for(server).build().expect("failed to build client")
}
