//! Request engine behavior against a mock server: signing, retries,
//! deadlines, quota handling and cancellation.

mod common;

use common::{builder_for, client_for, TEST_KEY};
use googlemaps_client::{MapsError, Params, RequestSpec, RetryPolicy};
use googlemaps_core::Payload;
use serde_json::json;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ok_body() -> serde_json::Value {
    json!({"status": "OK", "results": []})
}

#[tokio::test]
async fn test_key_and_user_agent_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .and(query_param("address", "Sydney"))
        .and(query_param("key", TEST_KEY))
        .and(header(
            "user-agent",
            format!("GoogleMapsRustClient/{}", env!("CARGO_PKG_VERSION")).as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let records = assert_ok!(client.geocoding().geocode().address("Sydney").send().await);
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_extra_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(path("/maps/api/timezone/json"))
        .and(header("x-trace", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = builder_for(&server).header("X-Trace", "abc").build().unwrap();
    assert_ok!(client.timezone().query((1.0, 2.0)).send().await);
}

#[tokio::test]
async fn test_enterprise_requests_are_signed() {
    let server = MockServer::start().await;
    Mock::given(path("/maps/api/geocode/json"))
        .and(query_param("address", "Mountain View"))
        .and(query_param("channel", "CH"))
        .and(query_param("client", "ID"))
        .and(query_param("signature", "6x4VC7LX9u26yXHcxE9DUjRzmMo="))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = googlemaps_client::GoogleMapsClient::builder()
        .client_id("ID")
        .client_secret("U0VDUkVU")
        .channel("CH")
        .base_url(server.uri())
        .build()
        .unwrap();

    assert_ok!(
        client
            .geocoding()
            .geocode()
            .address("Mountain View")
            .send()
            .await
    );
}

#[tokio::test]
async fn test_server_errors_are_retried() {
    let server = MockServer::start().await;
    Mock::given(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_ok!(client.geocoding().geocode().address("Sydney").send().await);
}

#[tokio::test]
async fn test_retries_stop_at_the_deadline() {
    let server = MockServer::start().await;
    Mock::given(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = builder_for(&server)
        .retry_policy(
            RetryPolicy::new()
                .retry_timeout(Duration::from_millis(200))
                .base_delay(Duration::from_millis(10))
                .multiplier(1.0),
        )
        .build()
        .unwrap();

    let err = assert_err!(client.geocoding().geocode().address("Sydney").send().await);
    assert!(matches!(err, MapsError::Timeout));
    assert!(server.received_requests().await.unwrap().len() > 1);
}

#[tokio::test]
async fn test_over_query_limit_is_retried() {
    let server = MockServer::start().await;
    Mock::given(path("/maps/api/geocode/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "OVER_QUERY_LIMIT"})),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_ok!(client.geocoding().geocode().address("Sydney").send().await);
}

#[tokio::test]
async fn test_over_query_limit_surfaces_when_retry_disabled() {
    let server = MockServer::start().await;
    Mock::given(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OVER_QUERY_LIMIT",
            "error_message": "You have exceeded your daily request quota"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = builder_for(&server)
        .retry_over_query_limit(false)
        .build()
        .unwrap();

    let err = assert_err!(client.geocoding().geocode().address("Sydney").send().await);
    match err {
        MapsError::OverQueryLimit { message } => {
            assert_eq!(
                message.as_deref(),
                Some("You have exceeded your daily request quota")
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_api_error_carries_message() {
    let server = MockServer::start().await;
    Mock::given(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = assert_err!(client.geocoding().geocode().address("Sydney").send().await);
    assert_eq!(err.api_status(), Some("REQUEST_DENIED"));
    assert!(matches!(
        err,
        MapsError::Api { message: Some(ref m), .. } if m == "The provided API key is invalid."
    ));
}

#[tokio::test]
async fn test_non_retriable_http_status_fails_immediately() {
    let server = MockServer::start().await;
    Mock::given(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"status": "OK"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = assert_err!(client.geocoding().geocode().address("Sydney").send().await);
    assert_eq!(err.status_code(), Some(403));
}

#[tokio::test]
async fn test_malformed_json_is_reported() {
    let server = MockServer::start().await;
    Mock::given(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{not json", "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = assert_err!(client.geocoding().geocode().address("Sydney").send().await);
    assert!(matches!(err, MapsError::MalformedResponse { format: "JSON", .. }));
}

#[tokio::test]
async fn test_invalid_request_never_reaches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = assert_err!(client.places().photo("ref").send().await);
    assert!(matches!(err, MapsError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_cancellation_abandons_the_request() {
    let server = MockServer::start().await;
    Mock::given(path("/maps/api/geocode/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_body())
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let spec = RequestSpec::get(
        "/maps/api/geocode/json",
        Params::new().with("address", "Sydney"),
    );
    let err = assert_err!(client.execute_with_cancel(spec, &token).await);
    assert!(matches!(err, MapsError::Cancelled));
}

#[tokio::test]
async fn test_raw_execute_returns_payload() {
    let server = MockServer::start().await;
    Mock::given(path("/maps/api/geocode/json"))
        .and(query_param("place_id", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ZERO_RESULTS",
            "results": []
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let spec = RequestSpec::get(
        "/maps/api/geocode/json",
        Params::new().with("place_id", "abc"),
    );
    let payload = assert_ok!(client.execute(spec).await);
    assert!(matches!(payload, Payload::Json(ref body) if body["status"] == "ZERO_RESULTS"));
}

#[tokio::test]
async fn test_calls_on_one_client_share_the_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
        .expect(2)
        .mount(&server)
        .await;

    let client = builder_for(&server).queries_per_second(1).build().unwrap();
    let start = std::time::Instant::now();

    assert_ok!(client.geocoding().geocode().address("Sydney").send().await);
    assert_ok!(client.clone().geocoding().geocode().address("Perth").send().await);

    assert!(start.elapsed() >= Duration::from_secs(1));
}

#[tokio::test]
async fn test_retried_attempts_do_not_consume_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = builder_for(&server).queries_per_second(1).build().unwrap();
    let start = std::time::Instant::now();

    assert_ok!(client.geocoding().geocode().address("Sydney").send().await);

    assert!(start.elapsed() < Duration::from_secs(1));
}
