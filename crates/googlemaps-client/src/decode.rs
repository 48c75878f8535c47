//! Interpretation of raw HTTP responses.
//!
//! Every attempt ends in one of three ways: a decoded [`Payload`], a retry
//! signal handled inside the client, or a terminal [`MapsError`].

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use googlemaps_core::{ImageData, MapsError, Payload, XmlDocument};
use serde_json::Value;

use crate::config::ResponseFormat;

/// HTTP statuses that trigger another attempt
pub const RETRIABLE_STATUSES: [u16; 3] = [500, 503, 504];

/// The parts of an HTTP response decoders look at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    url: String,
    status: u16,
    content_type: Option<String>,
    location: Option<String>,
    body: Vec<u8>,
}

impl RawResponse {
    /// A response with the given status and body
    #[must_use]
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            url: url.into(),
            status,
            content_type: None,
            location: None,
            body: body.into(),
        }
    }

    /// Set the `Content-Type` header
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Set the `Location` header
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Collect the parts of a `reqwest` response
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self, MapsError> {
        let url = response.url().to_string();
        let status = response.status().as_u16();
        let header = |name: reqwest::header::HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(String::from)
        };
        let content_type = header(reqwest::header::CONTENT_TYPE);
        let location = header(reqwest::header::LOCATION);
        let body = response
            .bytes()
            .await
            .map_err(|e| MapsError::Transport(e.to_string()))?;

        Ok(Self {
            url,
            status,
            content_type,
            location,
            body: body.to_vec(),
        })
    }

    /// Requested URL
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// HTTP status code
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Raw `Content-Type` header
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// MIME type of the body, without parameters such as `charset`
    #[must_use]
    pub fn mime_type(&self) -> Option<String> {
        self.content_type
            .as_deref()
            .and_then(|value| value.split(';').next())
            .map(|mime| mime.trim().to_ascii_lowercase())
            .filter(|mime| !mime.is_empty())
    }

    /// `Location` header
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Body bytes
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Why an attempt should be repeated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryReason {
    /// The server answered with a retriable HTTP status
    Status(u16),
    /// A Maps service reported `OVER_QUERY_LIMIT`
    OverQueryLimit(Option<String>),
    /// A Google API reported `RESOURCE_EXHAUSTED`
    ResourceExhausted(Option<String>),
}

impl RetryReason {
    /// Returns true for quota exhaustion, which callers may opt out of retrying
    #[must_use]
    pub const fn is_quota(&self) -> bool {
        matches!(self, Self::OverQueryLimit(_) | Self::ResourceExhausted(_))
    }

    pub(crate) fn into_error(self) -> MapsError {
        match self {
            Self::Status(status) => MapsError::Http { status },
            Self::OverQueryLimit(message) | Self::ResourceExhausted(message) => {
                MapsError::OverQueryLimit { message }
            }
        }
    }
}

impl std::fmt::Display for RetryReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status(status) => write!(f, "HTTP {status}"),
            Self::OverQueryLimit(_) => f.write_str("OVER_QUERY_LIMIT"),
            Self::ResourceExhausted(_) => f.write_str("RESOURCE_EXHAUSTED"),
        }
    }
}

/// Outcome of an attempt that did not produce a payload
#[derive(Debug)]
pub enum Classified {
    /// Try again after a backoff delay
    Retryable(RetryReason),
    /// Give up and report the error
    Failed(MapsError),
}

impl From<MapsError> for Classified {
    fn from(err: MapsError) -> Self {
        Self::Failed(err)
    }
}

/// Result of decoding one attempt
pub type DecodeResult = std::result::Result<Payload, Classified>;

/// Custom body extraction for services with their own error envelope
pub trait ResponseExtractor: Send + Sync {
    /// Decode a response into a payload or a classified failure
    fn extract(&self, response: &RawResponse) -> DecodeResult;
}

impl<F> ResponseExtractor for F
where
    F: Fn(&RawResponse) -> DecodeResult + Send + Sync,
{
    fn extract(&self, response: &RawResponse) -> DecodeResult {
        self(response)
    }
}

/// Decode a response by its retriable status, then by its MIME type.
///
/// A response without a `Content-Type` is decoded in the declared format.
pub fn decode_response(response: &RawResponse, format: ResponseFormat) -> DecodeResult {
    retriable_status(response)?;

    match response.mime_type().as_deref() {
        Some("application/json") => decode_json(response),
        Some("application/xml" | "text/xml") => decode_xml(response),
        Some("text/html") => Ok(Payload::Redirect(redirect_location(response))),
        Some(_) => map_image(response),
        None => match format {
            ResponseFormat::Json => decode_json(response),
            ResponseFormat::Xml => decode_xml(response),
        },
    }
}

/// Signal a retry for 500, 503 and 504 responses
pub fn retriable_status(response: &RawResponse) -> Result<(), Classified> {
    if RETRIABLE_STATUSES.contains(&response.status()) {
        return Err(Classified::Retryable(RetryReason::Status(response.status())));
    }
    Ok(())
}

/// Decode a Maps JSON body and classify its `status` field
pub fn decode_json(response: &RawResponse) -> DecodeResult {
    expect_ok_status(response)?;

    let body: Value = serde_json::from_slice(response.body()).map_err(|e| {
        MapsError::MalformedResponse {
            format: "JSON",
            detail: e.to_string(),
        }
    })?;

    let status = body
        .get("status")
        .and_then(Value::as_str)
        .ok_or_else(|| MapsError::MalformedResponse {
            format: "JSON",
            detail: "response has no status field".to_string(),
        })?;
    let message = body
        .get("error_message")
        .and_then(Value::as_str)
        .map(String::from);

    classify_api_status(status, message)?;
    Ok(Payload::Json(body))
}

/// Decode a Maps XML body and classify its `status` element
pub fn decode_xml(response: &RawResponse) -> DecodeResult {
    expect_ok_status(response)?;

    let text = std::str::from_utf8(response.body()).map_err(|e| {
        MapsError::MalformedResponse {
            format: "XML",
            detail: e.to_string(),
        }
    })?;
    let doc = XmlDocument::parse(text)?;

    let status = doc
        .root()
        .find("status")
        .map(|node| node.text().to_string())
        .ok_or_else(|| MapsError::MalformedResponse {
            format: "XML",
            detail: "response has no status element".to_string(),
        })?;
    let message = doc
        .root()
        .find("error_message")
        .map(|node| node.text().to_string());

    classify_api_status(&status, message)?;
    Ok(Payload::Xml(doc))
}

/// The `Location` header of a 3xx response
#[must_use]
pub fn redirect_location(response: &RawResponse) -> Option<String> {
    (300..400)
        .contains(&response.status())
        .then(|| response.location().map(String::from))
        .flatten()
}

/// Wrap an image body as base64
pub fn map_image(response: &RawResponse) -> DecodeResult {
    expect_ok_status(response)?;

    Ok(Payload::Image(ImageData {
        url: response.url().to_string(),
        mime_type: response
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string(),
        image_data: BASE64.encode(response.body()),
    }))
}

/// Extractor for Google APIs (roads, geolocation) that report errors as
/// `{"error": {"status": ..., "message": ...}}`.
pub fn google_apis_error_extractor(response: &RawResponse) -> DecodeResult {
    retriable_status(response)?;

    let body: Value = serde_json::from_slice(response.body()).map_err(|e| {
        MapsError::MalformedResponse {
            format: "JSON",
            detail: e.to_string(),
        }
    })?;

    if let Some(error) = body.get("error") {
        let status = error
            .get("status")
            .and_then(Value::as_str)
            .or_else(|| {
                error
                    .pointer("/errors/0/reason")
                    .and_then(Value::as_str)
            })
            .map_or_else(|| response.status().to_string(), String::from);
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(String::from);

        if status == "RESOURCE_EXHAUSTED" {
            return Err(Classified::Retryable(RetryReason::ResourceExhausted(message)));
        }
        return Err(Classified::Failed(MapsError::Api { status, message }));
    }

    expect_ok_status(response)?;
    Ok(Payload::Json(body))
}

fn expect_ok_status(response: &RawResponse) -> Result<(), MapsError> {
    if response.status() != 200 {
        return Err(MapsError::Http {
            status: response.status(),
        });
    }
    Ok(())
}

fn classify_api_status(status: &str, message: Option<String>) -> Result<(), Classified> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        "OVER_QUERY_LIMIT" => Err(Classified::Retryable(RetryReason::OverQueryLimit(message))),
        _ => Err(Classified::Failed(MapsError::Api {
            status: status.to_string(),
            message,
        })),
    }
}
