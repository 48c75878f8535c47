use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::xml::{XmlDocument, XmlElement};
use crate::{MapsError, Result};

/// A successfully decoded response body
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Parsed JSON body
    Json(Value),
    /// Parsed XML document
    Xml(XmlDocument),
    /// Binary image, base64 encoded
    Image(ImageData),
    /// Target of a redirect, or `None` when the response was not a redirect
    Redirect(Option<String>),
}

impl Payload {
    /// Short name of the payload kind, used in mismatch errors
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Json(_) => "JSON",
            Self::Xml(_) => "XML",
            Self::Image(_) => "image",
            Self::Redirect(_) => "redirect",
        }
    }

    /// The JSON body
    pub fn into_json(self) -> Result<Value> {
        match self {
            Self::Json(value) => Ok(value),
            other => Err(other.mismatch("JSON")),
        }
    }

    /// The XML document
    pub fn into_xml(self) -> Result<XmlDocument> {
        match self {
            Self::Xml(doc) => Ok(doc),
            other => Err(other.mismatch("XML")),
        }
    }

    /// The image data
    pub fn into_image(self) -> Result<ImageData> {
        match self {
            Self::Image(image) => Ok(image),
            other => Err(other.mismatch("image")),
        }
    }

    /// The redirect target
    pub fn into_redirect(self) -> Result<Option<String>> {
        match self {
            Self::Redirect(location) => Ok(location),
            other => Err(other.mismatch("redirect")),
        }
    }

    /// Deserialize the JSON body into a typed value
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_value(self.into_json()?)?)
    }

    /// Pull an array field out of a JSON body.
    ///
    /// A missing field yields an empty list, matching what the services send
    /// alongside `ZERO_RESULTS`.
    pub fn json_array(self, field: &str) -> Result<Vec<Value>> {
        match self.into_json()? {
            Value::Object(mut body) => match body.remove(field) {
                None | Some(Value::Null) => Ok(Vec::new()),
                Some(Value::Array(items)) => Ok(items),
                Some(_) => Err(MapsError::MalformedResponse {
                    format: "JSON",
                    detail: format!("field `{field}` is not an array"),
                }),
            },
            _ => Err(MapsError::MalformedResponse {
                format: "JSON",
                detail: "expected a JSON object".to_string(),
            }),
        }
    }

    /// Extract result records in either format: the `field` array of a JSON
    /// body, or every `node` element of an XML document.
    pub fn into_records(self, field: &str, node: &str) -> Result<Records> {
        match self {
            Self::Xml(doc) => Ok(Records::Xml(
                doc.root().find_all(node).into_iter().cloned().collect(),
            )),
            other => other.json_array(field).map(Records::Json),
        }
    }

    fn mismatch(&self, expected: &'static str) -> MapsError {
        MapsError::MalformedResponse {
            format: expected,
            detail: format!("expected a {expected} payload, got {}", self.kind()),
        }
    }
}

/// Result records of a service that honours the client's response format
#[derive(Debug, Clone, PartialEq)]
pub enum Records {
    /// Entries of a JSON result array
    Json(Vec<Value>),
    /// Matching nodes of an XML document
    Xml(Vec<XmlElement>),
}

impl Records {
    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Json(items) => items.len(),
            Self::Xml(nodes) => nodes.len(),
        }
    }

    /// Returns true if there are no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An image returned by the static map or street view services
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageData {
    /// URL the image was fetched from
    pub url: String,
    /// Declared MIME type, e.g. `image/png`
    pub mime_type: String,
    /// Base64-encoded image bytes, without line breaks
    pub image_data: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_array_extraction() {
        let payload = Payload::Json(json!({"status": "OK", "routes": [{"summary": "A1"}]}));
        let routes = payload.json_array("routes").unwrap();
        assert_eq!(routes, vec![json!({"summary": "A1"})]);
    }

    #[test]
    fn test_json_array_missing_field_is_empty() {
        let payload = Payload::Json(json!({"status": "ZERO_RESULTS"}));
        assert!(payload.json_array("results").unwrap().is_empty());
    }

    #[test]
    fn test_payload_kind_mismatch() {
        let err = Payload::Redirect(None).into_json().unwrap_err();
        assert!(matches!(err, MapsError::MalformedResponse { format: "JSON", .. }));
    }

    #[test]
    fn test_xml_records() {
        let doc = XmlDocument::parse(
            "<GeocodeResponse><status>OK</status><result><type>locality</type></result>\
             <result><type>political</type></result></GeocodeResponse>",
        )
        .unwrap();
        let records = Payload::Xml(doc).into_records("results", "result").unwrap();
        assert_eq!(records.len(), 2);
    }
}
