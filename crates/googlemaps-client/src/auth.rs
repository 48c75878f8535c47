//! Authenticated request URLs.

use googlemaps_core::{MapsError, Result};

use crate::config::ClientConfig;
use crate::request::Params;
use crate::signer::sign_hmac;

/// Return the path and query string of a request with credentials attached.
///
/// Endpoints that accept enterprise credentials are signed when a client ID
/// and secret are configured: `channel` and `client` are appended to the
/// parameters and the signature over the whole path and query goes last.
/// Otherwise the API key is appended as `key`.
pub fn generate_auth_url(
    path: &str,
    mut params: Params,
    accepts_client_id: bool,
    config: &ClientConfig,
) -> Result<String> {
    if accepts_client_id {
        if let Some((client_id, secret)) = config.enterprise_credentials() {
            if let Some(channel) = config.channel() {
                params.set("channel", channel);
            }
            params.set("client", client_id);

            let unsigned = format!("{path}?{}", params.to_query_string());
            let signature = sign_hmac(secret, &unsigned)?;
            return Ok(format!("{unsigned}&signature={signature}"));
        }
    }

    if let Some(key) = config.key() {
        params.set("key", key);
        return Ok(format!("{path}?{}", params.to_query_string()));
    }

    Err(MapsError::Config(
        "must provide API key for this API; it does not accept enterprise credentials"
            .to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_config() -> ClientConfig {
        ClientConfig {
            key: Some("AIzadGhpcyBpcyBhIGtleQ==".to_string()),
            ..ClientConfig::default()
        }
    }

    fn enterprise_config() -> ClientConfig {
        ClientConfig {
            client_id: Some("ID".to_string()),
            client_secret: Some("U0VDUkVU".to_string()),
            channel: Some("CH".to_string()),
            ..ClientConfig::default()
        }
    }

    #[test]
    fn test_api_key_url() {
        let params = Params::new().with("param1", "value");
        let url = generate_auth_url("/path/to/service", params, false, &key_config()).unwrap();
        assert_eq!(
            url,
            "/path/to/service?param1=value&key=AIzadGhpcyBpcyBhIGtleQ%3D%3D"
        );
    }

    #[test]
    fn test_signed_url() {
        let params = Params::new().with("address", "Mountain View");
        let url =
            generate_auth_url("/maps/api/geocode/json", params, true, &enterprise_config())
                .unwrap();
        assert_eq!(
            url,
            "/maps/api/geocode/json?address=Mountain+View&channel=CH&client=ID\
             &signature=6x4VC7LX9u26yXHcxE9DUjRzmMo="
        );
    }

    #[test]
    fn test_signature_is_deterministic() {
        let params = Params::new().with("address", "Mountain View");
        let first =
            generate_auth_url("/maps/api/geocode/json", params.clone(), true, &enterprise_config())
                .unwrap();
        let second =
            generate_auth_url("/maps/api/geocode/json", params, true, &enterprise_config())
                .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_key_only_endpoint_without_key_fails() {
        let err = generate_auth_url("/v1/snapToRoads", Params::new(), false, &enterprise_config())
            .unwrap_err();
        assert!(matches!(err, MapsError::Config(_)));
    }

    #[test]
    fn test_key_only_endpoint_prefers_key() {
        let config = ClientConfig {
            key: Some("AIzaKEY".to_string()),
            ..enterprise_config()
        };
        let url = generate_auth_url("/v1/nearestRoads", Params::new(), false, &config).unwrap();
        assert_eq!(url, "/v1/nearestRoads?key=AIzaKEY");
    }

    #[test]
    fn test_missing_credentials_fail_even_when_signing_accepted() {
        let err = generate_auth_url("/path", Params::new(), true, &ClientConfig::default())
            .unwrap_err();
        assert!(matches!(err, MapsError::Config(_)));
    }
}
