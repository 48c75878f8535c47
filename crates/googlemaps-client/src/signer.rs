//! HMAC-SHA1 URL signing for enterprise (client ID) authentication.
//!
//! The signature covers the path and query string of the request:
//! 1. Decode the URL-safe base64 client secret
//! 2. HMAC-SHA1(path + "?" + query, decoded secret)
//! 3. URL-safe base64 encode the digest

use base64::alphabet;
use base64::engine::general_purpose::URL_SAFE;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use googlemaps_core::{MapsError, Result};
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Secrets are handed out unpadded as often as padded.
const SECRET_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decode a URL-safe base64 client secret into key bytes.
pub(crate) fn decode_secret(secret: &str) -> Result<Vec<u8>> {
    SECRET_ENGINE
        .decode(secret)
        .map_err(|e| MapsError::Encoding(format!("client secret is not URL-safe base64: {e}")))
}

/// Sign a payload with a base64-encoded secret.
///
/// Returns the URL-safe base64 encoded HMAC-SHA1 digest. Signing is a pure
/// function: the same secret and payload always produce the same signature.
///
/// # Example
///
/// ```rust,ignore
/// let signature = sign_hmac("U0VDUkVU", "/maps/api/geocode/json?address=Paris&client=ID")?;
/// let url = format!("{path}&signature={signature}");
/// ```
pub fn sign_hmac(secret: &str, payload: &str) -> Result<String> {
    if !secret.is_ascii() {
        return Err(MapsError::Encoding(
            "client secret must be ASCII".to_string(),
        ));
    }
    if !payload.is_ascii() {
        return Err(MapsError::Encoding(
            "signed URL must be ASCII".to_string(),
        ));
    }

    let key = decode_secret(secret)?;
    let mut mac = HmacSha1::new_from_slice(&key)
        .map_err(|e| MapsError::Encoding(e.to_string()))?;
    mac.update(payload.as_bytes());

    Ok(URL_SAFE.encode(mac.finalize().into_bytes()))
}
