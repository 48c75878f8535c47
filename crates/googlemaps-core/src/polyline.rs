//! Encoded polyline algorithm format, at the 1e5 precision used by the services.
//!
//! See <https://developers.google.com/maps/documentation/utilities/polylinealgorithm>.

use crate::types::LatLng;
use crate::{MapsError, Result};

const PRECISION: f64 = 1e5;

/// Encode a list of points into a polyline string.
#[must_use]
pub fn encode(points: &[LatLng]) -> String {
    let mut encoded = String::new();
    let (mut prev_lat, mut prev_lng) = (0_i64, 0_i64);

    for point in points {
        let lat = scale(point.lat);
        let lng = scale(point.lng);
        encode_value(lat.saturating_sub(prev_lat), &mut encoded);
        encode_value(lng.saturating_sub(prev_lng), &mut encoded);
        prev_lat = lat;
        prev_lng = lng;
    }

    encoded
}

/// Decode a polyline string into its points.
pub fn decode(encoded: &str) -> Result<Vec<LatLng>> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut index = 0;
    let (mut lat, mut lng) = (0_i64, 0_i64);

    while index < bytes.len() {
        lat = accumulate(lat, decode_value(bytes, &mut index)?)?;
        lng = accumulate(lng, decode_value(bytes, &mut index)?)?;
        #[allow(clippy::cast_precision_loss)]
        points.push(LatLng::new(lat as f64 / PRECISION, lng as f64 / PRECISION));
    }

    Ok(points)
}

fn accumulate(total: i64, delta: i64) -> Result<i64> {
    total
        .checked_add(delta)
        .ok_or_else(|| MapsError::invalid("polyline value overflows"))
}

#[allow(clippy::cast_possible_truncation)]
fn scale(value: f64) -> i64 {
    (value * PRECISION).round() as i64
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn encode_value(value: i64, out: &mut String) {
    let mut value = if value < 0 { !(value << 1) } else { value << 1 };
    while value >= 0x20 {
        out.push(char::from(((0x20 | (value & 0x1f)) + 63) as u8));
        value >>= 5;
    }
    out.push(char::from((value + 63) as u8));
}

fn decode_value(bytes: &[u8], index: &mut usize) -> Result<i64> {
    let mut result = 0_i64;
    let mut shift = 0;

    loop {
        let byte = *bytes
            .get(*index)
            .ok_or_else(|| MapsError::invalid("truncated polyline"))?;
        *index += 1;

        let chunk = i64::from(byte)
            .checked_sub(63)
            .filter(|chunk| (0..0x40).contains(chunk))
            .ok_or_else(|| {
                MapsError::invalid(format!("invalid polyline character {:?}", char::from(byte)))
            })?;
        if shift > 60 {
            return Err(MapsError::invalid("polyline value overflows"));
        }
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 == 1 { !(result >> 1) } else { result >> 1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn reference_points() -> Vec<LatLng> {
        vec![
            LatLng::new(38.5, -120.2),
            LatLng::new(40.7, -120.95),
            LatLng::new(43.252, -126.453),
        ]
    }

    #[test]
    fn test_encode_reference_polyline() {
        assert_eq!(encode(&reference_points()), REFERENCE);
    }

    #[test]
    fn test_decode_reference_polyline() {
        let points = decode(REFERENCE).unwrap();
        assert_eq!(points.len(), 3);
        for (decoded, expected) in points.iter().zip(reference_points()) {
            assert!((decoded.lat - expected.lat).abs() < 1e-5);
            assert!((decoded.lng - expected.lng).abs() < 1e-5);
        }
    }

    #[test]
    fn test_roundtrip_within_tolerance() {
        let points = vec![
            LatLng::new(52.520645, 13.409779),
            LatLng::new(-33.8674869, 151.2069902),
            LatLng::new(0.0, 0.0),
        ];
        let decoded = decode(&encode(&points)).unwrap();
        for (decoded, original) in decoded.iter().zip(&points) {
            assert!((decoded.lat - original.lat).abs() <= 1e-5);
            assert!((decoded.lng - original.lng).abs() <= 1e-5);
        }
    }

    #[test]
    fn test_decode_rejects_truncated_input() {
        assert!(decode("_p~iF~ps|U_").is_err());
        assert!(decode("_p~iF\n").is_err());
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_accumulated_overflow() {
        let mut encoded = String::new();
        for _ in 0..3 {
            encode_value((1 << 62) - 1, &mut encoded);
            encode_value(0, &mut encoded);
        }
        assert!(matches!(decode(&encoded), Err(MapsError::InvalidRequest(_))));
    }

    #[test]
    fn test_encode_tolerates_non_finite_coordinates() {
        let encoded = encode(&[
            LatLng::new(f64::INFINITY, f64::NEG_INFINITY),
            LatLng::new(f64::NEG_INFINITY, f64::NAN),
        ]);
        assert!(!encoded.is_empty());
    }
}
