//! Formatting helpers that turn typed arguments into query parameter values.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

use crate::polyline;
use crate::types::{LatLng, Location};

/// Format a float as briefly as possible (`52.0` becomes `52`).
#[must_use]
pub fn format_float(value: f64) -> String {
    format!("{value}")
}

/// Join locations with pipes, e.g. `Sydney|-33.865143,151.2099`.
#[must_use]
pub fn piped_locations(locations: &[Location]) -> String {
    join_list("|", locations)
}

/// Join any displayable values with a separator.
#[must_use]
pub fn join_list<T: Display>(separator: &str, items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Render a component filter such as `country:US|postal_code:94043`.
///
/// Components are sorted by name so the same filter always yields the same
/// query string.
#[must_use]
pub fn components<K, V>(filters: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut rendered: Vec<String> = filters
        .iter()
        .map(|(key, value)| format!("{}:{}", key.as_ref(), value.as_ref()))
        .collect();
    rendered.sort();
    rendered.join("|")
}

/// Seconds since the Unix epoch, as a string.
#[must_use]
pub fn unix_time<Tz: TimeZone>(time: &DateTime<Tz>) -> String {
    time.timestamp().to_string()
}

/// Pick the shorter of the encoded polyline (`enc:` prefixed) and the piped
/// coordinate list.
#[must_use]
pub fn shortest_path(points: &[LatLng]) -> String {
    let encoded = format!("enc:{}", polyline::encode(points));
    let piped = join_list("|", points);
    if encoded.len() < piped.len() {
        encoded
    } else {
        piped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, Utc};

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(151.2099), "151.2099");
        assert_eq!(format_float(40.0), "40");
        assert_eq!(format_float(-0.5), "-0.5");
    }

    #[test]
    fn test_piped_locations() {
        let locations = vec![
            Location::from("Sydney"),
            Location::from((-33.865143, 151.2099)),
        ];
        assert_eq!(piped_locations(&locations), "Sydney|-33.865143,151.2099");
    }

    #[test]
    fn test_components_are_sorted() {
        let filters = [("postal_code", "94043"), ("country", "US")];
        assert_eq!(components(&filters), "country:US|postal_code:94043");
    }

    #[test]
    fn test_unix_time() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let time = offset.with_ymd_and_hms(2016, 8, 27, 19, 15, 42).unwrap();
        assert_eq!(unix_time(&time), "1472318142");

        let midnight = NaiveDate::from_ymd_opt(2016, 8, 27)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc();
        assert_eq!(unix_time(&midnight), "1472256000");
        assert_eq!(unix_time(&Utc.timestamp_opt(0, 0).unwrap()), "0");
    }

    #[test]
    fn test_shortest_path_prefers_short_form() {
        let single = [LatLng::new(1.0, 2.0)];
        assert_eq!(shortest_path(&single), "1,2");

        let long: Vec<LatLng> = (0..10)
            .map(|i| LatLng::new(40.714728 + f64::from(i) * 0.001, -73.998672))
            .collect();
        assert!(shortest_path(&long).starts_with("enc:"));
    }
}
