//! Request and response bodies of the geolocation service.

use serde::{Deserialize, Serialize};

use super::{LatLng, RadioType};

/// A cell tower visible to the device
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellTower {
    /// Unique identifier of the cell
    pub cell_id: u32,
    /// Location area code (GSM, WCDMA) or network ID (CDMA)
    pub location_area_code: u32,
    /// Mobile country code
    pub mobile_country_code: u16,
    /// Mobile network code, or system ID on CDMA
    pub mobile_network_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal_strength: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing_advance: Option<u32>,
}

/// A WiFi access point visible to the device
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WifiAccessPoint {
    /// MAC address, e.g. `00:25:9c:cf:1c:ac`
    pub mac_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal_strength: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal_to_noise_ratio: Option<i32>,
}

/// Body POSTed to the geolocation service
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeolocationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_mobile_country_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_mobile_network_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radio_type: Option<RadioType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    /// Fall back to IP geolocation when other signals are missing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consider_ip: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cell_towers: Vec<CellTower>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub wifi_access_points: Vec<WifiAccessPoint>,
}

/// Estimated device position
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Geolocation {
    pub location: LatLng,
    /// Radius of the 95% confidence circle, in meters
    pub accuracy: f64,
}
