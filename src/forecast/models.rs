//! Response shapes of the Open-Meteo `/forecast` endpoint, limited to the fields requested.

use serde::Deserialize;

/// Comma-separated `current=` variables.
pub(crate) const CURRENT_FIELDS: &str = "temperature_2m,wind_speed_10m,precipitation";
/// Comma-separated `hourly=` variables.
pub(crate) const HOURLY_FIELDS: &str = "temperature_2m,wind_speed_10m,precipitation_probability";
/// Layout of `hourly.time` entries when `timezone=UTC` is requested.
pub(crate) const HOURLY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    pub current: Option<CurrentData>,
    pub hourly: Option<HourlyData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentData {
    pub temperature_2m: Option<f64>,
    pub wind_speed_10m: Option<f64>,
    pub precipitation: Option<f64>,
}

// Open-Meteo emits `null` inside the series for hours it has no value for.
#[derive(Debug, Deserialize)]
pub(crate) struct HourlyData {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_speed_10m: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_probability: Vec<Option<f64>>,
}

impl HourlyData {
    pub fn position(&self, time: &str) -> Option<usize> {
        self.time.iter().position(|t| t == time)
    }
}
