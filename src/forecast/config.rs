use serde::Deserialize;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use permits_dashboard::LatLon;
///
/// let county = LatLon(34.0, -84.0);
/// assert_eq!(county.0, 34.0); // Latitude
/// assert_eq!(county.1, -84.0); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// Forecast service configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastConfig {
    /// Open-Meteo API base URL (default: <https://api.open-meteo.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Latitude of the forecast point (default: 34.0, rounded from the permit data)
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    /// Longitude of the forecast point (default: -84.0)
    #[serde(default = "default_longitude")]
    pub longitude: f64,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

const fn default_latitude() -> f64 {
    34.0
}

const fn default_longitude() -> f64 {
    -84.0
}

const fn default_timeout() -> u64 {
    10
}

impl ForecastConfig {
    pub fn location(&self) -> LatLon {
        LatLon(self.latitude, self.longitude)
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            timeout_secs: default_timeout(),
        }
    }
}
