//! Open-Meteo client for the county weather outlook: conditions now and 24 hours ahead.

use crate::forecast::config::{ForecastConfig, LatLon};
use crate::forecast::error::ForecastError;
use crate::forecast::models::{
    ApiResponse, CURRENT_FIELDS, HOURLY_FIELDS, HOURLY_TIME_FORMAT,
};
use crate::types::weather_snapshot::{
    celsius_to_fahrenheit, kmh_to_mph, mm_to_inches, CurrentConditions, HourlyOutlook,
    WeatherSnapshot,
};
use bon::bon;
use chrono::{DateTime, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Utc};
use log::{debug, warn};
use reqwest::Client;
use std::time::Duration;

/// HTTP client for the forecast provider.
///
/// Every call makes exactly one request, bounded by [`ForecastConfig::timeout_secs`].
/// Nothing is retried or cached.
#[derive(Debug)]
pub struct ForecastClient {
    client: Client,
    config: ForecastConfig,
}

#[bon]
impl ForecastClient {
    /// Creates a client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::ClientBuild`] if the HTTP client cannot be initialized.
    pub fn new(config: ForecastConfig) -> Result<Self, ForecastError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ForecastError::ClientBuild)?;
        Ok(Self { client, config })
    }

    /// Creates a client for the default Open-Meteo endpoint and county coordinates.
    pub fn with_defaults() -> Result<Self, ForecastError> {
        Self::new(ForecastConfig::default())
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Fetches current conditions and the forecast for 24 hours from now.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.location(LatLon)`: Optional. Defaults to the configured coordinates.
    /// * `.now(DateTime<Utc>)`: Optional. Reference time for the +24h lookup. Defaults to `Utc::now()`.
    ///
    /// # Errors
    ///
    /// * [`ForecastError::NetworkRequest`] on connection failure or timeout.
    /// * [`ForecastError::HttpStatus`] on a non-success response.
    /// * [`ForecastError::Decode`] if the body is not the expected JSON.
    /// * [`ForecastError::TargetHourMissing`] if the hourly series lacks the +24h entry.
    /// * [`ForecastError::MissingValue`] if a needed value is absent or null.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use permits_dashboard::{ForecastClient, ForecastError};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), ForecastError> {
    /// let client = ForecastClient::with_defaults()?;
    /// let snapshot = client.snapshot().call().await?;
    /// println!("Now: {:.1} °F", snapshot.now.temperature_f);
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn snapshot(
        &self,
        location: Option<LatLon>,
        now: Option<DateTime<Utc>>,
    ) -> Result<WeatherSnapshot, ForecastError> {
        let location = location.unwrap_or_else(|| self.config.location());
        let target = target_hour(now.unwrap_or_else(Utc::now));

        let response = self.request(location).await?;
        extract_snapshot(response, target)
    }

    async fn request(&self, location: LatLon) -> Result<ApiResponse, ForecastError> {
        let url = format!("{}/forecast", self.config.base_url.trim_end_matches('/'));
        debug!("Requesting forecast from {} for {:?}", url, location);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", location.0.to_string()),
                ("longitude", location.1.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("timezone", "UTC".to_string()),
            ])
            .send()
            .await
            .map_err(|e| ForecastError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    ForecastError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    ForecastError::NetworkRequest(url, e)
                });
            }
        };

        response
            .json::<ApiResponse>()
            .await
            .map_err(|e| ForecastError::Decode(url, e))
    }
}

/// `now + 24h`, truncated to the start of the hour.
pub(crate) fn target_hour(now: DateTime<Utc>) -> NaiveDateTime {
    let target = now.naive_utc() + TimeDelta::hours(24);
    target
        .date()
        .and_time(NaiveTime::MIN + TimeDelta::hours(i64::from(target.hour())))
}

fn extract_snapshot(
    response: ApiResponse,
    target: NaiveDateTime,
) -> Result<WeatherSnapshot, ForecastError> {
    let current = response
        .current
        .ok_or(ForecastError::MissingValue("current"))?;
    let hourly = response
        .hourly
        .ok_or(ForecastError::MissingValue("hourly"))?;

    let target_key = target.format(HOURLY_TIME_FORMAT).to_string();
    let idx = hourly
        .position(&target_key)
        .ok_or(ForecastError::TargetHourMissing(target_key))?;

    let now = CurrentConditions {
        temperature_f: celsius_to_fahrenheit(
            current
                .temperature_2m
                .ok_or(ForecastError::MissingValue("current.temperature_2m"))?,
        ),
        wind_speed_mph: kmh_to_mph(
            current
                .wind_speed_10m
                .ok_or(ForecastError::MissingValue("current.wind_speed_10m"))?,
        ),
        precipitation_in: mm_to_inches(
            current
                .precipitation
                .ok_or(ForecastError::MissingValue("current.precipitation"))?,
        ),
    };

    let in_24h = HourlyOutlook {
        time: target,
        temperature_f: celsius_to_fahrenheit(hourly_value(
            &hourly.temperature_2m,
            idx,
            "hourly.temperature_2m",
        )?),
        wind_speed_mph: kmh_to_mph(hourly_value(
            &hourly.wind_speed_10m,
            idx,
            "hourly.wind_speed_10m",
        )?),
        precipitation_probability: hourly_value(
            &hourly.precipitation_probability,
            idx,
            "hourly.precipitation_probability",
        )?,
    };

    Ok(WeatherSnapshot { now, in_24h })
}

fn hourly_value(
    series: &[Option<f64>],
    idx: usize,
    field: &'static str,
) -> Result<f64, ForecastError> {
    series
        .get(idx)
        .copied()
        .flatten()
        .ok_or(ForecastError::MissingValue(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn response(json: &str) -> ApiResponse {
        serde_json::from_str(json).unwrap()
    }

    const SAMPLE: &str = r#"{
        "current": {"temperature_2m": 20.0, "wind_speed_10m": 10.0, "precipitation": 2.0},
        "hourly": {
            "time": ["2024-06-02T13:00", "2024-06-02T14:00"],
            "temperature_2m": [30.0, 31.0],
            "wind_speed_10m": [16.0, 20.0],
            "precipitation_probability": [35, 40]
        }
    }"#;

    #[test]
    fn test_target_hour_truncates() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 13, 47, 12).unwrap();
        assert_eq!(
            target_hour(now).format(HOURLY_TIME_FORMAT).to_string(),
            "2024-06-02T13:00"
        );
    }

    #[test]
    fn test_target_hour_crosses_month() {
        let now = Utc.with_ymd_and_hms(2024, 2, 29, 23, 5, 0).unwrap();
        assert_eq!(
            target_hour(now).format(HOURLY_TIME_FORMAT).to_string(),
            "2024-03-01T23:00"
        );
    }

    #[test]
    fn test_extract_snapshot_converts_units() -> Result<(), ForecastError> {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 14, 10, 0).unwrap();

        let snapshot = extract_snapshot(response(SAMPLE), target_hour(now))?;

        assert_eq!(snapshot.now.temperature_f, 68.0);
        assert!((snapshot.now.wind_speed_mph - 6.21371).abs() < 1e-9);
        assert!((snapshot.now.precipitation_in - 0.0787402).abs() < 1e-9);
        assert!((snapshot.in_24h.temperature_f - 87.8).abs() < 1e-9);
        assert!((snapshot.in_24h.wind_speed_mph - 12.42742).abs() < 1e-9);
        assert_eq!(snapshot.in_24h.precipitation_probability, 40.0);
        Ok(())
    }

    #[test]
    fn test_extract_snapshot_missing_hour() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap();

        let result = extract_snapshot(response(SAMPLE), target_hour(now));

        match result {
            Err(ForecastError::TargetHourMissing(hour)) => assert_eq!(hour, "2024-06-02T20:00"),
            other => panic!("Expected TargetHourMissing, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_snapshot_null_value() {
        let json = r#"{
            "current": {"temperature_2m": 20.0, "wind_speed_10m": 10.0, "precipitation": 0.0},
            "hourly": {
                "time": ["2024-06-02T13:00"],
                "temperature_2m": [null],
                "wind_speed_10m": [16.0],
                "precipitation_probability": [35]
            }
        }"#;
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 13, 0, 0).unwrap();

        let result = extract_snapshot(response(json), target_hour(now));

        assert!(matches!(
            result,
            Err(ForecastError::MissingValue("hourly.temperature_2m"))
        ));
    }

    #[test]
    fn test_extract_snapshot_without_current() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 13, 0, 0).unwrap();

        let result = extract_snapshot(response(r#"{"hourly": {"time": []}}"#), target_hour(now));

        assert!(matches!(result, Err(ForecastError::MissingValue("current"))));
    }
}
