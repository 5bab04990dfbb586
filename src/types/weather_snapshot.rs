use chrono::NaiveDateTime;
use serde::Serialize;

const MPH_PER_KMH: f64 = 0.621371;
const INCHES_PER_MM: f64 = 0.0393701;

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn kmh_to_mph(kmh: f64) -> f64 {
    kmh * MPH_PER_KMH
}

pub fn mm_to_inches(mm: f64) -> f64 {
    mm * INCHES_PER_MM
}

/// Conditions at request time, in imperial units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub temperature_f: f64,
    pub wind_speed_mph: f64,
    pub precipitation_in: f64,
}

/// The hourly forecast entry 24 hours after request time, in imperial units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyOutlook {
    pub time: NaiveDateTime, // UTC, on the hour
    pub temperature_f: f64,
    pub wind_speed_mph: f64,
    pub precipitation_probability: f64, // percent
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeatherSnapshot {
    pub now: CurrentConditions,
    pub in_24h: HourlyOutlook,
}
