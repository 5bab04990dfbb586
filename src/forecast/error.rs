use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode forecast response from {0}")]
    Decode(String, #[source] reqwest::Error),

    #[error("Forecast response has no value for '{0}'")]
    MissingValue(&'static str),

    // The provider's hourly series did not include the hour 24h from now.
    #[error("No hourly forecast entry for {0}")]
    TargetHourMissing(String),
}
