use crate::dataset::error::DatasetError;
use crate::forecast::error::ForecastError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),
}
