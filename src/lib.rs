mod aggregation;
mod dashboard;
mod dataset;
mod error;
mod filtering;
mod forecast;
mod kpi;
mod types;

pub use dashboard::*;
pub use error::DashboardError;

pub use aggregation::{type_status_counts, zip_counts, zip_status_counts};
pub use filtering::{selectable_years, PermitFrameFilterExt, SENTINEL_YEAR};
pub use kpi::{count_keywords, KeywordKpi, KpiCount, SALES_KPIS};

pub use dataset::data_loader::SourcePaths;
pub use dataset::permit_dataset::PermitDataset;
pub use dataset::prepare::PrepareStats;

pub use forecast::config::{ForecastConfig, LatLon};
pub use forecast::forecast_client::ForecastClient;

pub use types::columns;
pub use types::source_table::SourceTable;
pub use types::summary::*;
pub use types::weather_snapshot::*;
pub use types::year_frame::YearFrame;

pub use dataset::error::DatasetError;
pub use forecast::error::ForecastError;
