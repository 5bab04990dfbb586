//! Per-selection view model for the permits dashboard.

use crate::dataset::permit_dataset::PermitDataset;
use crate::error::DashboardError;
use crate::forecast::forecast_client::ForecastClient;
use crate::kpi::{KeywordKpi, KpiCount, SALES_KPIS};
use crate::types::summary::SummaryTable;
use crate::types::weather_snapshot::WeatherSnapshot;
use bon::bon;
use chrono::{DateTime, Utc};
use log::{info, warn};

/// Outcome of the weather panel's single forecast request.
#[derive(Debug, Clone, PartialEq)]
pub enum Forecast {
    Available(WeatherSnapshot),
    /// The request failed; the rest of the page is still rendered.
    Unavailable { reason: String },
}

impl Forecast {
    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match self {
            Forecast::Available(snapshot) => Some(snapshot),
            Forecast::Unavailable { .. } => None,
        }
    }
}

/// Everything one page render needs.
#[derive(Debug, Clone)]
pub struct DashboardView {
    /// Selector options, newest first.
    pub years: Vec<i32>,
    pub selected_year: Option<i32>,
    /// Counts per `(ZipCode, FinalStatus)`.
    pub zip_status: SummaryTable,
    /// Counts per `ZipCode`.
    pub zip_volume: SummaryTable,
    /// Counts per `(SimpleType, FinalStatus)`.
    pub type_status: SummaryTable,
    pub kpis: Vec<KpiCount>,
    pub forecast: Forecast,
}

impl DashboardView {
    /// False when the selected year has no permits at all.
    pub fn has_data(&self) -> bool {
        !self.zip_volume.is_empty()
    }
}

/// Composition root: owns the prepared dataset and the forecast client.
///
/// The dataset is prepared once, before the dashboard is built, and every
/// render only reads it.
#[derive(Debug)]
pub struct Dashboard {
    dataset: PermitDataset,
    forecast: ForecastClient,
    kpis: &'static [KeywordKpi],
}

#[bon]
impl Dashboard {
    pub fn new(dataset: PermitDataset, forecast: ForecastClient) -> Self {
        Self {
            dataset,
            forecast,
            kpis: &SALES_KPIS,
        }
    }

    /// Replaces the default sales KPIs.
    pub fn with_kpis(mut self, kpis: &'static [KeywordKpi]) -> Self {
        self.kpis = kpis;
        self
    }

    pub fn dataset(&self) -> &PermitDataset {
        &self.dataset
    }

    /// Fetches the weather panel's forecast, turning any failure into [`Forecast::Unavailable`].
    pub async fn forecast(&self, now: Option<DateTime<Utc>>) -> Forecast {
        match self.forecast.snapshot().maybe_now(now).call().await {
            Ok(snapshot) => Forecast::Available(snapshot),
            Err(e) => {
                warn!("Forecast unavailable: {}", e);
                Forecast::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Builds the view for one year selection.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.year(i32)`: Optional. Defaults to the most recent selectable year.
    /// * `.now(DateTime<Utc>)`: Optional. Reference time for the forecast. Defaults to `Utc::now()`.
    ///
    /// # Errors
    ///
    /// Only dataset query failures are returned. A year without permits yields empty
    /// tables, and a failed forecast yields [`Forecast::Unavailable`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use permits_dashboard::{Dashboard, DashboardError, ForecastClient, PermitDataset, SourcePaths};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), DashboardError> {
    /// let dataset = PermitDataset::load(&SourcePaths::in_dir("data"))?;
    /// let dashboard = Dashboard::new(dataset, ForecastClient::with_defaults()?);
    ///
    /// let view = dashboard.render().year(2023).call().await?;
    /// for kpi in &view.kpis {
    ///     println!("{}: {}", kpi.label, kpi.count);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn render(
        &self,
        year: Option<i32>,
        now: Option<DateTime<Utc>>,
    ) -> Result<DashboardView, DashboardError> {
        let years = self.dataset.available_years()?;
        let selected_year = year.or_else(|| years.first().copied());
        info!("Rendering dashboard for year {:?}", selected_year);

        let view = self.dataset.for_selection(selected_year);
        let zip_status = view.zip_status_counts()?;
        let zip_volume = view.zip_counts()?;
        let type_status = view.type_status_counts()?;
        let kpis = view.keyword_counts(self.kpis)?;
        let forecast = self.forecast(now).await;

        Ok(DashboardView {
            years,
            selected_year,
            zip_status,
            zip_volume,
            type_status,
            kpis,
            forecast,
        })
    }
}
