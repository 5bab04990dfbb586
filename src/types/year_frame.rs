//! Contains the `YearFrame` structure, a read-only view of the prepared permits for one selected year.

use crate::aggregation::{type_status_counts, zip_counts, zip_status_counts};
use crate::dataset::error::DatasetError;
use crate::kpi::{count_keywords, KeywordKpi, KpiCount};
use crate::types::summary::SummaryTable;
use polars::prelude::{Expr, LazyFrame};

/// A wrapper around a Polars `LazyFrame` holding the permits whose `Year` matches a selection.
///
/// Every query clones the lazy plan, so queries are independent of each other and
/// never touch the prepared dataset they were derived from.
///
/// Instances are obtained via [`crate::PermitDataset::for_year`] or
/// [`crate::PermitDataset::for_selection`].
///
/// # Errors
///
/// Query methods collect the underlying frame and can return a
/// [`DatasetError::DataFrameProcessing`] if Polars fails to evaluate the plan.
#[derive(Clone)]
pub struct YearFrame {
    year: Option<i32>,
    /// The underlying Polars LazyFrame, already filtered to the selected year.
    pub frame: LazyFrame,
}

impl YearFrame {
    pub(crate) fn new(year: Option<i32>, frame: LazyFrame) -> Self {
        Self { year, frame }
    }

    /// The selected year, or `None` when no year was selectable.
    pub fn year(&self) -> Option<i32> {
        self.year
    }

    /// Further restricts the rows with an arbitrary Polars predicate.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use permits_dashboard::{PermitDataset, SourcePaths};
    /// use polars::prelude::{col, lit};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let dataset = PermitDataset::load(&SourcePaths::in_dir("data"))?;
    /// let issued = dataset
    ///     .for_year(2023)
    ///     .filter(col("FinalStatus").eq(lit("Issued")));
    /// println!("{}", issued.frame.collect()?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn filter(&self, predicate: Expr) -> YearFrame {
        YearFrame::new(self.year, self.frame.clone().filter(predicate))
    }

    /// Number of permits in the selection.
    pub fn row_count(&self) -> Result<usize, DatasetError> {
        Ok(self.frame.clone().collect()?.height())
    }

    /// Permit counts per `(ZipCode, FinalStatus)`; empty when the year has no data.
    pub fn zip_status_counts(&self) -> Result<SummaryTable, DatasetError> {
        zip_status_counts(self.frame.clone())
    }

    /// Permit counts per `ZipCode`.
    pub fn zip_counts(&self) -> Result<SummaryTable, DatasetError> {
        zip_counts(self.frame.clone())
    }

    /// Permit counts per `(SimpleType, FinalStatus)`.
    pub fn type_status_counts(&self) -> Result<SummaryTable, DatasetError> {
        type_status_counts(self.frame.clone())
    }

    /// Keyword KPI counts, in the order of `kpis`.
    pub fn keyword_counts(&self, kpis: &[KeywordKpi]) -> Result<Vec<KpiCount>, DatasetError> {
        count_keywords(self.frame.clone(), kpis)
    }
}
