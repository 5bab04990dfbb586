use crate::types::columns::YEAR;
use polars::prelude::{col, lit, DataFrame, LazyFrame, PolarsResult};
use std::collections::BTreeSet;

/// Year value that is never offered for selection, even when rows carry it.
pub const SENTINEL_YEAR: i32 = 2042;

pub trait PermitFrameFilterExt {
    /// Keeps only rows whose derived `Year` equals `year`.
    ///
    /// Rows with a null `Year` (unparsable status date) never match.
    ///
    /// # Returns
    /// A new `LazyFrame` with the filter applied. Errors surface on `collect`.
    fn filter_year(self, year: i32) -> LazyFrame;
}

impl PermitFrameFilterExt for LazyFrame {
    fn filter_year(self, year: i32) -> LazyFrame {
        self.filter(col(YEAR).eq(lit(year)))
    }
}

/// Distinct non-null years in a prepared frame, newest first, with [`SENTINEL_YEAR`] left out.
///
/// The sentinel rows stay in the frame; they just can't be picked.
pub fn selectable_years(prepared: &DataFrame) -> PolarsResult<Vec<i32>> {
    let years: BTreeSet<i32> = prepared
        .column(YEAR)?
        .i32()?
        .into_iter()
        .flatten()
        .filter(|year| *year != SENTINEL_YEAR)
        .collect();
    Ok(years.into_iter().rev().collect())
}
