//! Group-and-count queries over a year-filtered permit frame.
//!
//! Each query is independent and returns a fresh [`SummaryTable`]. Rows whose grouping
//! keys contain a null are left out of the count.

use crate::dataset::error::DatasetError;
use crate::types::columns::{COUNT, FINAL_STATUS, SIMPLE_TYPE, ZIP_CODE};
use crate::types::summary::SummaryTable;
use polars::prelude::*;

/// Permit counts per `(ZipCode, FinalStatus)` pair.
pub fn zip_status_counts(frame: LazyFrame) -> Result<SummaryTable, DatasetError> {
    count_by(frame, &[ZIP_CODE, FINAL_STATUS])
}

/// Permit counts per `ZipCode`, regardless of status.
pub fn zip_counts(frame: LazyFrame) -> Result<SummaryTable, DatasetError> {
    count_by(frame, &[ZIP_CODE])
}

/// Permit counts per `(SimpleType, FinalStatus)` pair.
pub fn type_status_counts(frame: LazyFrame) -> Result<SummaryTable, DatasetError> {
    count_by(frame, &[SIMPLE_TYPE, FINAL_STATUS])
}

fn count_by(frame: LazyFrame, keys: &[&'static str]) -> Result<SummaryTable, DatasetError> {
    let key_exprs: Vec<Expr> = keys.iter().map(|key| col(*key)).collect();
    let keys_present = keys
        .iter()
        .map(|key| col(*key).is_not_null())
        .reduce(|acc, expr| acc.and(expr))
        .unwrap_or_else(|| lit(true));

    let counts = frame
        .filter(keys_present)
        .group_by(key_exprs.clone())
        .agg([len().cast(DataType::UInt64).alias(COUNT)])
        .sort_by_exprs(key_exprs, SortMultipleOptions::default())
        .collect()?;

    Ok(SummaryTable::new(keys, counts))
}
