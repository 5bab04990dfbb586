//! Join and field-derivation pipeline that turns the three raw tables into the prepared permit table.

use crate::dataset::error::DatasetError;
use crate::types::source_table::SourceTable;
use crate::types::columns::{
    ADDRESS, DESCRIPTION, DESCRIPTION_LOWER, FINAL_STATUS, RECORD_STATUS, RECORD_STATUS_DATE,
    RECORD_TYPE, SIMPLE_TYPE, STATUS_CODE, YEAR, ZIP_CODE,
};
use log::warn;
use polars::prelude::*;

const DATE_FORMAT: &str = "%m/%d/%Y";
const ZIP_LENGTH: i64 = 5;
const ZIP_PATTERN: &str = "^[0-9]{5}$";
const ZERO_ZIP: &str = "00000";

/// Row counts observed while preparing the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrepareStats {
    /// Rows in the permits source before any filtering.
    pub raw_rows: usize,
    /// Rows removed because the address did not end in a usable zip code.
    pub dropped_invalid_zip: usize,
    /// Rows in the prepared table.
    pub prepared_rows: usize,
    /// Prepared rows whose `RECORD STATUS DATE` did not parse.
    pub null_year: usize,
    /// Prepared rows with no status lookup match.
    pub null_final_status: usize,
    /// Prepared rows with no type lookup match.
    pub null_simple_type: usize,
}

/// Builds the prepared table lazily.
///
/// Lookups are reduced to their key and label columns before joining so nothing else
/// in them can collide with permit columns. Both joins are left joins.
pub(crate) fn prepare_frame(
    permits: LazyFrame,
    status_lookup: LazyFrame,
    type_lookup: LazyFrame,
) -> LazyFrame {
    let status_lookup = status_lookup.select([
        col(STATUS_CODE).cast(DataType::String),
        col(FINAL_STATUS).cast(DataType::String),
    ]);
    let type_lookup = type_lookup.select([
        col(RECORD_TYPE).cast(DataType::String),
        col(SIMPLE_TYPE).cast(DataType::String),
    ]);

    permits
        .with_columns([
            col(RECORD_STATUS).cast(DataType::String),
            col(RECORD_TYPE).cast(DataType::String),
        ])
        .left_join(status_lookup, col(RECORD_STATUS), col(STATUS_CODE))
        .left_join(type_lookup, col(RECORD_TYPE), col(RECORD_TYPE))
        .with_columns([
            parsed_status_date().alias(RECORD_STATUS_DATE),
            zip_code().alias(ZIP_CODE),
            col(DESCRIPTION)
                .cast(DataType::String)
                .str()
                .to_lowercase()
                .alias(DESCRIPTION_LOWER),
        ])
        .with_column(col(RECORD_STATUS_DATE).dt().year().alias(YEAR))
        .filter(valid_zip())
}

/// `RECORD STATUS DATE` as a `Date`; anything not in MM/DD/YYYY becomes null.
fn parsed_status_date() -> Expr {
    col(RECORD_STATUS_DATE)
        .cast(DataType::String)
        .str()
        .to_date(StrptimeOptions {
            format: Some(DATE_FORMAT.into()),
            strict: false,
            ..Default::default()
        })
}

/// Trailing characters of the address, as text.
fn zip_code() -> Expr {
    col(ADDRESS)
        .cast(DataType::String)
        .str()
        .tail(lit(ZIP_LENGTH))
}

fn valid_zip() -> Expr {
    col(ZIP_CODE)
        .str()
        .contains(lit(ZIP_PATTERN), true)
        .and(col(ZIP_CODE).neq(lit(ZERO_ZIP)))
}

/// Warns when a lookup key repeats; a left join would fan those permits out into several rows.
pub(crate) fn warn_on_duplicate_keys(
    lookup: &DataFrame,
    key: &str,
    table: SourceTable,
) -> Result<(), DatasetError> {
    let unique = lookup.column(key)?.as_materialized_series().n_unique()?;
    if unique != lookup.height() {
        warn!(
            "{} table has {} rows but only {} distinct '{}' values; joined permits may repeat",
            table,
            lookup.height(),
            unique,
            key
        );
    }
    Ok(())
}

/// Gathers the counts for a prepared frame.
pub(crate) fn collect_stats(raw_rows: usize, prepared: &DataFrame) -> Result<PrepareStats, DatasetError> {
    let prepared_rows = prepared.height();
    Ok(PrepareStats {
        raw_rows,
        dropped_invalid_zip: raw_rows.saturating_sub(prepared_rows),
        prepared_rows,
        null_year: prepared.column(YEAR)?.null_count(),
        null_final_status: prepared.column(FINAL_STATUS)?.null_count(),
        null_simple_type: prepared.column(SIMPLE_TYPE)?.null_count(),
    })
}
