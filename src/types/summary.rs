//! Count tables produced by the aggregation layer, plus typed row views of them.

use crate::dataset::error::DatasetError;
use crate::types::columns::{COUNT, FINAL_STATUS, SIMPLE_TYPE, ZIP_CODE};
use polars::prelude::{ChunkAgg, DataFrame, StringChunked, UInt64Chunked};

/// A small `(key columns..., Count)` table feeding one chart.
///
/// Row order carries no meaning; rows come back sorted by key so output is stable.
/// An empty table is the "no data for this year" state, not an error.
#[derive(Debug, Clone)]
pub struct SummaryTable {
    keys: Vec<&'static str>,
    frame: DataFrame,
}

impl SummaryTable {
    pub(crate) fn new(keys: &[&'static str], frame: DataFrame) -> Self {
        Self {
            keys: keys.to_vec(),
            frame,
        }
    }

    /// Names of the grouping columns, in grouping order.
    pub fn keys(&self) -> &[&'static str] {
        &self.keys
    }

    /// The underlying table, for consumers that chart straight from Polars.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.frame.height()
    }

    /// Sum of `Count` across all groups.
    pub fn total(&self) -> Result<u64, DatasetError> {
        Ok(self.counts()?.sum().unwrap_or(0))
    }

    fn key(&self, name: &str) -> Result<&StringChunked, DatasetError> {
        Ok(self.frame.column(name)?.str()?)
    }

    fn counts(&self) -> Result<&UInt64Chunked, DatasetError> {
        Ok(self.frame.column(COUNT)?.u64()?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipStatusCount {
    pub zip_code: String,
    pub final_status: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipCount {
    pub zip_code: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeStatusCount {
    pub simple_type: String,
    pub final_status: String,
    pub count: u64,
}

// Key columns of a summary never hold nulls (null keys are filtered before grouping),
// so a null here is skipped rather than reported.
fn pairs<'a>(
    first: &'a StringChunked,
    second: &'a StringChunked,
    counts: &'a UInt64Chunked,
) -> impl Iterator<Item = (&'a str, &'a str, u64)> {
    first
        .into_iter()
        .zip(second.into_iter())
        .zip(counts.into_iter())
        .filter_map(|((a, b), count)| Some((a?, b?, count?)))
}

impl ZipStatusCount {
    pub fn from_table(table: &SummaryTable) -> Result<Vec<Self>, DatasetError> {
        Ok(pairs(
            table.key(ZIP_CODE)?,
            table.key(FINAL_STATUS)?,
            table.counts()?,
        )
        .map(|(zip_code, final_status, count)| Self {
            zip_code: zip_code.to_string(),
            final_status: final_status.to_string(),
            count,
        })
        .collect())
    }
}

impl ZipCount {
    pub fn from_table(table: &SummaryTable) -> Result<Vec<Self>, DatasetError> {
        Ok(table
            .key(ZIP_CODE)?
            .into_iter()
            .zip(table.counts()?.into_iter())
            .filter_map(|(zip_code, count)| {
                Some(Self {
                    zip_code: zip_code?.to_string(),
                    count: count?,
                })
            })
            .collect())
    }
}

impl TypeStatusCount {
    pub fn from_table(table: &SummaryTable) -> Result<Vec<Self>, DatasetError> {
        Ok(pairs(
            table.key(SIMPLE_TYPE)?,
            table.key(FINAL_STATUS)?,
            table.counts()?,
        )
        .map(|(simple_type, final_status, count)| Self {
            simple_type: simple_type.to_string(),
            final_status: final_status.to_string(),
            count,
        })
        .collect())
    }
}
