//! Identifies the three tabular sources the permit dataset is built from.

use crate::types::columns::{
    ADDRESS, DESCRIPTION, FINAL_STATUS, RECORD_STATUS, RECORD_STATUS_DATE, RECORD_TYPE,
    SIMPLE_TYPE, STATUS_CODE,
};
use std::fmt;

/// One of the delimited-text sources read at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceTable {
    /// One row per permit application.
    Permits,
    /// Maps a raw status code to a business-facing `FinalStatus` label.
    StatusLookup,
    /// Maps a raw `RECORD TYPE` code to a coarse `SimpleType` category.
    TypeLookup,
}

impl SourceTable {
    /// File name used when the sources are resolved relative to a data directory.
    pub(crate) fn default_file_name(&self) -> &'static str {
        match self {
            SourceTable::Permits => "BuildingPermits2019_2024.csv",
            SourceTable::StatusLookup => "StatusTable.csv",
            SourceTable::TypeLookup => "RecordType.csv",
        }
    }

    /// Columns that must be present in the header row. Extra columns are carried along.
    pub(crate) fn required_columns(&self) -> Vec<&'static str> {
        match self {
            SourceTable::Permits => vec![
                RECORD_STATUS,
                RECORD_STATUS_DATE,
                RECORD_TYPE,
                ADDRESS,
                DESCRIPTION,
            ],
            SourceTable::StatusLookup => vec![STATUS_CODE, FINAL_STATUS],
            SourceTable::TypeLookup => vec![RECORD_TYPE, SIMPLE_TYPE],
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            SourceTable::Permits => "permits",
            SourceTable::StatusLookup => "status lookup",
            SourceTable::TypeLookup => "type lookup",
        }
    }
}

/// Formats a `SourceTable` using its short name.
///
/// # Examples
///
/// ```
/// use permits_dashboard::SourceTable;
///
/// assert_eq!(SourceTable::StatusLookup.to_string(), "status lookup");
/// ```
impl fmt::Display for SourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
