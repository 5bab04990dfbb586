use crate::types::source_table::SourceTable;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to open {table} source '{path}'")]
    SourceOpen {
        table: SourceTable,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parsing error reading {table} CSV '{path}'")]
    CsvRead {
        table: SourceTable,
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("Missing required column '{column}' in {table} table")]
    MissingColumn {
        table: SourceTable,
        column: &'static str,
    },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
