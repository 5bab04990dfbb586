use crate::dataset::error::DatasetError;
use crate::types::source_table::SourceTable;
use log::{debug, info};
use polars::frame::DataFrame;
use polars::prelude::*;
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Locations of the three source tables.
///
/// Deserializable so it can be embedded in a larger application config;
/// any path left out falls back to its default file name in the working directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SourcePaths {
    pub permits: PathBuf,
    pub status_lookup: PathBuf,
    pub type_lookup: PathBuf,
}

impl SourcePaths {
    /// Resolves the default file names inside `dir`.
    ///
    /// # Examples
    ///
    /// ```
    /// use permits_dashboard::SourcePaths;
    /// use std::path::Path;
    ///
    /// let paths = SourcePaths::in_dir("data");
    /// assert_eq!(paths.status_lookup, Path::new("data/StatusTable.csv"));
    /// ```
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            permits: dir.join(SourceTable::Permits.default_file_name()),
            status_lookup: dir.join(SourceTable::StatusLookup.default_file_name()),
            type_lookup: dir.join(SourceTable::TypeLookup.default_file_name()),
        }
    }

    pub(crate) fn path_for(&self, table: SourceTable) -> &Path {
        match table {
            SourceTable::Permits => &self.permits,
            SourceTable::StatusLookup => &self.status_lookup,
            SourceTable::TypeLookup => &self.type_lookup,
        }
    }
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self::in_dir(".")
    }
}

/// The raw, unjoined source tables.
pub(crate) struct RawSources {
    pub permits: DataFrame,
    pub status_lookup: DataFrame,
    pub type_lookup: DataFrame,
}

pub(crate) fn load_sources(paths: &SourcePaths) -> Result<RawSources, DatasetError> {
    Ok(RawSources {
        permits: read_source(SourceTable::Permits, paths.path_for(SourceTable::Permits))?,
        status_lookup: read_source(
            SourceTable::StatusLookup,
            paths.path_for(SourceTable::StatusLookup),
        )?,
        type_lookup: read_source(
            SourceTable::TypeLookup,
            paths.path_for(SourceTable::TypeLookup),
        )?,
    })
}

/// Reads one header-bearing CSV with every column as text, then checks its required columns.
///
/// Schema inference is disabled so codes and addresses keep their exact spelling
/// (no `00123` -> `123` coercion).
pub(crate) fn read_source(table: SourceTable, path: &Path) -> Result<DataFrame, DatasetError> {
    info!("Reading {} table from {:?}", table, path);

    let file = File::open(path).map_err(|e| DatasetError::SourceOpen {
        table,
        path: path.to_path_buf(),
        source: e,
    })?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(file)
        .finish()
        .map_err(|e| DatasetError::CsvRead {
            table,
            path: path.to_path_buf(),
            source: e,
        })?;

    ensure_columns(table, &df)?;
    debug!("Read {} rows from {} table", df.height(), table);
    Ok(df)
}

pub(crate) fn ensure_columns(table: SourceTable, df: &DataFrame) -> Result<(), DatasetError> {
    for column in table.required_columns() {
        if df.get_column_index(column).is_none() {
            return Err(DatasetError::MissingColumn { table, column });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_source_keeps_text_columns() -> Result<(), DatasetError> {
        let file = write_csv("Status,FinalStatus\n00123,Approved\nISS,Issued\n");

        let df = read_source(SourceTable::StatusLookup, file.path())?;

        assert_eq!(df.shape(), (2, 2));
        assert_eq!(df.column("Status")?.dtype(), &DataType::String);
        let codes: Vec<Option<&str>> = df.column("Status")?.str()?.into_iter().collect();
        assert_eq!(codes, vec![Some("00123"), Some("ISS")]);
        Ok(())
    }

    #[test]
    fn test_read_source_missing_column() {
        let file = write_csv("RECORD TYPE,Category\nBLD-R,Residential\n");

        let result = read_source(SourceTable::TypeLookup, file.path());

        match result {
            Err(DatasetError::MissingColumn { table, column }) => {
                assert_eq!(table, SourceTable::TypeLookup);
                assert_eq!(column, "SimpleType");
            }
            other => panic!("Expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_read_source_missing_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let paths = SourcePaths::in_dir(dir.path());

        let result = load_sources(&paths);

        assert!(matches!(
            result,
            Err(DatasetError::SourceOpen {
                table: SourceTable::Permits,
                ..
            })
        ));
    }

    #[test]
    fn test_source_paths_deserialize_with_defaults() {
        let paths: SourcePaths =
            serde_json::from_str(r#"{"permits": "/srv/permits.csv"}"#).unwrap();

        assert_eq!(paths.permits, PathBuf::from("/srv/permits.csv"));
        assert_eq!(paths.type_lookup, PathBuf::from("./RecordType.csv"));
    }
}
