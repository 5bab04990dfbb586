//! The prepared, immutable permit dataset.

use crate::dataset::data_loader::{ensure_columns, load_sources, RawSources, SourcePaths};
use crate::dataset::error::DatasetError;
use crate::dataset::prepare::{collect_stats, prepare_frame, warn_on_duplicate_keys, PrepareStats};
use crate::filtering::{selectable_years, PermitFrameFilterExt};
use crate::types::columns::{RECORD_TYPE, STATUS_CODE};
use crate::types::source_table::SourceTable;
use crate::types::year_frame::YearFrame;
use log::info;
use polars::prelude::{DataFrame, IntoLazy};

/// Permit records joined with their lookups, with `Year`, `ZipCode` and
/// `DescriptionLower` derived and invalid zip codes removed.
///
/// Built once by the application's composition root and then only read.
/// Every query takes `&self` and works on a lazy view of the frame.
///
/// # Examples
///
/// ```no_run
/// use permits_dashboard::{PermitDataset, SourcePaths};
///
/// # fn main() -> Result<(), permits_dashboard::DatasetError> {
/// let dataset = PermitDataset::load(&SourcePaths::in_dir("data"))?;
/// if let Some(year) = dataset.default_year()? {
///     let zips = dataset.for_year(year).zip_counts()?;
///     println!("{} zip codes with permits in {}", zips.len(), year);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PermitDataset {
    frame: DataFrame,
    stats: PrepareStats,
}

impl PermitDataset {
    /// Reads the three source tables and prepares them.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::SourceOpen`] or [`DatasetError::CsvRead`] when a source
    /// cannot be read, and [`DatasetError::MissingColumn`] when a required header is absent.
    /// Bad dates and zip codes never error; they are nulled or dropped.
    pub fn load(paths: &SourcePaths) -> Result<Self, DatasetError> {
        let RawSources {
            permits,
            status_lookup,
            type_lookup,
        } = load_sources(paths)?;
        Self::from_frames(permits, status_lookup, type_lookup)
    }

    /// Prepares the dataset from tables that are already in memory.
    pub fn from_frames(
        permits: DataFrame,
        status_lookup: DataFrame,
        type_lookup: DataFrame,
    ) -> Result<Self, DatasetError> {
        ensure_columns(SourceTable::Permits, &permits)?;
        ensure_columns(SourceTable::StatusLookup, &status_lookup)?;
        ensure_columns(SourceTable::TypeLookup, &type_lookup)?;

        warn_on_duplicate_keys(&status_lookup, STATUS_CODE, SourceTable::StatusLookup)?;
        warn_on_duplicate_keys(&type_lookup, RECORD_TYPE, SourceTable::TypeLookup)?;

        let raw_rows = permits.height();
        let frame = prepare_frame(permits.lazy(), status_lookup.lazy(), type_lookup.lazy())
            .collect()?;
        let stats = collect_stats(raw_rows, &frame)?;

        info!(
            "Prepared {} of {} permits ({} dropped for invalid zip, {} without a parsable date, {} without a status match, {} without a type match)",
            stats.prepared_rows,
            stats.raw_rows,
            stats.dropped_invalid_zip,
            stats.null_year,
            stats.null_final_status,
            stats.null_simple_type
        );

        Ok(Self { frame, stats })
    }

    /// The prepared table.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn stats(&self) -> PrepareStats {
        self.stats
    }

    /// Rows in the prepared table, including rows with no `Year`.
    pub fn row_count(&self) -> usize {
        self.frame.height()
    }

    /// Years offered for selection: distinct, non-null, newest first, sentinel excluded.
    pub fn available_years(&self) -> Result<Vec<i32>, DatasetError> {
        Ok(selectable_years(&self.frame)?)
    }

    /// The initial selection: the most recent available year.
    pub fn default_year(&self) -> Result<Option<i32>, DatasetError> {
        Ok(self.available_years()?.first().copied())
    }

    /// Permits whose `Year` equals `year`.
    pub fn for_year(&self, year: i32) -> YearFrame {
        YearFrame::new(Some(year), self.frame.clone().lazy().filter_year(year))
    }

    /// Like [`Self::for_year`], but a missing selection yields an empty view with the full schema.
    pub fn for_selection(&self, year: Option<i32>) -> YearFrame {
        match year {
            Some(year) => self.for_year(year),
            None => YearFrame::new(None, self.frame.clear().lazy()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filtering::SENTINEL_YEAR;
    use crate::kpi::SALES_KPIS;
    use crate::types::columns::*;
    use crate::types::summary::ZipStatusCount;
    use polars::prelude::*;

    fn dataset() -> Result<PermitDataset, DatasetError> {
        let permits = df!(
            RECORD_STATUS => ["ISS", "ISS", "FIN", "XXX", "ISS", "ISS", "FIN"],
            RECORD_STATUS_DATE => ["03/01/2023", "11/30/2023", "06/15/2022", "01/02/2023", "13/45/2020", "05/05/2042", "02/02/2021"],
            RECORD_TYPE => ["BLD-R", "BLD-R", "BLD-C", "BLD-R", "BLD-R", "BLD-R", "BLD-C"],
            ADDRESS => [
                "10 Peachtree St, Atlanta, GA 30301",
                "12 Peachtree St, Atlanta, GA 30301",
                "1 Marietta St, Atlanta, GA 30303",
                "9 Ponce Ave, Atlanta, GA 30308",
                "4 Edgewood Ave, Atlanta, GA 30312",
                "7 Spring St, Atlanta, GA 30309",
                "123 Main St, Atlanta, GA 00000"
            ],
            DESCRIPTION => [
                Some("Remodel BATHROOM"),
                Some("new fence"),
                Some("Demolition of warehouse"),
                None,
                Some("bathroom addition"),
                Some("placeholder"),
                Some("fence repair")
            ]
        )?;
        let status = df!(
            STATUS_CODE => ["ISS", "FIN"],
            FINAL_STATUS => ["Approved", "Closed"]
        )?;
        let types = df!(
            RECORD_TYPE => ["BLD-R", "BLD-C"],
            SIMPLE_TYPE => ["Residential", "Commercial"]
        )?;
        PermitDataset::from_frames(permits, status, types)
    }

    #[test]
    fn test_prepared_rows_have_valid_zip() -> Result<(), DatasetError> {
        let dataset = dataset()?;

        assert_eq!(dataset.row_count(), 6);
        for zip in dataset.frame().column(ZIP_CODE)?.str()?.into_iter() {
            let zip = zip.expect("prepared rows always carry a zip code");
            assert_eq!(zip.len(), 5);
            assert!(zip.chars().all(|c| c.is_ascii_digit()));
            assert_ne!(zip, "00000");
        }
        assert_eq!(dataset.stats().dropped_invalid_zip, 1);
        Ok(())
    }

    #[test]
    fn test_available_years_exclude_sentinel_and_nulls() -> Result<(), DatasetError> {
        let dataset = dataset()?;

        let years = dataset.available_years()?;

        assert_eq!(years, vec![2023, 2022]);
        assert!(!years.contains(&SENTINEL_YEAR));
        assert_eq!(dataset.default_year()?, Some(2023));
        assert_eq!(dataset.for_year(SENTINEL_YEAR).row_count()?, 1);
        Ok(())
    }

    #[test]
    fn test_invalid_date_row_is_kept_but_never_selected() -> Result<(), DatasetError> {
        let dataset = dataset()?;

        assert_eq!(dataset.stats().null_year, 1);
        let selected: usize = dataset
            .available_years()?
            .into_iter()
            .chain([SENTINEL_YEAR])
            .map(|year| dataset.for_year(year).row_count())
            .sum::<Result<usize, DatasetError>>()?;
        assert_eq!(selected, dataset.row_count() - 1);
        Ok(())
    }

    #[test]
    fn test_year_view_queries() -> Result<(), DatasetError> {
        let dataset = dataset()?;
        let view = dataset.for_year(2023);

        assert_eq!(view.year(), Some(2023));
        assert_eq!(view.row_count()?, 3);

        // The unmatched "XXX" status row is counted per zip but not per (zip, status).
        assert_eq!(view.zip_counts()?.total()?, 3);
        assert_eq!(
            ZipStatusCount::from_table(&view.zip_status_counts()?)?,
            vec![ZipStatusCount {
                zip_code: "30301".into(),
                final_status: "Approved".into(),
                count: 2,
            }]
        );

        let kpis = view.keyword_counts(&SALES_KPIS)?;
        let counts: Vec<u64> = kpis.iter().map(|k| k.count).collect();
        assert_eq!(counts, vec![1, 0, 0, 1]);
        Ok(())
    }

    #[test]
    fn test_missing_selection_is_empty_not_an_error() -> Result<(), DatasetError> {
        let dataset = dataset()?;

        let view = dataset.for_selection(None);

        assert_eq!(view.year(), None);
        assert!(view.zip_status_counts()?.is_empty());
        assert!(view.type_status_counts()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_from_frames_requires_columns() -> Result<(), DatasetError> {
        let permits = df!(RECORD_STATUS => ["ISS"])?;
        let status = df!(STATUS_CODE => ["ISS"], FINAL_STATUS => ["Approved"])?;
        let types = df!(RECORD_TYPE => ["BLD-R"], SIMPLE_TYPE => ["Residential"])?;

        let result = PermitDataset::from_frames(permits, status, types);

        assert!(matches!(
            result,
            Err(DatasetError::MissingColumn {
                table: SourceTable::Permits,
                column: RECORD_STATUS_DATE,
            })
        ));
        Ok(())
    }
}
