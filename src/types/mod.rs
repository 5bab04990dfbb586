pub mod columns;
pub mod source_table;
pub mod summary;
pub mod weather_snapshot;
pub mod year_frame;
