//! Column names used across the permit pipeline.
//!
//! Source column names must match the CSV headers exactly (including spaces and `#`).

// Permits table
pub const RECORD_STATUS: &str = "RECORD STATUS";
pub const RECORD_STATUS_DATE: &str = "RECORD STATUS DATE";
pub const RECORD_TYPE: &str = "RECORD TYPE";
pub const ADDRESS: &str = "ADDR FULL LINE#";
pub const DESCRIPTION: &str = "DESCRIPTION";

// Status lookup table
pub const STATUS_CODE: &str = "Status";
pub const FINAL_STATUS: &str = "FinalStatus";

// Type lookup table (keyed on RECORD_TYPE)
pub const SIMPLE_TYPE: &str = "SimpleType";

// Derived
pub const YEAR: &str = "Year";
pub const ZIP_CODE: &str = "ZipCode";
pub const DESCRIPTION_LOWER: &str = "DescriptionLower";
pub const COUNT: &str = "Count";
