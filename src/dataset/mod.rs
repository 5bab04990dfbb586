pub mod data_loader;
pub mod error;
pub mod permit_dataset;
pub mod prepare;
