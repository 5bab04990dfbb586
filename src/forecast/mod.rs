pub mod config;
pub mod error;
pub mod forecast_client;
pub(crate) mod models;
