//! Text-mode rendering of the permits dashboard for the latest year.
//!
//! Run from the directory holding the CSV sources. Set RUST_LOG=info to see load statistics.

use permits_dashboard::{
    Dashboard, DashboardError, Forecast, ForecastClient, PermitDataset, SourcePaths,
};
use std::env;

#[tokio::main]
async fn main() -> Result<(), DashboardError> {
    env_logger::init();
    configure_polars_display();

    let dataset = PermitDataset::load(&SourcePaths::default())?;
    let dashboard = Dashboard::new(dataset, ForecastClient::with_defaults()?);

    let view = dashboard.render().call().await?;

    println!("Years: {:?}", view.years);
    let Some(year) = view.selected_year else {
        println!("No selectable year in the permit data.");
        return Ok(());
    };

    println!("\n--- Sales potential ({}) ---", year);
    for kpi in &view.kpis {
        println!("{:<42} {}", kpi.label, kpi.count);
    }

    if view.has_data() {
        println!("\n--- Permits by zip code and status ---");
        println!("{}", view.zip_status.frame());
        println!("\n--- Permit volume by zip code ---");
        println!("{}", view.zip_volume.frame());
        println!("\n--- Permits by type and status ---");
        println!("{}", view.type_status.frame());
    } else {
        println!("\nNo permit data for {}.", year);
    }

    println!("\n--- Weather ---");
    match &view.forecast {
        Forecast::Available(weather) => {
            println!(
                "Now:     {:.1} °F, wind {:.1} mph, precipitation {:.2} in",
                weather.now.temperature_f, weather.now.wind_speed_mph, weather.now.precipitation_in
            );
            println!(
                "{}: {:.1} °F, wind {:.1} mph, {:.0}% chance of precipitation",
                weather.in_24h.time.format("%a %H:%M UTC"),
                weather.in_24h.temperature_f,
                weather.in_24h.wind_speed_mph,
                weather.in_24h.precipitation_probability
            );
        }
        Forecast::Unavailable { reason } => println!("Forecast unavailable ({})", reason),
    }

    Ok(())
}

fn configure_polars_display() {
    // show every column
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    env::set_var("POLARS_FMT_MAX_ROWS", "25");
}
