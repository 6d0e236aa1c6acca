//! demos/interpolate.rs
//!
//! Fetches the Kaunas forecast and resamples its hourly temperatures onto a
//! 5-minute grid, printing the first hour of points.
//!
//! To run this example:
//! cargo run --example interpolate

use std::error::Error;

use meteo_lt::{extract_forecast, interpolate_to_5min, Meteo, DEFAULT_LOCATION};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let meteo = Meteo::builder().build()?;
    let forecast = meteo.forecast(DEFAULT_LOCATION)?;

    let entries = extract_forecast(&forecast)?;
    println!("Forecast has {} entries", entries.len());
    if let Some(first) = entries.first() {
        println!("First entry: {:?} ({:?})", first, first.condition());
    }

    let temperatures = forecast.series("airTemperature")?;
    let resampled = interpolate_to_5min(&temperatures)?;
    println!(
        "{} hourly points became {} five-minute points",
        temperatures.len(),
        resampled.len()
    );
    println!("{}", resampled.to_frame()?.head(Some(13)));

    Ok(())
}
