//! demos/yearly_report.rs
//!
//! Loads a year of Kaunas observations plus the current forecast from meteo.lt,
//! prints the yearly metrics and the first 5-minute interpolated temperatures, and
//! shows the last week next to the forecast in the browser.
//!
//! Loading a year takes a little over three minutes: one request per day, with a
//! half-second pause after each.
//!
//! To run this example:
//! cargo run --example yearly_report --features plotting

use std::error::Error;

use chrono::Utc;
use meteo_lt::{
    compute_yearly_metrics, extract_observations, interpolate_to_5min, render_comparison,
    trailing_year, Meteo, PlotlarsBackend, TimeTable, DEFAULT_LOCATION, DEFAULT_STATION,
};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 1. Create a meteo.lt client
    let meteo = Meteo::builder().build()?;

    // 2. Load the forecast and the trailing year of observations
    let forecast = meteo.forecast(DEFAULT_LOCATION)?;
    let range = trailing_year(Utc::now())?;
    println!("Loading observations for {}...", range);
    let history = meteo.historical(DEFAULT_STATION).range(range).call()?;

    // 3. Summarize the year
    let metrics = compute_yearly_metrics(history.as_ref())?;
    println!("{}", metrics);

    let Some(history) = history else {
        return Ok(());
    };
    if let Some(newest) = extract_observations(&history)?.last() {
        println!("Newest observation: {:?}", newest);
    }

    // 4. Interpolate temperatures to a 5-minute grid
    let temperatures = interpolate_to_5min(&history.series("airTemperature")?)?;
    println!("First interpolated temperatures:");
    for (time, value) in temperatures.head(10) {
        match value {
            Some(value) => println!("  {}  {:.2} °C", time, value),
            None => println!("  {}  -", time),
        }
    }

    // 5. Plot the last week against the forecast
    plot_comparison(&history, &forecast)?;
    println!("Plot shown in browser.");

    Ok(())
}

fn plot_comparison(history: &TimeTable, forecast: &TimeTable) -> Result<(), Box<dyn Error>> {
    println!("Generating temperature plot...");
    render_comparison(&PlotlarsBackend::new(), history, forecast)?;
    Ok(())
}
