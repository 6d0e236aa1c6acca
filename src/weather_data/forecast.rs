use crate::types::time_table::TimeTable;
use crate::weather_data::error::WeatherDataError;
use crate::weather_data::fetcher::JsonFetcher;
use crate::weather_data::normalize::{record_list, records_to_table};
use log::info;

pub(crate) const FORECAST_LIST_KEY: &str = "forecastTimestamps";
pub(crate) const FORECAST_TIME_FIELD: &str = "forecastTimeUtc";

pub(crate) fn forecast_url(api_url: &str, location_code: &str) -> String {
    format!(
        "{}/places/{}/forecasts/long-term",
        api_url.trim_end_matches('/'),
        location_code
    )
}

/// Loads the long-term forecast for a place into a [`TimeTable`].
///
/// The table is indexed by `forecastTimeUtc`; all other forecast fields
/// (`airTemperature`, `conditionCode`, `windSpeed`, ...) become columns as-is.
///
/// # Errors
///
/// * [`WeatherDataError::NetworkRequest`] / [`WeatherDataError::HttpStatus`] when the request fails.
/// * [`WeatherDataError::MalformedResponse`] when `forecastTimestamps` is missing or an
///   entry has no `forecastTimeUtc`.
/// * [`WeatherDataError::InvalidTimestamp`] when a `forecastTimeUtc` does not parse.
pub fn load_forecast(
    fetcher: &dyn JsonFetcher,
    api_url: &str,
    location_code: &str,
) -> Result<TimeTable, WeatherDataError> {
    let url = forecast_url(api_url, location_code);
    let body = fetcher.fetch(&url)?;
    let records = record_list(&url, &body, FORECAST_LIST_KEY, true)?;
    let table = records_to_table(&url, records, FORECAST_TIME_FIELD)?;
    info!(
        "Loaded {} forecast steps for place {}",
        table.len(),
        location_code
    );
    Ok(table)
}
