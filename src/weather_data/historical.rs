use crate::types::date_range::DateRange;
use crate::types::time_table::TimeTable;
use crate::weather_data::error::WeatherDataError;
use crate::weather_data::fetcher::JsonFetcher;
use crate::weather_data::normalize::{record_list, records_to_table};
use chrono::NaiveDate;
use log::{info, warn};
use std::thread;
use std::time::Duration;

pub(crate) const OBSERVATION_LIST_KEY: &str = "observations";
pub(crate) const OBSERVATION_TIME_FIELD: &str = "observationTimeUtc";

/// Pause between two observation requests, imposed by the meteo.lt rate limit.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(500);

pub(crate) fn observations_url(api_url: &str, station_code: &str, day: NaiveDate) -> String {
    format!(
        "{}/stations/{}/observations/{}",
        api_url.trim_end_matches('/'),
        station_code,
        day.format("%Y-%m-%d")
    )
}

/// Loads every observation of `station_code` for the days in `range`.
///
/// Days are requested one at a time from `range.end()` back to `range.start()`,
/// sleeping `request_delay` after each request, including the last one and days
/// without data. A full year therefore blocks for several minutes.
///
/// Days that report no observations are skipped. The remaining days are joined on
/// the union of their columns and returned oldest first; `Ok(None)` means no day
/// in the range had any observation.
///
/// # Errors
///
/// The first failed request aborts the whole range; nothing fetched so far is
/// returned. See [`WeatherDataError`] for the variants.
pub fn load_historical(
    fetcher: &dyn JsonFetcher,
    api_url: &str,
    station_code: &str,
    range: DateRange,
    request_delay: Duration,
) -> Result<Option<TimeTable>, WeatherDataError> {
    info!(
        "Loading observations for station {} over {} ({} days)",
        station_code,
        range,
        range.len_days()
    );

    let mut days: Vec<TimeTable> = Vec::new();
    for day in range.days_back() {
        let url = observations_url(api_url, station_code, day);
        let body = fetcher.fetch(&url)?;

        let records = record_list(&url, &body, OBSERVATION_LIST_KEY, false)?;
        if records.is_empty() {
            warn!("No observations for station {} on {}", station_code, day);
        } else {
            days.push(records_to_table(&url, records, OBSERVATION_TIME_FIELD)?);
        }

        thread::sleep(request_delay);
    }

    if days.is_empty() {
        warn!(
            "Station {} reported no observations over {}",
            station_code, range
        );
        return Ok(None);
    }

    let days_with_data = days.len();
    let table = TimeTable::concat_diagonal(days)?;
    info!(
        "Loaded {} observations from {} of {} days for station {}",
        table.len(),
        days_with_data,
        range.len_days(),
        station_code
    );
    Ok(Some(table))
}

#[cfg(test)]
pub(crate) mod test_data {
    use chrono::{Duration as ChronoDuration, NaiveDate};
    use serde_json::{json, Value};

    /// A day of 24 hourly observations, timestamps written the meteo.lt way.
    pub(crate) fn hourly_day(day: NaiveDate, temperature: f64, humidity: f64, condition: &str) -> Value {
        let midnight = day.and_hms_opt(0, 0, 0).unwrap();
        let observations: Vec<Value> = (0..24)
            .map(|hour| {
                let time = midnight + ChronoDuration::hours(hour);
                json!({
                    "observationTimeUtc": time.format("%Y-%m-%d %H:%M:%S").to_string(),
                    "airTemperature": temperature,
                    "relativeHumidity": humidity,
                    "conditionCode": condition,
                })
            })
            .collect();
        json!({
            "station": {"code": "kauno-ams"},
            "observations": observations,
        })
    }
}
