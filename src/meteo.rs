//! This module provides the main entry point for the meteo.lt client.
//! It bundles the fetcher and the endpoint configuration, and exposes the
//! forecast and historical loaders on top of them.

use crate::error::MeteoError;
use crate::types::date_range::DateRange;
use crate::types::time_table::TimeTable;
use crate::weather_data::fetcher::{HttpFetcher, JsonFetcher};
use crate::weather_data::forecast::load_forecast;
use crate::weather_data::historical::{load_historical, DEFAULT_REQUEST_DELAY};
use bon::bon;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::time::Duration;

/// Base URL of the public meteo.lt API.
pub const DEFAULT_API_URL: &str = "https://api.meteo.lt/v1";
/// Place code used for forecasts by default.
pub const DEFAULT_LOCATION: &str = "kaunas";
/// Station code used for observations by default.
pub const DEFAULT_STATION: &str = "kauno-ams";
/// Timeout applied to each HTTP request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Civil timezone of the stations; day windows and weekends are judged in it.
pub const CIVIL_TIMEZONE: Tz = chrono_tz::Europe::Vilnius;

/// The date range from one year ago up to `now`, in [`CIVIL_TIMEZONE`].
pub fn trailing_year(now: DateTime<Utc>) -> Result<DateRange, MeteoError> {
    let local = now.with_timezone(&CIVIL_TIMEZONE);
    DateRange::trailing_days(&local, 365).ok_or(MeteoError::InvalidDateRange {
        end: local.date_naive(),
        days: 365,
    })
}

/// The main client struct for accessing meteo.lt data.
///
/// Create one with [`Meteo::builder()`]; every setting has a default, so
/// `Meteo::builder().build()?` talks to the public API with a 500 ms pause between
/// observation requests.
///
/// All calls block the current thread until the API has answered.
///
/// # Examples
///
/// ```no_run
/// # use meteo_lt::{Meteo, MeteoError, DEFAULT_LOCATION, DEFAULT_STATION};
/// # fn main() -> Result<(), MeteoError> {
/// let meteo = Meteo::builder().build()?;
///
/// let forecast = meteo.forecast(DEFAULT_LOCATION)?;
/// let history = meteo.historical(DEFAULT_STATION).call()?; // last 365 days
/// # Ok(())
/// # }
/// ```
pub struct Meteo {
    fetcher: Box<dyn JsonFetcher>,
    api_url: String,
    request_delay: Duration,
}

#[bon]
impl Meteo {
    /// Creates a client.
    ///
    /// # Arguments
    ///
    /// * `.api_url(impl Into<String>)`: Optional. Base URL, defaults to [`DEFAULT_API_URL`].
    /// * `.request_delay(Duration)`: Optional. Pause after each observation request,
    ///   defaults to [`DEFAULT_REQUEST_DELAY`].
    /// * `.timeout(Duration)`: Optional. Per-request timeout of the HTTP client,
    ///   defaults to [`DEFAULT_TIMEOUT`]. Ignored when a custom fetcher is given.
    /// * `.fetcher(Box<dyn JsonFetcher>)`: Optional. Replaces the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`MeteoError::WeatherData`] if the HTTP client cannot be built.
    #[builder]
    pub fn new(
        #[builder(into, default = DEFAULT_API_URL.to_string())] api_url: String,
        #[builder(default = DEFAULT_REQUEST_DELAY)] request_delay: Duration,
        #[builder(default = DEFAULT_TIMEOUT)] timeout: Duration,
        fetcher: Option<Box<dyn JsonFetcher>>,
    ) -> Result<Self, MeteoError> {
        let fetcher = match fetcher {
            Some(fetcher) => fetcher,
            None => Box::new(HttpFetcher::new(timeout)?),
        };
        Ok(Self {
            fetcher,
            api_url: api_url.trim_end_matches('/').to_string(),
            request_delay,
        })
    }

    /// The base URL requests are built on, without a trailing `/`.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Loads the long-term forecast for `location_code`.
    ///
    /// See [`load_forecast`] for the table layout and failure modes.
    pub fn forecast(&self, location_code: &str) -> Result<TimeTable, MeteoError> {
        Ok(load_forecast(
            self.fetcher.as_ref(),
            &self.api_url,
            location_code,
        )?)
    }

    /// Loads observations of a station, one request per day.
    ///
    /// # Arguments (Initial Builder Method)
    ///
    /// * `station` - The station code, e.g. `"kauno-ams"`.
    ///
    /// # Optional Builder Methods
    ///
    /// * `.range(DateRange)`: Days to load. Defaults to [`trailing_year`] of the
    ///   current time, i.e. 366 requests.
    ///
    /// # Returns
    ///
    /// After `.call()`, `Ok(None)` when no day in the range had observations,
    /// otherwise the joined table, oldest first. See [`load_historical`].
    #[builder(start_fn = historical)]
    #[doc(hidden)]
    pub fn build_historical(
        &self,
        #[builder(start_fn)] station: &str,
        range: Option<DateRange>,
    ) -> Result<Option<TimeTable>, MeteoError> {
        let range = match range {
            Some(range) => range,
            None => trailing_year(Utc::now())?,
        };
        Ok(load_historical(
            self.fetcher.as_ref(),
            &self.api_url,
            station,
            range,
            self.request_delay,
        )?)
    }
}
