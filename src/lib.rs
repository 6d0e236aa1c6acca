mod analysis;
mod error;
mod meteo;
mod plotting;
mod types;
mod weather_data;

pub use error::MeteoError;
pub use meteo::*;

pub use types::date_range::{DateRange, DaysBack};
pub use types::into_utc_trait::{parse_utc_timestamp, IntoUtcDateTime};
pub use types::records::{ForecastEntry, Observation};
pub use types::time_series::TimeSeries;
pub use types::time_table::{time_dtype, TimeTable, TIME_COLUMN};
pub use types::weather_condition::WeatherCondition;

pub use weather_data::extractor::{extract_forecast, extract_observations};
pub use weather_data::fetcher::{HttpFetcher, JsonFetcher};
pub use weather_data::forecast::load_forecast;
pub use weather_data::historical::{load_historical, DEFAULT_REQUEST_DELAY};
pub use weather_data::normalize::{record_list, records_to_table};

pub use analysis::metrics::*;
pub use analysis::resample::{interpolate_to_5min, resample_linear, FIVE_MINUTES};

pub use plotting::comparison::*;
#[cfg(feature = "plotting")]
pub use plotting::plotlars_backend::PlotlarsBackend;

pub use analysis::error::AnalysisError;
pub use plotting::error::PlotError;
pub use weather_data::error::WeatherDataError;
