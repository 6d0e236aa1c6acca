use crate::analysis::error::AnalysisError;
use crate::plotting::error::PlotError;
use crate::weather_data::error::WeatherDataError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeteoError {
    #[error(transparent)]
    WeatherData(#[from] WeatherDataError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Plot(#[from] PlotError),

    #[error("Could not build a date range ending {end} spanning {days} days")]
    InvalidDateRange { end: chrono::NaiveDate, days: u64 },
}
