//! Typed views of single table rows.

use crate::WeatherCondition;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One station observation, as collected from a historical [`crate::TimeTable`].
/// Serializes with the meteo.lt field names (`airTemperature`, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub time: DateTime<Utc>,
    pub air_temperature: Option<f64>,
    pub relative_humidity: Option<f64>,
    /// The raw `conditionCode`, kept even when it is not a known code.
    pub condition_code: Option<String>,
}

impl Observation {
    /// The parsed condition, if the code is a known one.
    pub fn condition(&self) -> Option<WeatherCondition> {
        self.condition_code
            .as_deref()
            .and_then(WeatherCondition::from_code)
    }
}

/// One long-term forecast step, as collected from a forecast [`crate::TimeTable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastEntry {
    pub time: DateTime<Utc>,
    pub air_temperature: Option<f64>,
    pub condition_code: Option<String>,
}

impl ForecastEntry {
    pub fn condition(&self) -> Option<WeatherCondition> {
        self.condition_code
            .as_deref()
            .and_then(WeatherCondition::from_code)
    }
}
