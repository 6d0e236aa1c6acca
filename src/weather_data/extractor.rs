use crate::types::records::{ForecastEntry, Observation};
use crate::types::time_table::TimeTable;
use crate::weather_data::error::WeatherDataError;

const COL_AIR_TEMPERATURE: &str = "airTemperature";
const COL_RELATIVE_HUMIDITY: &str = "relativeHumidity";
const COL_CONDITION_CODE: &str = "conditionCode";

/// Values of a float column, or all `None` when the feed never sent it.
fn opt_floats(table: &TimeTable, col: &str) -> Result<Vec<Option<f64>>, WeatherDataError> {
    if table.has_column(col) {
        Ok(table.f64_values(col)?)
    } else {
        Ok(vec![None; table.len()])
    }
}

fn opt_strings(table: &TimeTable, col: &str) -> Result<Vec<Option<String>>, WeatherDataError> {
    if table.has_column(col) {
        Ok(table.string_values(col)?)
    } else {
        Ok(vec![None; table.len()])
    }
}

/// Collects a historical table into typed [`Observation`] rows, oldest first.
pub fn extract_observations(table: &TimeTable) -> Result<Vec<Observation>, WeatherDataError> {
    let temperatures = opt_floats(table, COL_AIR_TEMPERATURE)?;
    let humidities = opt_floats(table, COL_RELATIVE_HUMIDITY)?;
    let conditions = opt_strings(table, COL_CONDITION_CODE)?;

    Ok(table
        .instants()?
        .into_iter()
        .zip(temperatures)
        .zip(humidities)
        .zip(conditions)
        .map(
            |(((time, air_temperature), relative_humidity), condition_code)| Observation {
                time,
                air_temperature,
                relative_humidity,
                condition_code,
            },
        )
        .collect())
}

/// Collects a forecast table into typed [`ForecastEntry`] rows, earliest first.
pub fn extract_forecast(table: &TimeTable) -> Result<Vec<ForecastEntry>, WeatherDataError> {
    let temperatures = opt_floats(table, COL_AIR_TEMPERATURE)?;
    let conditions = opt_strings(table, COL_CONDITION_CODE)?;

    Ok(table
        .instants()?
        .into_iter()
        .zip(temperatures)
        .zip(conditions)
        .map(|((time, air_temperature), condition_code)| ForecastEntry {
            time,
            air_temperature,
            condition_code,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather_data::normalize::records_to_table;
    use crate::WeatherCondition;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_extract_observations() {
        let records = json!([
            {"observationTimeUtc": "2024-06-01 00:00:00", "airTemperature": 9.5, "relativeHumidity": 91, "conditionCode": "light-rain"},
            {"observationTimeUtc": "2024-06-01 01:00:00", "airTemperature": null, "relativeHumidity": 90, "conditionCode": "tornado"},
        ]);
        let table = records_to_table("t", records.as_array().unwrap(), "observationTimeUtc").unwrap();

        let rows = extract_observations(&table).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].time, Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        assert_eq!(rows[0].air_temperature, Some(9.5));
        assert_eq!(rows[0].condition(), Some(WeatherCondition::LightRain));
        assert_eq!(rows[1].air_temperature, None);
        assert_eq!(rows[1].relative_humidity, Some(90.0));
        assert_eq!(rows[1].condition_code.as_deref(), Some("tornado"));
        assert_eq!(rows[1].condition(), None);
    }

    #[test]
    fn test_extract_forecast_without_condition_column() {
        let records = json!([{"forecastTimeUtc": "2024-06-01 00:00:00", "airTemperature": 1}]);
        let table = records_to_table("t", records.as_array().unwrap(), "forecastTimeUtc").unwrap();

        let rows = extract_forecast(&table).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].air_temperature, Some(1.0));
        assert_eq!(rows[0].condition_code, None);
    }
}
