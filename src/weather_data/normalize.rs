//! Turns lists of JSON records into [`TimeTable`]s.
//!
//! Each record becomes one row. The timestamp field becomes the UTC index and every
//! other field becomes a column of its own: numbers as `Float64`, booleans as
//! `Boolean`, everything else as `String` (nested values keep their JSON text).

use crate::types::into_utc_trait::parse_utc_timestamp;
use crate::types::time_table::{time_column, TimeTable};
use crate::weather_data::error::WeatherDataError;
use chrono::{DateTime, Utc};
use log::debug;
use polars::prelude::{Column, DataFrame, DataType};
use serde_json::{Map, Value};

/// Looks up the record list stored under `key` in a response body.
///
/// With `required` set, a missing key is a [`WeatherDataError::MalformedResponse`];
/// otherwise it reads as an empty list. A present key whose value is not a list is
/// always malformed.
pub fn record_list<'a>(
    url: &str,
    body: &'a Value,
    key: &str,
    required: bool,
) -> Result<&'a [Value], WeatherDataError> {
    match body.get(key) {
        Some(Value::Array(records)) => Ok(records.as_slice()),
        Some(Value::Null) | None if !required => Ok(&[]),
        Some(other) => Err(WeatherDataError::malformed(
            url,
            format!("'{}' is not a list but {}", key, json_kind(other)),
        )),
        None => Err(WeatherDataError::malformed(
            url,
            format!("missing key '{}'", key),
        )),
    }
}

/// Normalizes `records` into a table indexed by the `time_field` of each record.
///
/// `url` only serves as error context.
pub fn records_to_table(
    url: &str,
    records: &[Value],
    time_field: &str,
) -> Result<TimeTable, WeatherDataError> {
    let mut instants: Vec<DateTime<Utc>> = Vec::with_capacity(records.len());
    let mut rows: Vec<&Map<String, Value>> = Vec::with_capacity(records.len());

    for (i, record) in records.iter().enumerate() {
        let row = record.as_object().ok_or_else(|| {
            WeatherDataError::malformed(url, format!("entry {} is {}", i, json_kind(record)))
        })?;
        let raw = row
            .get(time_field)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                WeatherDataError::malformed(url, format!("entry {} lacks '{}'", i, time_field))
            })?;
        let instant =
            parse_utc_timestamp(raw).ok_or_else(|| WeatherDataError::InvalidTimestamp {
                url: url.to_string(),
                field: time_field.to_string(),
                value: raw.to_string(),
            })?;
        instants.push(instant);
        rows.push(row);
    }

    let mut names: Vec<&str> = Vec::new();
    for row in &rows {
        for key in row.keys() {
            if key != time_field && !names.contains(&key.as_str()) {
                names.push(key);
            }
        }
    }
    debug!(
        "Normalizing {} records on '{}' into columns {:?}",
        rows.len(),
        time_field,
        names
    );

    let mut columns = Vec::with_capacity(names.len() + 1);
    columns.push(time_column(&instants));
    for name in names {
        let cells: Vec<Option<&Value>> = rows
            .iter()
            .map(|row| row.get(name).filter(|value| !value.is_null()))
            .collect();
        columns.push(build_column(name, &cells));
    }

    let frame = DataFrame::new(columns)?;
    Ok(TimeTable::from_frame(frame)?)
}

fn build_column(name: &str, cells: &[Option<&Value>]) -> Column {
    let present = || cells.iter().flatten();

    if present().next().is_none() {
        return Column::full_null(name.into(), cells.len(), &DataType::Null);
    }
    if present().all(|value| value.is_number()) {
        let values: Vec<Option<f64>> = cells
            .iter()
            .map(|cell| cell.and_then(Value::as_f64))
            .collect();
        return Column::new(name.into(), values);
    }
    if present().all(|value| value.is_boolean()) {
        let values: Vec<Option<bool>> = cells
            .iter()
            .map(|cell| cell.and_then(Value::as_bool))
            .collect();
        return Column::new(name.into(), values);
    }
    let values: Vec<Option<String>> = cells
        .iter()
        .map(|cell| {
            cell.map(|value| match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
        })
        .collect();
    Column::new(name.into(), values)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::time_table::{time_dtype, TIME_COLUMN};
    use chrono::TimeZone;
    use serde_json::json;

    const URL: &str = "http://test/observations";

    #[test]
    fn test_record_list_optional_and_required() {
        let body = json!({"observations": [{"a": 1}], "other": 3});
        assert_eq!(record_list(URL, &body, "observations", true).unwrap().len(), 1);
        assert!(record_list(URL, &body, "missing", false).unwrap().is_empty());
        assert!(record_list(URL, &json!({"x": null}), "x", false)
            .unwrap()
            .is_empty());

        let err = record_list(URL, &body, "missing", true).unwrap_err();
        assert!(matches!(err, WeatherDataError::MalformedResponse { .. }));
        let err = record_list(URL, &body, "other", false).unwrap_err();
        assert!(matches!(err, WeatherDataError::MalformedResponse { message, .. } if message.contains("a number")));
    }

    #[test]
    fn test_records_to_table_columns_and_types() {
        let records = json!([
            {"observationTimeUtc": "2024-06-01 01:00:00", "airTemperature": 12.5, "relativeHumidity": 80, "conditionCode": null, "extra": {"k": 1}},
            {"observationTimeUtc": "2024-06-01 00:00:00", "airTemperature": 11, "conditionCode": "rain", "isDay": false},
        ]);
        let table = records_to_table(URL, records.as_array().unwrap(), "observationTimeUtc").unwrap();
        let frame = table.frame();

        assert_eq!(
            frame.get_column_names(),
            [TIME_COLUMN, "airTemperature", "relativeHumidity", "conditionCode", "extra", "isDay"]
        );
        assert_eq!(frame.column(TIME_COLUMN).unwrap().dtype(), &time_dtype());
        assert_eq!(frame.column("airTemperature").unwrap().dtype(), &DataType::Float64);
        assert_eq!(frame.column("isDay").unwrap().dtype(), &DataType::Boolean);

        // sorted ascending even though the feed listed 01:00 first
        assert_eq!(
            table.instants().unwrap(),
            vec![
                Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 6, 1, 1, 0, 0).unwrap(),
            ]
        );
        assert_eq!(
            table.f64_values("relativeHumidity").unwrap(),
            vec![None, Some(80.0)]
        );
        assert_eq!(
            table.string_values("conditionCode").unwrap(),
            vec![Some("rain".to_string()), None]
        );
        assert_eq!(
            table.string_values("extra").unwrap(),
            vec![None, Some(r#"{"k":1}"#.to_string())]
        );
    }

    #[test]
    fn test_all_null_field_becomes_null_column() {
        let records = json!([{"t": "2024-06-01T00:00:00Z", "conditionCode": null}]);
        let table = records_to_table(URL, records.as_array().unwrap(), "t").unwrap();
        assert_eq!(
            table.frame().column("conditionCode").unwrap().dtype(),
            &DataType::Null
        );
    }

    #[test]
    fn test_mixed_field_becomes_text() {
        let records = json!([
            {"t": "2024-06-01T00:00:00Z", "v": 1},
            {"t": "2024-06-01T01:00:00Z", "v": "n/a"},
        ]);
        let table = records_to_table(URL, records.as_array().unwrap(), "t").unwrap();
        assert_eq!(
            table.string_values("v").unwrap(),
            vec![Some("1".to_string()), Some("n/a".to_string())]
        );
    }

    #[test]
    fn test_missing_time_field_is_malformed() {
        let records = json!([{"airTemperature": 1.0}]);
        let err = records_to_table(URL, records.as_array().unwrap(), "forecastTimeUtc").unwrap_err();
        assert!(matches!(err, WeatherDataError::MalformedResponse { message, .. } if message.contains("forecastTimeUtc")));
    }

    #[test]
    fn test_non_object_entry_is_malformed() {
        let records = json!([42]);
        let err = records_to_table(URL, records.as_array().unwrap(), "t").unwrap_err();
        assert!(matches!(err, WeatherDataError::MalformedResponse { .. }));
    }

    #[test]
    fn test_bad_timestamp() {
        let records = json!([{"t": "31/12/2024"}]);
        let err = records_to_table(URL, records.as_array().unwrap(), "t").unwrap_err();
        assert!(matches!(err, WeatherDataError::InvalidTimestamp { value, .. } if value == "31/12/2024"));
    }

    #[test]
    fn test_empty_records_give_empty_typed_table() {
        let table = records_to_table(URL, &[], "t").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.frame().column(TIME_COLUMN).unwrap().dtype(), &time_dtype());
    }
}
