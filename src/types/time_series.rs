//! A single named numeric column paired with its UTC index.

use crate::types::time_table::time_column;
use chrono::{DateTime, Utc};
use polars::prelude::{Column, DataFrame, PolarsResult};

/// One numeric series over a UTC time index, e.g. the `airTemperature` column of
/// a [`crate::TimeTable`].
///
/// Values are optional so that gaps in the source feed survive extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    name: String,
    points: Vec<(DateTime<Utc>, Option<f64>)>,
}

impl TimeSeries {
    pub fn new(name: impl Into<String>, points: Vec<(DateTime<Utc>, Option<f64>)>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[(DateTime<Utc>, Option<f64>)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Value stored exactly at `instant`, if the index contains it.
    pub fn value_at(&self, instant: DateTime<Utc>) -> Option<f64> {
        self.points
            .binary_search_by_key(&instant, |(time, _)| *time)
            .ok()
            .and_then(|idx| self.points[idx].1)
    }

    /// Returns the first `n` points, in the spirit of `DataFrame::head`.
    pub fn head(&self, n: usize) -> &[(DateTime<Utc>, Option<f64>)] {
        &self.points[..n.min(self.points.len())]
    }

    /// Builds a two column `DataFrame` (`time`, `<name>`) for display or further
    /// polars processing.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let instants: Vec<DateTime<Utc>> = self.points.iter().map(|(time, _)| *time).collect();
        let values: Vec<Option<f64>> = self.points.iter().map(|(_, value)| *value).collect();
        DataFrame::new(vec![
            time_column(&instants),
            Column::new(self.name.as_str().into(), values),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_value_at_and_head() {
        let series = TimeSeries::new(
            "airTemperature",
            vec![(at(0), Some(1.0)), (at(1), None), (at(2), Some(3.0))],
        );
        assert_eq!(series.value_at(at(0)), Some(1.0));
        assert_eq!(series.value_at(at(1)), None);
        assert_eq!(series.value_at(at(5)), None);
        assert_eq!(series.head(2).len(), 2);
        assert_eq!(series.head(10).len(), 3);
    }

    #[test]
    fn test_to_frame_shape() {
        let series = TimeSeries::new("airTemperature", vec![(at(0), Some(1.0)), (at(1), None)]);
        let frame = series.to_frame().unwrap();
        assert_eq!(frame.shape(), (2, 2));
        assert_eq!(frame.get_column_names(), ["time", "airTemperature"]);
        assert_eq!(frame.column("airTemperature").unwrap().null_count(), 1);
    }
}
